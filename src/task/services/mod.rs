//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    ProjectTaskCounts, RegisterTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
