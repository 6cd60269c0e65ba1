//! Shared world state for task registration BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use task_service::lookup::adapters::{InMemoryProjectDirectory, InMemoryUserDirectory};
use task_service::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskRecord,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserDirectory,
    InMemoryProjectDirectory,
    DefaultClock,
>;

/// Scenario world for task registration behaviour tests.
pub struct TaskRegistrationWorld {
    pub service: TestTaskService,
    pub users: InMemoryUserDirectory,
    pub projects: InMemoryProjectDirectory,
    pub last_register_result: Option<Result<TaskRecord, TaskLifecycleError>>,
}

impl TaskRegistrationWorld {
    /// Creates a world with empty directories and repository.
    #[must_use]
    pub fn new() -> Self {
        let users = InMemoryUserDirectory::new();
        let projects = InMemoryProjectDirectory::new();
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(users.clone()),
            Arc::new(projects.clone()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            users,
            projects,
            last_register_result: None,
        }
    }
}

impl Default for TaskRegistrationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskRegistrationWorld {
    TaskRegistrationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
