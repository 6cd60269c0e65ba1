//! Domain model for task records.
//!
//! Tasks reference projects and people by opaque codes. All infrastructure
//! concerns, including the remote checks on those codes, stay outside of the
//! domain boundary.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{MAX_IDENTIFIER_LEN, ProjectCode, TaskCode, TaskId, Username};
pub use status::TaskStatus;
pub use task::{TaskFields, TaskRecord};
