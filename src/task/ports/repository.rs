//! Repository port for task persistence and lookup.

use crate::task::domain::{ProjectCode, TaskCode, TaskId, TaskRecord, TaskStatus, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Whether a read sees soft-deleted records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Only records whose soft-delete flag is unset. The default for reads.
    #[default]
    ActiveOnly,
    /// Every stored record, deleted or not.
    IncludeDeleted,
}

impl Visibility {
    /// Returns `true` when a record with the given deletion flag is visible.
    #[must_use]
    pub const fn admits(self, is_deleted: bool) -> bool {
        match self {
            Self::ActiveOnly => !is_deleted,
            Self::IncludeDeleted => true,
        }
    }
}

/// Read predicate for task queries.
///
/// Adapters translate every field into an explicit query predicate; the
/// soft-delete condition is one of them and is never applied implicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    visibility: Visibility,
    task_code: Option<TaskCode>,
    project_code: Option<ProjectCode>,
    assigned_employee: Option<Username>,
    assigned_manager: Option<Username>,
    status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Creates a filter matching every active record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the soft-delete visibility.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Restricts results to a task code.
    #[must_use]
    pub fn with_task_code(mut self, task_code: TaskCode) -> Self {
        self.task_code = Some(task_code);
        self
    }

    /// Restricts results to a project.
    #[must_use]
    pub fn with_project_code(mut self, project_code: ProjectCode) -> Self {
        self.project_code = Some(project_code);
        self
    }

    /// Restricts results to an assigned employee.
    #[must_use]
    pub fn with_assigned_employee(mut self, employee: Username) -> Self {
        self.assigned_employee = Some(employee);
        self
    }

    /// Restricts results to an assigned manager.
    #[must_use]
    pub fn with_assigned_manager(mut self, manager: Username) -> Self {
        self.assigned_manager = Some(manager);
        self
    }

    /// Restricts results to a status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the soft-delete visibility.
    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the task code restriction.
    #[must_use]
    pub const fn task_code(&self) -> Option<&TaskCode> {
        self.task_code.as_ref()
    }

    /// Returns the project restriction.
    #[must_use]
    pub const fn project_code(&self) -> Option<&ProjectCode> {
        self.project_code.as_ref()
    }

    /// Returns the employee restriction.
    #[must_use]
    pub const fn assigned_employee(&self) -> Option<&Username> {
        self.assigned_employee.as_ref()
    }

    /// Returns the manager restriction.
    #[must_use]
    pub const fn assigned_manager(&self) -> Option<&Username> {
        self.assigned_manager.as_ref()
    }

    /// Returns the status restriction.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Evaluates the filter against a record held in memory.
    #[must_use]
    pub fn matches(&self, task: &TaskRecord) -> bool {
        self.visibility.admits(task.is_deleted())
            && self.task_code.as_ref().is_none_or(|code| code == task.task_code())
            && self
                .project_code
                .as_ref()
                .is_none_or(|code| code == task.project_code())
            && self
                .assigned_employee
                .as_ref()
                .is_none_or(|name| name == task.assigned_employee())
            && self
                .assigned_manager
                .as_ref()
                .is_none_or(|name| name == task.assigned_manager())
            && self.status.is_none_or(|status| status == task.task_status())
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists or [`TaskRepositoryError::DuplicateTaskCode`] when an active
    /// task already uses the task code.
    async fn store(&self, task: &TaskRecord) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no active task has the
    /// identifier.
    async fn update(&self, task: &TaskRecord) -> TaskRepositoryResult<()>;

    /// Flags the active task with the given code as deleted.
    ///
    /// The row stays in storage. Returns the record as it now reads.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::CodeNotFound`] when no active task has
    /// the code.
    async fn soft_delete(
        &self,
        task_code: &TaskCode,
        deleted_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<TaskRecord>;

    /// Finds the active task with the given code.
    ///
    /// Returns `None` when no active task has the code.
    async fn find_by_code(&self, task_code: &TaskCode) -> TaskRepositoryResult<Option<TaskRecord>>;

    /// Finds a task by internal identifier within the given visibility.
    async fn find_by_id(
        &self,
        id: TaskId,
        visibility: Visibility,
    ) -> TaskRepositoryResult<Option<TaskRecord>>;

    /// Returns tasks matching the filter, oldest first.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<TaskRecord>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// An active task already uses the task code.
    #[error("duplicate task code: {0}")]
    DuplicateTaskCode(TaskCode),

    /// No active task has the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// No active task has the code.
    #[error("task not found for code: {0}")]
    CodeNotFound(TaskCode),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
