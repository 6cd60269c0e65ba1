//! Service layer for task registration, updates and soft deletion.

use crate::entity::storage_now;
use crate::lookup::{LookupError, ProjectLookup, UserLookup};
use crate::task::{
    domain::{
        ProjectCode, TaskCode, TaskDomainError, TaskFields, TaskRecord, TaskStatus, Username,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTaskRequest {
    task_code: String,
    project_code: String,
    assigned_employee: String,
    task_subject: Option<String>,
    task_detail: Option<String>,
    assigned_date: Option<NaiveDate>,
}

impl RegisterTaskRequest {
    /// Creates a request with the required references.
    #[must_use]
    pub fn new(
        task_code: impl Into<String>,
        project_code: impl Into<String>,
        assigned_employee: impl Into<String>,
    ) -> Self {
        Self {
            task_code: task_code.into(),
            project_code: project_code.into(),
            assigned_employee: assigned_employee.into(),
            task_subject: None,
            task_detail: None,
            assigned_date: None,
        }
    }

    /// Sets the task subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.task_subject = Some(subject.into());
        self
    }

    /// Sets the task detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.task_detail = Some(detail.into());
        self
    }

    /// Sets the assignment date. Defaults to today (UTC).
    #[must_use]
    pub const fn with_assigned_date(mut self, assigned_date: NaiveDate) -> Self {
        self.assigned_date = Some(assigned_date);
        self
    }
}

/// Completed and unfinished task totals for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectTaskCounts {
    /// Active tasks with status [`TaskStatus::Complete`].
    pub completed: usize,
    /// Active tasks with any other status.
    pub unfinished: usize,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// A remote lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// The user service does not know the employee.
    #[error("unknown employee: {0}")]
    UnknownEmployee(Username),
    /// The project service does not know the project.
    #[error("unknown project: {0}")]
    UnknownProject(ProjectCode),
    /// The project exists but has no manager.
    #[error("project {0} has no assigned manager")]
    ManagerNotAssigned(ProjectCode),
    /// No active task has the code.
    #[error("task not found: {0}")]
    TaskNotFound(TaskCode),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Checks every external reference through the lookup ports before a task is
/// persisted. Lookups run one at a time: employee, then project, then
/// manager. The first failure ends the operation.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, P, C>
where
    R: TaskRepository,
    U: UserLookup,
    P: ProjectLookup,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    users: Arc<U>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<R, U, P, C> TaskLifecycleService<R, U, P, C>
where
    R: TaskRepository,
    U: UserLookup,
    P: ProjectLookup,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, users: Arc<U>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            users,
            projects,
            clock,
        }
    }

    /// Registers a new `Open` task after checking its references.
    ///
    /// The manager is the one the project service reports for the project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownEmployee`],
    /// [`TaskLifecycleError::UnknownProject`] or
    /// [`TaskLifecycleError::ManagerNotAssigned`] when a reference does not
    /// resolve, [`TaskLifecycleError::Lookup`] when a remote call fails, and
    /// [`TaskLifecycleError::Repository`] when persistence rejects the task,
    /// including a duplicate task code.
    pub async fn register(&self, request: RegisterTaskRequest) -> TaskLifecycleResult<TaskRecord> {
        let task_code = TaskCode::new(&request.task_code)?;
        let project_code = ProjectCode::new(&request.project_code)?;
        let employee = Username::new(&request.assigned_employee)?;

        self.ensure_employee_exists(&employee).await?;
        self.ensure_project_exists(&project_code).await?;
        let manager = self
            .projects
            .get_manager_by_project(&project_code)
            .await?
            .ok_or_else(|| TaskLifecycleError::ManagerNotAssigned(project_code.clone()))?;

        let assigned_date = request
            .assigned_date
            .unwrap_or_else(|| self.clock.utc().date_naive());
        let fields = TaskFields {
            task_code,
            task_subject: request.task_subject,
            task_detail: request.task_detail,
            task_status: TaskStatus::Open,
            assigned_date,
            project_code,
            assigned_employee: employee,
            assigned_manager: manager.username,
        };
        let task = TaskRecord::new(fields, &*self.clock);
        self.repository.store(&task).await?;

        tracing::info!(
            task_code = %task.task_code(),
            project_code = %task.project_code(),
            assigned_employee = %task.assigned_employee(),
            "registered task"
        );
        Ok(task)
    }

    /// Retrieves the active task with the given code.
    ///
    /// Returns `Ok(None)` when no active task has the code.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_code(&self, task_code: &TaskCode) -> TaskLifecycleResult<Option<TaskRecord>> {
        Ok(self.repository.find_by_code(task_code).await?)
    }

    /// Lists tasks matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self, filter: &TaskFilter) -> TaskLifecycleResult<Vec<TaskRecord>> {
        Ok(self.repository.list(filter).await?)
    }

    /// Replaces the subject and detail of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when no active task has
    /// the code, or [`TaskLifecycleError::Repository`] on persistence failure.
    pub async fn update_details(
        &self,
        task_code: &TaskCode,
        subject: Option<String>,
        detail: Option<String>,
    ) -> TaskLifecycleResult<TaskRecord> {
        let mut task = self.require_active(task_code).await?;
        task.update_details(subject, detail, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Sets the status of a task. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when no active task has
    /// the code, or [`TaskLifecycleError::Repository`] on persistence failure.
    pub async fn update_status(
        &self,
        task_code: &TaskCode,
        status: TaskStatus,
    ) -> TaskLifecycleResult<TaskRecord> {
        let mut task = self.require_active(task_code).await?;
        task.set_status(status, &*self.clock);
        self.repository.update(&task).await?;
        tracing::debug!(%task_code, status = status.as_str(), "updated task status");
        Ok(task)
    }

    /// Assigns a task to another employee after checking the username.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when no active task has
    /// the code, [`TaskLifecycleError::UnknownEmployee`] when the username
    /// does not resolve, [`TaskLifecycleError::Lookup`] when the user service
    /// call fails, or [`TaskLifecycleError::Repository`] on persistence
    /// failure.
    pub async fn reassign_employee(
        &self,
        task_code: &TaskCode,
        employee: Username,
    ) -> TaskLifecycleResult<TaskRecord> {
        let mut task = self.require_active(task_code).await?;
        self.ensure_employee_exists(&employee).await?;
        task.reassign_employee(employee, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Soft-deletes the active task with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when no active task has
    /// the code, or [`TaskLifecycleError::Repository`] on persistence failure.
    pub async fn delete(&self, task_code: &TaskCode) -> TaskLifecycleResult<TaskRecord> {
        let deleted = self
            .repository
            .soft_delete(task_code, storage_now(&*self.clock))
            .await
            .map_err(|err| match err {
                TaskRepositoryError::CodeNotFound(code) => TaskLifecycleError::TaskNotFound(code),
                other => TaskLifecycleError::Repository(other),
            })?;
        tracing::info!(%task_code, "soft-deleted task");
        Ok(deleted)
    }

    /// Marks every active task of a project as complete.
    ///
    /// Returns the updated tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] on persistence failure.
    /// Tasks updated before the failure stay updated.
    pub async fn complete_by_project(
        &self,
        project_code: &ProjectCode,
    ) -> TaskLifecycleResult<Vec<TaskRecord>> {
        let filter = TaskFilter::new().with_project_code(project_code.clone());
        let mut completed = Vec::new();
        for mut task in self.repository.list(&filter).await? {
            if task.task_status().is_complete() {
                continue;
            }
            task.set_status(TaskStatus::Complete, &*self.clock);
            self.repository.update(&task).await?;
            completed.push(task);
        }
        tracing::info!(%project_code, count = completed.len(), "completed project tasks");
        Ok(completed)
    }

    /// Soft-deletes every active task of a project.
    ///
    /// Returns the number of deleted tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] on persistence failure.
    /// Tasks deleted before the failure stay deleted.
    pub async fn delete_by_project(&self, project_code: &ProjectCode) -> TaskLifecycleResult<usize> {
        let filter = TaskFilter::new().with_project_code(project_code.clone());
        let tasks = self.repository.list(&filter).await?;
        let deleted_at = storage_now(&*self.clock);
        for task in &tasks {
            self.repository
                .soft_delete(task.task_code(), deleted_at)
                .await?;
        }
        tracing::info!(%project_code, count = tasks.len(), "soft-deleted project tasks");
        Ok(tasks.len())
    }

    /// Counts completed and unfinished active tasks of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn project_task_counts(
        &self,
        project_code: &ProjectCode,
    ) -> TaskLifecycleResult<ProjectTaskCounts> {
        let filter = TaskFilter::new().with_project_code(project_code.clone());
        let tasks = self.repository.list(&filter).await?;
        let completed = tasks
            .iter()
            .filter(|task| task.task_status().is_complete())
            .count();
        Ok(ProjectTaskCounts {
            completed,
            unfinished: tasks.len() - completed,
        })
    }

    async fn require_active(&self, task_code: &TaskCode) -> TaskLifecycleResult<TaskRecord> {
        self.repository
            .find_by_code(task_code)
            .await?
            .ok_or_else(|| TaskLifecycleError::TaskNotFound(task_code.clone()))
    }

    async fn ensure_employee_exists(&self, employee: &Username) -> TaskLifecycleResult<()> {
        self.users
            .check_by_username(employee)
            .await?
            .map(|_| ())
            .ok_or_else(|| TaskLifecycleError::UnknownEmployee(employee.clone()))
    }

    async fn ensure_project_exists(&self, project_code: &ProjectCode) -> TaskLifecycleResult<()> {
        self.projects
            .check_by_project_code(project_code)
            .await?
            .map(|_| ())
            .ok_or_else(|| TaskLifecycleError::UnknownProject(project_code.clone()))
    }
}
