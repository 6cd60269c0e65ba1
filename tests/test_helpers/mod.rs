//! Fixtures shared across integration test crates.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use task_service::lookup::{
    adapters::{InMemoryProjectDirectory, InMemoryUserDirectory},
    domain::{ManagerDetails, ProjectDetails, UserDetails},
};
use task_service::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ProjectCode, TaskCode, TaskFields, TaskStatus, Username},
    services::TaskLifecycleService,
};

/// Service wired to in-memory adapters.
pub type InMemoryService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryUserDirectory,
    InMemoryProjectDirectory,
    DefaultClock,
>;

/// In-memory service plus handles on its directories.
pub struct InMemoryHarness {
    /// Service under test.
    pub service: InMemoryService,
    /// User directory backing the service.
    pub users: InMemoryUserDirectory,
    /// Project directory backing the service.
    pub projects: InMemoryProjectDirectory,
}

impl InMemoryHarness {
    /// Creates a harness with empty directories.
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
        }
    }

    /// Registers a known employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is blank.
    pub fn add_employee(&self, name: &str) -> Result<(), eyre::Report> {
        let username = Username::new(name)?;
        self.users
            .insert(username.clone(), UserDetails::new(&username))?;
        Ok(())
    }

    /// Registers a project and optionally its manager.
    ///
    /// # Errors
    ///
    /// Returns an error if a code or username is blank.
    pub fn add_project(&self, code: &str, manager: Option<&str>) -> Result<(), eyre::Report> {
        let project_code = ProjectCode::new(code)?;
        let manager_details = manager
            .map(Username::new)
            .transpose()?
            .map(ManagerDetails::new);
        self.projects.insert(
            project_code.clone(),
            ProjectDetails::new(&project_code),
            manager_details,
        )?;
        Ok(())
    }
}

impl Default for InMemoryHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds task fields for `code` in `project`.
///
/// # Errors
///
/// Returns an error if any identifier is blank.
pub fn task_fields(code: &str, project: &str) -> Result<TaskFields, eyre::Report> {
    Ok(TaskFields {
        task_code: TaskCode::new(code)?,
        task_subject: Some("Write report".to_owned()),
        task_detail: Some("Quarterly figures".to_owned()),
        task_status: TaskStatus::Open,
        assigned_date: NaiveDate::from_ymd_opt(2024, 3, 1)
            .ok_or_else(|| eyre::eyre!("invalid assignment date"))?,
        project_code: ProjectCode::new(project)?,
        assigned_employee: Username::new("jdoe")?,
        assigned_manager: Username::new("msmith")?,
    })
}
