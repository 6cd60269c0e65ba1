//! In-memory user and project directories for tests and local runs.

use crate::lookup::{
    domain::{ManagerDetails, ProjectDetails, UserDetails},
    ports::{LookupError, LookupResult, ProjectLookup, RemoteService, UserLookup},
};
use crate::task::domain::{ProjectCode, Username};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

fn unavailable(service: RemoteService) -> LookupError {
    LookupError::transport(
        service,
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "service unavailable"),
    )
}

fn poisoned(service: RemoteService, err: impl ToString) -> LookupError {
    LookupError::transport(service, std::io::Error::other(err.to_string()))
}

/// User directory backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<Username, UserDetails>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Transport`] if the directory lock is poisoned.
    pub fn insert(&self, username: Username, details: UserDetails) -> LookupResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|err| poisoned(RemoteService::User, err))?;
        users.insert(username, details);
        Ok(())
    }

    /// Makes every subsequent call fail with a transport error, or recover.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserLookup for InMemoryUserDirectory {
    async fn check_by_username(&self, username: &Username) -> LookupResult<Option<UserDetails>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable(RemoteService::User));
        }
        let users = self
            .users
            .read()
            .map_err(|err| poisoned(RemoteService::User, err))?;
        Ok(users.get(username).cloned())
    }
}

#[derive(Debug, Clone)]
struct ProjectEntry {
    details: ProjectDetails,
    manager: Option<ManagerDetails>,
}

/// Project directory backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectDirectory {
    projects: Arc<RwLock<HashMap<ProjectCode, ProjectEntry>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project with an optional manager.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Transport`] if the directory lock is poisoned.
    pub fn insert(
        &self,
        project_code: ProjectCode,
        details: ProjectDetails,
        manager: Option<ManagerDetails>,
    ) -> LookupResult<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|err| poisoned(RemoteService::Project, err))?;
        projects.insert(project_code, ProjectEntry { details, manager });
        Ok(())
    }

    /// Makes every subsequent call fail with a transport error, or recover.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn entry(&self, project_code: &ProjectCode) -> LookupResult<Option<ProjectEntry>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable(RemoteService::Project));
        }
        let projects = self
            .projects
            .read()
            .map_err(|err| poisoned(RemoteService::Project, err))?;
        Ok(projects.get(project_code).cloned())
    }
}

#[async_trait]
impl ProjectLookup for InMemoryProjectDirectory {
    async fn check_by_project_code(
        &self,
        project_code: &ProjectCode,
    ) -> LookupResult<Option<ProjectDetails>> {
        Ok(self.entry(project_code)?.map(|entry| entry.details))
    }

    async fn get_manager_by_project(
        &self,
        project_code: &ProjectCode,
    ) -> LookupResult<Option<ManagerDetails>> {
        Ok(self.entry(project_code)?.and_then(|entry| entry.manager))
    }
}
