//! Port contracts for the remote user and project services.
//!
//! Every method is one read round trip. Absence is `Ok(None)`; only
//! transport and service failures are errors. Implementations do not cache
//! or retry.

use super::domain::{ManagerDetails, ProjectDetails, UserDetails};
use crate::task::domain::{ProjectCode, Username};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// User service contract.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Checks whether a user with the given username exists.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the request fails or the service answers
    /// with an unexpected status or body.
    async fn check_by_username(&self, username: &Username) -> LookupResult<Option<UserDetails>>;
}

/// Project service contract.
#[async_trait]
pub trait ProjectLookup: Send + Sync {
    /// Checks whether a project with the given code exists.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the request fails or the service answers
    /// with an unexpected status or body.
    async fn check_by_project_code(
        &self,
        project_code: &ProjectCode,
    ) -> LookupResult<Option<ProjectDetails>>;

    /// Fetches the manager assigned to a project.
    ///
    /// Returns `None` when the project does not exist or has no manager.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the request fails or the service answers
    /// with an unexpected status or body.
    async fn get_manager_by_project(
        &self,
        project_code: &ProjectCode,
    ) -> LookupResult<Option<ManagerDetails>>;
}

/// Remote service a lookup talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteService {
    /// The user service.
    User,
    /// The project service.
    Project,
}

impl RemoteService {
    /// Returns the service name used in logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user-service",
            Self::Project => "project-service",
        }
    }
}

impl fmt::Display for RemoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by lookup adapters.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The request did not complete: connection refused, timeout, reset.
    #[error("{service} request failed: {cause}")]
    Transport {
        /// Service that was called.
        service: RemoteService,
        /// Underlying transport error.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The service answered with a status other than success or not-found.
    #[error("{service} answered with status {status}: {message}")]
    UnexpectedStatus {
        /// Service that was called.
        service: RemoteService,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("{service} returned an unreadable body: {cause}")]
    Decode {
        /// Service that was called.
        service: RemoteService,
        /// Underlying decode error.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The configured endpoint is unusable.
    #[error("invalid endpoint for {service}: {reason}")]
    InvalidEndpoint {
        /// Service whose endpoint is invalid.
        service: RemoteService,
        /// Why the endpoint was rejected.
        reason: String,
    },
}

impl LookupError {
    /// Wraps a transport error.
    pub fn transport(
        service: RemoteService,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            service,
            cause: Arc::new(err),
        }
    }

    /// Wraps a decode error.
    pub fn decode(
        service: RemoteService,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Decode {
            service,
            cause: Arc::new(err),
        }
    }

    /// Returns the service the failed call targeted.
    #[must_use]
    pub const fn service(&self) -> RemoteService {
        match self {
            Self::Transport { service, .. }
            | Self::UnexpectedStatus { service, .. }
            | Self::Decode { service, .. }
            | Self::InvalidEndpoint { service, .. } => *service,
        }
    }
}
