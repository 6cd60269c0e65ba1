//! Payloads returned by the user and project services.

use crate::task::domain::{ProjectCode, Username};
use serde::{Deserialize, Serialize};

/// Response envelope shared by the remote services.
///
/// `success: false` or a missing `data` member both mean the looked-up
/// entity is absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceResponse<T> {
    /// Outcome flag set by the remote service.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Optional status code echoed in the body.
    #[serde(default)]
    pub code: Option<u16>,
    /// Payload, when present.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

const fn default_success() -> bool {
    true
}

impl<T> ServiceResponse<T> {
    /// Wraps a payload in a successful envelope.
    #[must_use]
    pub const fn found(data: T) -> Self {
        Self {
            success: true,
            message: None,
            code: Some(200),
            data: Some(data),
        }
    }

    /// Returns the payload when the envelope reports a present entity.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// User as reported by the user service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    /// Login name.
    #[serde(alias = "username")]
    pub user_name: String,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Whether the account is active.
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl UserDetails {
    /// Creates details carrying only a username.
    #[must_use]
    pub fn new(username: &Username) -> Self {
        Self {
            user_name: username.as_str().to_owned(),
            first_name: None,
            last_name: None,
            enabled: None,
        }
    }

    /// Sets first and last name.
    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }
}

/// Project as reported by the project service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    /// Project code.
    pub project_code: String,
    /// Display name.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Project status as the project service names it.
    #[serde(default)]
    pub project_status: Option<String>,
}

impl ProjectDetails {
    /// Creates details carrying only a project code.
    #[must_use]
    pub fn new(project_code: &ProjectCode) -> Self {
        Self {
            project_code: project_code.as_str().to_owned(),
            project_name: None,
            project_status: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }
}

/// Manager assigned to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerDetails {
    /// Manager's username.
    pub username: Username,
    /// Given name, when the service sends a full user record.
    pub first_name: Option<String>,
    /// Family name, when the service sends a full user record.
    pub last_name: Option<String>,
}

impl ManagerDetails {
    /// Creates details carrying only a username.
    #[must_use]
    pub const fn new(username: Username) -> Self {
        Self {
            username,
            first_name: None,
            last_name: None,
        }
    }
}

/// Wire form of the manager payload: a bare username or a user record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ManagerPayload {
    Username(String),
    User(UserDetails),
}

impl ManagerPayload {
    /// Converts to domain details. A blank username means no manager.
    pub(crate) fn into_details(self) -> Option<ManagerDetails> {
        match self {
            Self::Username(name) => Username::new(name).ok().map(ManagerDetails::new),
            Self::User(user) => Username::new(&user.user_name).ok().map(|username| {
                ManagerDetails {
                    username,
                    first_name: user.first_name,
                    last_name: user.last_name,
                }
            }),
        }
    }
}
