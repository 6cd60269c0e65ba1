//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an internal task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum identifier length in characters, matching the `VARCHAR(255)`
/// columns.
pub const MAX_IDENTIFIER_LEN: usize = 255;

/// Rules applied to a string identifier.
struct IdentifierRules {
    kind: &'static str,
    empty: TaskDomainError,
    path_segment: bool,
}

impl IdentifierRules {
    /// Trims `raw` and checks it against the rules.
    fn apply(self, raw: &str) -> Result<String, TaskDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(self.empty);
        }
        if self.path_segment && matches!(trimmed, "." | "..") {
            return Err(TaskDomainError::DotSegment {
                kind: self.kind,
                value: trimmed.to_owned(),
            });
        }
        let length = trimmed.chars().count();
        if length > MAX_IDENTIFIER_LEN {
            return Err(TaskDomainError::TooLong {
                kind: self.kind,
                max: MAX_IDENTIFIER_LEN,
                length,
            });
        }
        Ok(trimmed.to_owned())
    }
}

/// Business identifier of a task, unique among non-deleted tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCode(String);

impl TaskCode {
    /// Creates a validated task code.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskCode`] when the value is blank.
    /// Returns [`TaskDomainError::TooLong`] past [`MAX_IDENTIFIER_LEN`]
    /// characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        IdentifierRules {
            kind: "task code",
            empty: TaskDomainError::EmptyTaskCode,
            path_segment: false,
        }
        .apply(value.as_ref())
        .map(Self)
    }

    /// Returns the task code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External project identifier, resolved only through the project service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectCode(String);

impl ProjectCode {
    /// Creates a validated project code.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyProjectCode`] when the value is blank.
    /// Returns [`TaskDomainError::DotSegment`] for `.` or `..`, which cannot
    /// travel as a path segment, and [`TaskDomainError::TooLong`] past
    /// [`MAX_IDENTIFIER_LEN`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        IdentifierRules {
            kind: "project code",
            empty: TaskDomainError::EmptyProjectCode,
            path_segment: true,
        }
        .apply(value.as_ref())
        .map(Self)
    }

    /// Returns the project code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Username of an employee or manager, resolved through the user service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUsername`] when the value is blank.
    /// Returns [`TaskDomainError::DotSegment`] for `.` or `..`, which cannot
    /// travel as a path segment, and [`TaskDomainError::TooLong`] past
    /// [`MAX_IDENTIFIER_LEN`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        IdentifierRules {
            kind: "username",
            empty: TaskDomainError::EmptyUsername,
            path_segment: true,
        }
        .apply(value.as_ref())
        .map(Self)
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
