//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task code is empty after trimming.
    #[error("task code must not be empty")]
    EmptyTaskCode,

    /// The project code is empty after trimming.
    #[error("project code must not be empty")]
    EmptyProjectCode,

    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The value is `.` or `..`, which a URL path resolves as a dot segment.
    #[error("{kind} must not be a dot segment, got '{value}'")]
    DotSegment {
        /// Identifier kind, such as `username`.
        kind: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The value is longer than the storage column allows.
    #[error("{kind} must be at most {max} characters, got {length}")]
    TooLong {
        /// Identifier kind, such as `task code`.
        kind: &'static str,
        /// Maximum length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        length: usize,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
