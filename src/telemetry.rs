//! Logging setup for binaries.

use crate::config::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter '{directives}': {reason}")]
    InvalidFilter {
        /// Directives as given.
        directives: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for unparsable directives and
/// [`TelemetryError::Install`] when a subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.filter)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| TelemetryError::Install(err.to_string()))
}

/// Builds the event filter. A non-empty `RUST_LOG` overrides `directives`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the effective directives do
/// not parse.
pub fn build_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    let effective = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| directives.to_owned());
    EnvFilter::try_new(&effective).map_err(|err| TelemetryError::InvalidFilter {
        directives: effective,
        reason: err.to_string(),
    })
}
