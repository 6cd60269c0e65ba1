//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`TASK_SERVICE_*` prefix, `__` as separator)
//! 2. The TOML file named by `TASK_SERVICE_CONFIG`, or `task-service.toml`
//!    in the working directory
//! 3. Built-in defaults
//!
//! `TASK_SERVICE_PROJECT_SERVICE__BASE_URL` maps to `project_service.base_url`,
//! `TASK_SERVICE_LOGGING__FILTER` to `logging.filter`, and so on.

mod error;

pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "TASK_SERVICE_";

/// Environment variable naming an alternative TOML file.
pub const CONFIG_PATH_ENV: &str = "TASK_SERVICE_CONFIG";

/// TOML file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "task-service.toml";

/// Default base URL of the user service.
pub const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8081";

/// Default base URL of the project service.
pub const DEFAULT_PROJECT_SERVICE_URL: &str = "http://localhost:8082";

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskServiceConfig {
    /// Remote user service.
    #[serde(default = "RemoteServiceConfig::user_service")]
    pub user_service: RemoteServiceConfig,
    /// Remote project service.
    #[serde(default = "RemoteServiceConfig::project_service")]
    pub project_service: RemoteServiceConfig,
    /// Task database.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TaskServiceConfig {
    fn default() -> Self {
        Self {
            user_service: RemoteServiceConfig::user_service(),
            project_service: RemoteServiceConfig::project_service(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TaskServiceConfig {
    /// Loads and validates configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be read or
    /// extracted, or [`ConfigError::InvalidValue`] when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Extracts and validates configuration from an existing figment.
    ///
    /// # Errors
    ///
    /// Same as [`TaskServiceConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(Self::config_path()))
            .merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["config"]))
    }

    /// Checks values that deserialization alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unusable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.user_service.validate("user_service")?;
        self.project_service.validate("project_service")?;
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_owned(),
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }

    fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }
}

/// Connection settings for one remote lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteServiceConfig {
    /// Scheme, host and port of the service, without the API path.
    pub base_url: String,
    /// Request timeout. The HTTP client default applies when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RemoteServiceConfig {
    /// Creates settings for the given base URL with no explicit timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Sets the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Default user service settings.
    #[must_use]
    pub fn user_service() -> Self {
        Self::new(DEFAULT_USER_SERVICE_URL)
    }

    /// Default project service settings.
    #[must_use]
    pub fn project_service() -> Self {
        Self::new(DEFAULT_PROJECT_SERVICE_URL)
    }

    /// Returns the configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: format!("{section}.base_url"),
            reason,
        };
        let url = reqwest::Url::parse(&self.base_url).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: format!("{section}.timeout_secs"),
                reason: "must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}

/// Task database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Maximum pooled connections.
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    const fn default_max_connections() -> u32 {
        10
    }

    /// Returns `true` when a connection URL is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: Self::default_max_connections(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives. `RUST_LOG` takes precedence when set.
    #[serde(default = "LoggingConfig::default_filter")]
    pub filter: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    fn default_filter() -> String {
        "info".to_owned()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
            format: LogFormat::default(),
        }
    }
}
