//! Checks one reference against the user or project service.
//!
//! Usage:
//!
//! ```text
//! task_refcheck <user|project|manager> <value>
//! ```
//!
//! `user` checks a username, `project` checks a project code and `manager`
//! resolves the manager of a project. Service endpoints and logging come from
//! the usual configuration layers (`task-service.toml`, then
//! `TASK_SERVICE_*` environment variables). The process exits with a failure
//! status when the reference does not resolve or the lookup fails.

use std::env;
use std::process::ExitCode;

use task_service::config::{ConfigError, TaskServiceConfig};
use task_service::lookup::adapters::{HttpProjectLookup, HttpUserLookup};
use task_service::lookup::{LookupError, ProjectLookup, UserLookup};
use task_service::task::domain::{ProjectCode, TaskDomainError, Username};
use task_service::telemetry::{self, TelemetryError};
use thiserror::Error;
use tokio::runtime::Builder;

/// Errors that stop a reference check.
#[derive(Debug, Error)]
enum RefcheckError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    User,
    Project,
    Manager,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, RefcheckError> {
        match arg {
            "user" => Ok(Self::User),
            "project" => Ok(Self::Project),
            "manager" => Ok(Self::Manager),
            other => Err(RefcheckError::InvalidArgs(format!(
                "unknown operation '{other}'; expected user, project, or manager"
            ))),
        }
    }
}

fn main() -> ExitCode {
    match run(env::args()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(error = %err, "reference check failed");
            if matches!(
                err,
                RefcheckError::InvalidArgs(_) | RefcheckError::Config(_) | RefcheckError::Telemetry(_)
            ) {
                report_before_logging(&err);
            }
            ExitCode::from(2)
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "errors raised before the subscriber is installed have no other sink"
)]
fn report_before_logging(err: &RefcheckError) {
    eprintln!("task_refcheck: {err}");
}

fn run(args: impl Iterator<Item = String>) -> Result<bool, RefcheckError> {
    let (operation, value) = parse_args(args)?;
    let config = TaskServiceConfig::load()?;
    telemetry::init(&config.logging)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(RefcheckError::RuntimeInit)?;
    runtime.block_on(check(operation, &value, &config))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Operation, String), RefcheckError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| RefcheckError::InvalidArgs("missing operation argument".into()))
        .and_then(|arg| Operation::parse(&arg))?;
    let value = args
        .next()
        .ok_or_else(|| RefcheckError::InvalidArgs("missing value argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(RefcheckError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    Ok((operation, value))
}

async fn check(
    operation: Operation,
    value: &str,
    config: &TaskServiceConfig,
) -> Result<bool, RefcheckError> {
    let found = match operation {
        Operation::User => {
            let username = Username::new(value)?;
            let lookup = HttpUserLookup::from_config(&config.user_service)?;
            lookup.check_by_username(&username).await?.is_some()
        }
        Operation::Project => {
            let project_code = ProjectCode::new(value)?;
            let lookup = HttpProjectLookup::from_config(&config.project_service)?;
            lookup.check_by_project_code(&project_code).await?.is_some()
        }
        Operation::Manager => {
            let project_code = ProjectCode::new(value)?;
            let lookup = HttpProjectLookup::from_config(&config.project_service)?;
            let manager = lookup.get_manager_by_project(&project_code).await?;
            if let Some(details) = &manager {
                tracing::info!(%project_code, manager = %details.username, "manager resolved");
            }
            manager.is_some()
        }
    };

    if found {
        tracing::info!(?operation, value, "reference resolved");
    } else {
        tracing::warn!(?operation, value, "reference not found");
    }
    Ok(found)
}
