//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::OnceLock;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use task_service::config::DatabaseConfig;
use task_service::task::adapters::postgres::PostgresTaskRepository;
use uuid::Uuid;

/// Environment variable holding the test database URL.
pub const DATABASE_URL_ENV: &str = "TASK_SERVICE_TEST_DATABASE_URL";

/// SQL creating the `tasks` table and its indexes.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2024-01-01-000000_create_tasks/up.sql");

static SCHEMA: OnceLock<Result<(), String>> = OnceLock::new();

/// Returns the configured test database URL, if any.
#[must_use]
pub fn database_url() -> Option<String> {
    std::env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

fn apply_schema(url: &str) -> Result<(), String> {
    let mut connection = PgConnection::establish(url).map_err(|err| err.to_string())?;
    connection
        .batch_execute(CREATE_TASKS_SQL)
        .map_err(|err| err.to_string())
}

/// Connects a repository to the configured test database.
///
/// # Errors
///
/// Fails when `TASK_SERVICE_TEST_DATABASE_URL` is unset, the schema cannot be
/// applied or the pool cannot connect.
pub fn repository() -> Result<PostgresTaskRepository, eyre::Report> {
    repository_from(database_url())
}

/// Connects a repository to `url`, applying the schema once per process.
///
/// # Errors
///
/// Fails when `url` is `None`, the schema cannot be applied or the pool
/// cannot connect.
pub fn repository_from(url: Option<String>) -> Result<PostgresTaskRepository, eyre::Report> {
    let url = url.ok_or_else(|| {
        eyre::eyre!("{DATABASE_URL_ENV} must name a PostgreSQL database for these tests")
    })?;
    SCHEMA
        .get_or_init(|| apply_schema(&url))
        .clone()
        .map_err(|err| eyre::eyre!("apply task schema: {err}"))?;

    let config = DatabaseConfig {
        url: Some(url),
        max_connections: 2,
    };
    Ok(PostgresTaskRepository::connect(&config)?)
}

/// Returns `prefix` with a unique suffix.
#[must_use]
pub fn unique_code(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
