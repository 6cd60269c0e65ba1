//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Business identifier.
    pub task_code: String,
    /// Optional subject line.
    pub task_subject: Option<String>,
    /// Optional description.
    pub task_detail: Option<String>,
    /// Status name.
    pub task_status: String,
    /// Assignment date.
    pub assigned_date: NaiveDate,
    /// Project reference.
    pub project_code: String,
    /// Assigned employee username.
    pub assigned_employee: String,
    /// Assigned manager username.
    pub assigned_manager: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Business identifier.
    pub task_code: String,
    /// Optional subject line.
    pub task_subject: Option<String>,
    /// Optional description.
    pub task_detail: Option<String>,
    /// Status name.
    pub task_status: String,
    /// Assignment date.
    pub assigned_date: NaiveDate,
    /// Project reference.
    pub project_code: String,
    /// Assigned employee username.
    pub assigned_employee: String,
    /// Assigned manager username.
    pub assigned_manager: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for mutable task columns.
///
/// `None` clears nullable columns instead of skipping them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Business identifier.
    pub task_code: String,
    /// Optional subject line.
    pub task_subject: Option<String>,
    /// Optional description.
    pub task_detail: Option<String>,
    /// Status name.
    pub task_status: String,
    /// Assignment date.
    pub assigned_date: NaiveDate,
    /// Project reference.
    pub project_code: String,
    /// Assigned employee username.
    pub assigned_employee: String,
    /// Assigned manager username.
    pub assigned_manager: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
