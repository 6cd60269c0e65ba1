//! Task record entity.

use super::{ProjectCode, TaskCode, TaskId, TaskStatus, Username};
use crate::entity::EntityMetadata;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Business fields of a task, without identity or audit columns.
///
/// Also serves as the parameter object for creating and reconstructing
/// [`TaskRecord`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    /// Business identifier, unique among non-deleted tasks.
    pub task_code: TaskCode,
    /// Optional short subject line.
    pub task_subject: Option<String>,
    /// Optional free-text description.
    pub task_detail: Option<String>,
    /// Current progress status.
    pub task_status: TaskStatus,
    /// Calendar date the task was assigned.
    pub assigned_date: NaiveDate,
    /// Project the task belongs to.
    pub project_code: ProjectCode,
    /// Username of the employee doing the work.
    pub assigned_employee: Username,
    /// Username of the manager overseeing the work.
    pub assigned_manager: Username,
}

/// A persistent task.
///
/// The project, employee and manager references are opaque strings. Nothing
/// here checks that they exist; callers validate them through the lookup
/// clients before persisting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    metadata: EntityMetadata<TaskId>,
    fields: TaskFields,
}

impl TaskRecord {
    /// Creates a new, non-deleted task with a fresh identifier.
    #[must_use]
    pub fn new(fields: TaskFields, clock: &impl Clock) -> Self {
        Self {
            metadata: EntityMetadata::new(TaskId::new(), clock),
            fields: fields.normalized(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub const fn from_persisted(metadata: EntityMetadata<TaskId>, fields: TaskFields) -> Self {
        Self { metadata, fields }
    }

    /// Returns the internal identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.metadata.id()
    }

    /// Returns the shared base fields.
    #[must_use]
    pub const fn metadata(&self) -> &EntityMetadata<TaskId> {
        &self.metadata
    }

    /// Returns the business fields.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    /// Returns the task code.
    #[must_use]
    pub const fn task_code(&self) -> &TaskCode {
        &self.fields.task_code
    }

    /// Returns the subject, if any.
    #[must_use]
    pub fn task_subject(&self) -> Option<&str> {
        self.fields.task_subject.as_deref()
    }

    /// Returns the detail text, if any.
    #[must_use]
    pub fn task_detail(&self) -> Option<&str> {
        self.fields.task_detail.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn task_status(&self) -> TaskStatus {
        self.fields.task_status
    }

    /// Returns the assignment date.
    #[must_use]
    pub const fn assigned_date(&self) -> NaiveDate {
        self.fields.assigned_date
    }

    /// Returns the project code.
    #[must_use]
    pub const fn project_code(&self) -> &ProjectCode {
        &self.fields.project_code
    }

    /// Returns the assigned employee's username.
    #[must_use]
    pub const fn assigned_employee(&self) -> &Username {
        &self.fields.assigned_employee
    }

    /// Returns the assigned manager's username.
    #[must_use]
    pub const fn assigned_manager(&self) -> &Username {
        &self.fields.assigned_manager
    }

    /// Returns `true` when the record has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.metadata.is_deleted()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.metadata.created_at()
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.metadata.updated_at()
    }

    /// Sets the status. No transition rules are enforced.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.fields.task_status = status;
        self.metadata.touch(clock);
    }

    /// Replaces subject and detail. Blank text is stored as `None`.
    pub fn update_details(
        &mut self,
        subject: Option<String>,
        detail: Option<String>,
        clock: &impl Clock,
    ) {
        self.fields.task_subject = normalize_text(subject);
        self.fields.task_detail = normalize_text(detail);
        self.metadata.touch(clock);
    }

    /// Assigns the task to another employee.
    pub fn reassign_employee(&mut self, employee: Username, clock: &impl Clock) {
        self.fields.assigned_employee = employee;
        self.metadata.touch(clock);
    }

    /// Returns the record as soft-deleted at `deleted_at`.
    ///
    /// Reserved for repositories applying a soft delete.
    #[must_use]
    pub(crate) fn into_deleted(self, deleted_at: DateTime<Utc>) -> Self {
        Self {
            metadata: self.metadata.into_deleted(deleted_at),
            fields: self.fields,
        }
    }
}

impl TaskFields {
    fn normalized(self) -> Self {
        Self {
            task_subject: normalize_text(self.task_subject),
            task_detail: normalize_text(self.task_detail),
            ..self
        }
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
