//! Unit tests for the task module.


use crate::task::domain::{ProjectCode, TaskCode, TaskFields, TaskStatus, Username};
use chrono::NaiveDate;

/// Builds valid task fields for `code` in project `PRJ-1`.
pub(super) fn sample_fields(code: &str) -> TaskFields {
    TaskFields {
        task_code: TaskCode::new(code).expect("valid task code"),
        task_subject: Some("Write report".to_owned()),
        task_detail: None,
        task_status: TaskStatus::Open,
        assigned_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
        project_code: ProjectCode::new("PRJ-1").expect("valid project code"),
        assigned_employee: Username::new("jdoe").expect("valid username"),
        assigned_manager: Username::new("msmith").expect("valid username"),
    }
}
