//! In-memory integration tests for the task lifecycle service.

use crate::test_helpers::InMemoryHarness;
use eyre::WrapErr;
use rstest::{fixture, rstest};
use task_service::task::{
    domain::{ProjectCode, TaskCode, TaskStatus, Username},
    ports::{TaskFilter, TaskRepositoryError, Visibility},
    services::{RegisterTaskRequest, TaskLifecycleError},
};

#[fixture]
fn harness() -> InMemoryHarness {
    let harness = InMemoryHarness::new();
    harness.add_employee("jdoe").expect("seed employee");
    harness.add_employee("alee").expect("seed employee");
    harness
        .add_project("PRJ-1", Some("msmith"))
        .expect("seed project");
    harness
        .add_project("PRJ-2", None)
        .expect("seed project without manager");
    harness
}

fn register(code: &str) -> RegisterTaskRequest {
    RegisterTaskRequest::new(code, "PRJ-1", "jdoe").with_subject("Write report")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_task_is_listed_for_employee(
    harness: InMemoryHarness,
) -> Result<(), eyre::Report> {
    let created = harness
        .service
        .register(register("TSK-100"))
        .await
        .wrap_err("register task")?;

    let for_employee = harness
        .service
        .list(&TaskFilter::new().with_assigned_employee(Username::new("jdoe")?))
        .await?;
    let for_manager = harness
        .service
        .list(&TaskFilter::new().with_assigned_manager(Username::new("msmith")?))
        .await?;

    eyre::ensure!(for_employee == vec![created.clone()], "employee listing mismatch");
    eyre::ensure!(for_manager == vec![created], "manager listing mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_without_manager_cannot_take_tasks(
    harness: InMemoryHarness,
) -> Result<(), eyre::Report> {
    let result = harness
        .service
        .register(RegisterTaskRequest::new("TSK-200", "PRJ-2", "jdoe"))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskLifecycleError::ManagerNotAssigned(_))),
        "expected missing manager error, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_code_can_be_registered_again(
    harness: InMemoryHarness,
) -> Result<(), eyre::Report> {
    let code = TaskCode::new("TSK-100")?;
    let first = harness.service.register(register("TSK-100")).await?;

    let duplicate = harness.service.register(register("TSK-100")).await;
    eyre::ensure!(
        matches!(
            duplicate,
            Err(TaskLifecycleError::Repository(
                TaskRepositoryError::DuplicateTaskCode(_)
            ))
        ),
        "expected duplicate code error, got {duplicate:?}"
    );

    harness.service.delete(&code).await?;
    let second = harness.service.register(register("TSK-100")).await?;

    let active = harness
        .service
        .find_by_code(&code)
        .await?
        .ok_or_else(|| eyre::eyre!("replacement task missing"))?;
    let history = harness
        .service
        .list(
            &TaskFilter::new()
                .with_task_code(code)
                .with_visibility(Visibility::IncludeDeleted),
        )
        .await?;

    eyre::ensure!(active.id() == second.id(), "active task should be the replacement");
    eyre::ensure!(history.len() == 2, "expected both records in history");
    eyre::ensure!(
        history.iter().any(|task| task.id() == first.id() && task.is_deleted()),
        "original record should be retained as deleted"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_cycle_and_reassignment(harness: InMemoryHarness) -> Result<(), eyre::Report> {
    let code = TaskCode::new("TSK-100")?;
    harness.service.register(register("TSK-100")).await?;

    for status in [
        TaskStatus::InProgress,
        TaskStatus::UatTest,
        TaskStatus::Complete,
        TaskStatus::Open,
    ] {
        let updated = harness.service.update_status(&code, status).await?;
        eyre::ensure!(updated.task_status() == status, "status not applied");
    }
    let moved = harness
        .service
        .reassign_employee(&code, Username::new("alee")?)
        .await?;

    eyre::ensure!(moved.assigned_employee().as_str() == "alee", "reassignment lost");
    eyre::ensure!(moved.updated_at() >= moved.created_at(), "timestamps out of order");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_counts_follow_bulk_operations(
    harness: InMemoryHarness,
) -> Result<(), eyre::Report> {
    let project = ProjectCode::new("PRJ-1")?;
    for code in ["TSK-1", "TSK-2"] {
        harness.service.register(register(code)).await?;
    }

    harness.service.complete_by_project(&project).await?;
    let counts = harness.service.project_task_counts(&project).await?;
    eyre::ensure!(counts.completed == 2 && counts.unfinished == 0, "unexpected counts");

    let deleted = harness.service.delete_by_project(&project).await?;
    let remaining = harness
        .service
        .list(&TaskFilter::new().with_project_code(project))
        .await?;
    eyre::ensure!(deleted == 2, "expected two deletions");
    eyre::ensure!(remaining.is_empty(), "deleted tasks should be hidden");
    Ok(())
}
