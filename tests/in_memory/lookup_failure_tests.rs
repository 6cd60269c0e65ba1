//! Lifecycle behaviour when a lookup service cannot be reached.

use crate::test_helpers::InMemoryHarness;
use rstest::rstest;
use task_service::lookup::{LookupError, RemoteService};
use task_service::task::{
    ports::{TaskFilter, Visibility},
    services::{RegisterTaskRequest, TaskLifecycleError},
};

#[rstest]
#[case(RemoteService::User)]
#[case(RemoteService::Project)]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_service_blocks_registration(
    #[case] down: RemoteService,
) -> Result<(), eyre::Report> {
    let harness = InMemoryHarness::new();
    harness.add_employee("jdoe")?;
    harness.add_project("PRJ-1", Some("msmith"))?;
    match down {
        RemoteService::User => harness.users.set_unavailable(true),
        RemoteService::Project => harness.projects.set_unavailable(true),
    }

    let result = harness
        .service
        .register(RegisterTaskRequest::new("TSK-100", "PRJ-1", "jdoe"))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Lookup(LookupError::Transport { service, .. })) if service == down
        ),
        "expected transport failure from {down}, got {result:?}"
    );
    let stored = harness
        .service
        .list(&TaskFilter::new().with_visibility(Visibility::IncludeDeleted))
        .await?;
    eyre::ensure!(stored.is_empty(), "nothing should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registration_succeeds_after_recovery() -> Result<(), eyre::Report> {
    let harness = InMemoryHarness::new();
    harness.add_employee("jdoe")?;
    harness.add_project("PRJ-1", Some("msmith"))?;
    harness.users.set_unavailable(true);
    let failed = harness
        .service
        .register(RegisterTaskRequest::new("TSK-100", "PRJ-1", "jdoe"))
        .await;
    eyre::ensure!(failed.is_err(), "registration should fail while unavailable");

    harness.users.set_unavailable(false);
    harness
        .service
        .register(RegisterTaskRequest::new("TSK-100", "PRJ-1", "jdoe"))
        .await?;
    Ok(())
}
