//! Then steps for task registration BDD scenarios.

use super::world::{TaskRegistrationWorld, run_async};
use rstest_bdd_macros::then;
use task_service::task::{
    domain::{TaskCode, TaskDomainError, TaskRecord, TaskStatus},
    ports::{TaskFilter, TaskRepositoryError},
    services::TaskLifecycleError,
};

fn registered_task(world: &TaskRegistrationWorld) -> Result<&TaskRecord, eyre::Report> {
    let result = world
        .last_register_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing registration result in scenario world"))?;
    result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected registration failure: {err}"))
}

fn registration_error(world: &TaskRegistrationWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    let result = world
        .last_register_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing registration result in scenario world"))?;
    match result {
        Ok(task) => Err(eyre::eyre!(
            "expected registration to fail, but task {} was stored",
            task.task_code()
        )),
        Err(err) => Ok(err),
    }
}

#[then(r#"the task is registered with status "{status}""#)]
fn task_registered_with_status(
    world: &TaskRegistrationWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let expected_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = registered_task(world)?;
    if task.task_status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected_status.as_str(),
            task.task_status().as_str()
        ));
    }
    if task.created_at() != task.updated_at() {
        return Err(eyre::eyre!(
            "expected created_at and updated_at timestamps to match at registration"
        ));
    }
    Ok(())
}

#[then(r#"the task manager is "{manager}""#)]
fn task_manager_is(world: &TaskRegistrationWorld, manager: String) -> Result<(), eyre::Report> {
    let task = registered_task(world)?;
    if task.assigned_manager().as_str() != manager {
        return Err(eyre::eyre!(
            "expected manager {manager}, found {}",
            task.assigned_manager()
        ));
    }
    Ok(())
}

#[then("registration fails because the employee is unknown")]
fn unknown_employee_error(world: &TaskRegistrationWorld) -> Result<(), eyre::Report> {
    let err = registration_error(world)?;
    if !matches!(err, TaskLifecycleError::UnknownEmployee(_)) {
        return Err(eyre::eyre!("expected unknown employee error, got {err:?}"));
    }
    Ok(())
}

#[then("registration fails because the employee name is invalid")]
fn invalid_employee_error(world: &TaskRegistrationWorld) -> Result<(), eyre::Report> {
    let err = registration_error(world)?;
    if !matches!(
        err,
        TaskLifecycleError::Domain(TaskDomainError::DotSegment { .. })
    ) {
        return Err(eyre::eyre!("expected invalid employee name error, got {err:?}"));
    }
    Ok(())
}

#[then("registration fails because the project has no manager")]
fn manager_not_assigned_error(world: &TaskRegistrationWorld) -> Result<(), eyre::Report> {
    let err = registration_error(world)?;
    if !matches!(err, TaskLifecycleError::ManagerNotAssigned(_)) {
        return Err(eyre::eyre!("expected missing manager error, got {err:?}"));
    }
    Ok(())
}

#[then("registration fails with a duplicate task code error")]
fn duplicate_code_error(world: &TaskRegistrationWorld) -> Result<(), eyre::Report> {
    let err = registration_error(world)?;
    if !matches!(
        err,
        TaskLifecycleError::Repository(TaskRepositoryError::DuplicateTaskCode(_))
    ) {
        return Err(eyre::eyre!("expected duplicate task code error, got {err:?}"));
    }
    Ok(())
}

#[then(r#"exactly one active task has code "{code}""#)]
fn one_active_task_with_code(world: &TaskRegistrationWorld, code: String) -> Result<(), eyre::Report> {
    let task_code = TaskCode::new(code.as_str())?;
    let active = run_async(
        world
            .service
            .list(&TaskFilter::new().with_task_code(task_code)),
    )
    .map_err(|err| eyre::eyre!("list failed: {err}"))?;
    if active.len() != 1 {
        return Err(eyre::eyre!(
            "expected one active task with code {code}, found {}",
            active.len()
        ));
    }
    Ok(())
}
