//! Given steps for task registration BDD scenarios.

use super::world::{TaskRegistrationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use task_service::lookup::domain::{ManagerDetails, ProjectDetails, UserDetails};
use task_service::task::{
    domain::{ProjectCode, TaskCode, Username},
    services::RegisterTaskRequest,
};

#[given(r#"an employee "{username}" exists"#)]
fn employee_exists(world: &mut TaskRegistrationWorld, username: String) -> Result<(), eyre::Report> {
    let name = Username::new(username).wrap_err("construct employee username")?;
    world.users.insert(name.clone(), UserDetails::new(&name))?;
    Ok(())
}

#[given(r#"a project "{project}" managed by "{manager}""#)]
fn project_with_manager(
    world: &mut TaskRegistrationWorld,
    project: String,
    manager: String,
) -> Result<(), eyre::Report> {
    let code = ProjectCode::new(project).wrap_err("construct project code")?;
    let manager_name = Username::new(manager).wrap_err("construct manager username")?;
    world.projects.insert(
        code.clone(),
        ProjectDetails::new(&code),
        Some(ManagerDetails::new(manager_name)),
    )?;
    Ok(())
}

#[given(r#"a project "{project}" without a manager"#)]
fn project_without_manager(
    world: &mut TaskRegistrationWorld,
    project: String,
) -> Result<(), eyre::Report> {
    let code = ProjectCode::new(project).wrap_err("construct project code")?;
    world
        .projects
        .insert(code.clone(), ProjectDetails::new(&code), None)?;
    Ok(())
}

#[given(r#"task "{code}" has been registered for "{username}" on project "{project}""#)]
fn task_already_registered(
    world: &mut TaskRegistrationWorld,
    code: String,
    username: String,
    project: String,
) -> Result<(), eyre::Report> {
    run_async(
        world
            .service
            .register(RegisterTaskRequest::new(code, project, username)),
    )
    .wrap_err("register initial task")?;
    Ok(())
}

#[given(r#"task "{code}" has been deleted"#)]
fn task_deleted(world: &mut TaskRegistrationWorld, code: String) -> Result<(), eyre::Report> {
    let task_code = TaskCode::new(code).wrap_err("construct task code")?;
    run_async(world.service.delete(&task_code)).wrap_err("soft-delete task")?;
    Ok(())
}
