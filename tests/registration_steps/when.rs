//! When steps for task registration BDD scenarios.

use super::world::{TaskRegistrationWorld, run_async};
use rstest_bdd_macros::when;
use task_service::task::services::RegisterTaskRequest;

#[when(r#"task "{code}" is registered for "{username}" on project "{project}""#)]
fn register_task(world: &mut TaskRegistrationWorld, code: String, username: String, project: String) {
    let request = RegisterTaskRequest::new(code, project, username).with_subject("Scenario task");
    world.last_register_result = Some(run_async(world.service.register(request)));
}
