//! Given steps for task classification BDD scenarios.

use super::world::{TaskClassificationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasksense::task::services::CreateTaskRequest;

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut TaskClassificationWorld, title: String) {
    world.pending_request = Some(CreateTaskRequest::new(title));
}

#[given(r#"the task description "{description}""#)]
fn task_description(
    world: &mut TaskClassificationWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    world.pending_request = Some(request.with_description(description));
    Ok(())
}

#[given(r#"a stored task titled "{title}""#)]
fn stored_task(world: &mut TaskClassificationWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTaskRequest::new(title)))
        .wrap_err("create task for scenario setup")?;
    world.last_task = Some(created);
    Ok(())
}
