//! When steps for task classification BDD scenarios.

use super::world::{TaskClassificationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasksense::task::{
    domain::{TaskCategory, TaskId, TaskStatus},
    services::TaskChanges,
};

fn apply_changes(
    world: &mut TaskClassificationWorld,
    changes: TaskChanges,
) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    match run_async(world.service.update(id, changes)) {
        Ok(updated) => world.last_task = Some(updated),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when("the task is created")]
fn task_is_created(world: &mut TaskClassificationWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .take()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    let created = run_async(world.service.create(request)).wrap_err("create task")?;
    world.last_task = Some(created);
    Ok(())
}

#[when(r#"the task title is changed to "{title}""#)]
fn title_changed(world: &mut TaskClassificationWorld, title: String) -> Result<(), eyre::Report> {
    apply_changes(world, TaskChanges::new().with_title(title))
}

#[when(r#"the task category is pinned to "{category}" and the title changed to "{title}""#)]
fn title_changed_with_category(
    world: &mut TaskClassificationWorld,
    category: String,
    title: String,
) -> Result<(), eyre::Report> {
    let category = TaskCategory::try_from(category.as_str())
        .map_err(|err| eyre::eyre!("invalid category in scenario: {err}"))?;
    apply_changes(
        world,
        TaskChanges::new().with_title(title).with_category(category),
    )
}

#[when(r#"the task title is manually changed to "{title}""#)]
fn title_changed_with_override(
    world: &mut TaskClassificationWorld,
    title: String,
) -> Result<(), eyre::Report> {
    apply_changes(
        world,
        TaskChanges::new()
            .with_title(title)
            .with_manual_override(true),
    )
}

#[when(r#"the task status is changed to "{status}""#)]
fn status_changed(world: &mut TaskClassificationWorld, status: String) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    apply_changes(world, TaskChanges::new().with_status(status))
}

#[when(r#"an unknown task status is changed to "{status}""#)]
fn unknown_task_status_changed(
    world: &mut TaskClassificationWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let result = run_async(
        world
            .service
            .update(TaskId::new(), TaskChanges::new().with_status(status)),
    );
    if let Err(err) = result {
        world.last_error = Some(err);
    }
    Ok(())
}
