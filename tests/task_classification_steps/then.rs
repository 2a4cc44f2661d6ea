//! Then steps for task classification BDD scenarios.

use super::world::{TaskClassificationWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use tasksense::task::domain::{TaskCategory, TaskPriority, TaskStatus};

#[then(r#"the task category is "{category}""#)]
fn task_category_is(world: &TaskClassificationWorld, category: String) -> Result<(), eyre::Report> {
    let expected = TaskCategory::try_from(category.as_str())
        .map_err(|err| eyre::eyre!("invalid expected category in scenario: {err}"))?;
    let actual = world.task()?.category();
    if actual != expected {
        return Err(eyre::eyre!("expected category {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the task priority is "{priority}""#)]
fn task_priority_is(world: &TaskClassificationWorld, priority: String) -> Result<(), eyre::Report> {
    let expected = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid expected priority in scenario: {err}"))?;
    let actual = world.task()?.priority();
    if actual != expected {
        return Err(eyre::eyre!("expected priority {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskClassificationWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.task()?.status();
    if actual != expected {
        return Err(eyre::eyre!("expected status {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the task title is "{title}""#)]
fn task_title_is(world: &TaskClassificationWorld, title: String) -> Result<(), eyre::Report> {
    let actual = world.task()?.title();
    if actual != title {
        return Err(eyre::eyre!("expected title {title:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the extracted people include "{person}""#)]
fn extracted_people_include(
    world: &TaskClassificationWorld,
    person: String,
) -> Result<(), eyre::Report> {
    let people = &world.task()?.extracted_entities().people;
    if !people.contains(&person) {
        return Err(eyre::eyre!("expected {person:?} among people {people:?}"));
    }
    Ok(())
}

#[then(r#"the first suggested action is "{action}""#)]
fn first_suggested_action(
    world: &TaskClassificationWorld,
    action: String,
) -> Result<(), eyre::Report> {
    let first = world.task()?.suggested_actions().first();
    if first != Some(&action) {
        return Err(eyre::eyre!("expected first action {action:?}, found {first:?}"));
    }
    Ok(())
}

#[then("the task history has {count:usize} entry")]
fn task_history_count(world: &TaskClassificationWorld, count: usize) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    let fetched = run_async(world.service.get_by_id(id)).wrap_err("fetch task history")?;
    if fetched.history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history entries, found {}",
            fetched.history.len()
        ));
    }
    Ok(())
}

#[then("the operation fails with not found")]
fn operation_fails_with_not_found(world: &TaskClassificationWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(err) if err.is_not_found() => Ok(()),
        other => Err(eyre::eyre!("expected not-found error, got {other:?}")),
    }
}
