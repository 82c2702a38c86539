//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use taskd::task::{domain::TaskStatus, services::ListTasksRequest};

#[then("the request succeeds")]
fn request_succeeds(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {}: {err}", err.code())),
        None => Err(eyre::eyre!("missing request result")),
    }
}

#[then("a different task id is returned")]
fn request_succeeds_with_new_id(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let previous = world.current_task()?;
    match world.last_result.as_ref() {
        Some(Ok(id)) if *id != previous => Ok(()),
        Some(Ok(id)) => Err(eyre::eyre!("task id {id} was reused")),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {}: {err}", err.code())),
        None => Err(eyre::eyre!("missing request result")),
    }
}

#[then(r#"the request fails with "{code}""#)]
fn request_fails_with(world: &TaskLifecycleWorld, code: String) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) if err.code() == code => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected {code}, got {}", err.code())),
        Some(Ok(id)) => Err(eyre::eyre!("expected {code}, but task {id} was written")),
        None => Err(eyre::eyre!("missing request result")),
    }
}

#[then(r#"the task titled "{title}" is pending with priority {priority:i16}"#)]
fn task_is_pending_with_priority(
    world: &TaskLifecycleWorld,
    title: String,
    priority: i16,
) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let tasks = run_async(world.service.list_tasks(ListTasksRequest::new(owner)))?;
    let task = tasks
        .iter()
        .find(|task| task.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("no live task titled {title}"))?;

    eyre::ensure!(
        task.status() == TaskStatus::Pending,
        "expected pending, found {:?}",
        task.status()
    );
    eyre::ensure!(
        task.priority().code() == priority,
        "expected priority {priority}, found {}",
        task.priority().code()
    );
    eyre::ensure!(!task.is_deleted(), "listed task is flagged deleted");
    Ok(())
}
