//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use taskd::task::{
    domain::{TaskOwner, UserId},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

#[when(r#"the owner creates a task titled "{title}" with priority {priority:i64}"#)]
fn owner_creates_task(
    world: &mut TaskLifecycleWorld,
    title: String,
    priority: i64,
) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let result = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(owner, title).with_priority(priority)),
    );
    world.last_result = Some(result);
    Ok(())
}

#[when("the owner deletes that task")]
fn owner_deletes_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.current_task()?;
    world.last_result = Some(run_async(world.service.delete_task(owner, id)));
    Ok(())
}

#[when("the owner sets that task's status to {status:i64}")]
fn owner_sets_status(world: &mut TaskLifecycleWorld, status: i64) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.current_task()?;
    let task = run_async(world.service.get_task(owner, id))?;
    let request = UpdateTaskRequest::new(
        owner,
        id,
        task.title().as_str(),
        i64::from(task.priority().code()),
        status,
    )
    .with_description(task.description().as_str());
    world.last_result = Some(run_async(world.service.update_task(request)));
    Ok(())
}

#[when("user {user:i64} reads that task")]
fn other_user_reads_task(world: &mut TaskLifecycleWorld, user: i64) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.current_task()?;
    let reader = TaskOwner::new(owner.account(), UserId::new(user));
    let result = run_async(world.service.get_task(reader, id)).map(|task| task.id());
    world.last_result = Some(result);
    Ok(())
}
