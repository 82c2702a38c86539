//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskd::task::{
    domain::{AccountId, TaskOwner, UserId},
    services::CreateTaskRequest,
};

#[given("a registered owner with account {account:i64} and user {user:i64}")]
fn registered_owner(
    world: &mut TaskLifecycleWorld,
    account: i64,
    user: i64,
) -> Result<(), eyre::Report> {
    let owner = TaskOwner::new(AccountId::new(account), UserId::new(user));
    world
        .store
        .register_owner(owner)
        .wrap_err("register scenario owner")?;
    world.owner = Some(owner);
    Ok(())
}

#[given("another user {user:i64} in account {account:i64}")]
fn another_user(world: &mut TaskLifecycleWorld, user: i64, account: i64) -> Result<(), eyre::Report> {
    world
        .store
        .register_user(UserId::new(user), AccountId::new(account))
        .wrap_err("register second scenario user")?;
    Ok(())
}

#[given(r#"the owner has a task titled "{title}""#)]
fn owner_has_task(world: &mut TaskLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(owner, title)),
    )
    .wrap_err("create task in scenario setup")?;
    world.current_task = Some(id);
    Ok(())
}

#[given("that task has been deleted")]
fn task_has_been_deleted(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let owner = world.owner()?;
    let id = world.current_task()?;
    run_async(world.service.delete_task(owner, id)).wrap_err("delete task in scenario setup")?;
    Ok(())
}
