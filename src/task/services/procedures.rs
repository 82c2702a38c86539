//! Store-side task procedures.
//!
//! Each procedure runs inside a single unit of work against a
//! [`TaskSession`] and stops at the first failed precondition. Pre-checks for
//! title uniqueness give precise errors; the store's unique index still
//! guards the window between check and write.

use super::{TaskRuleError, TaskRuleResult};
use crate::task::{
    domain::{NewTask, Task, TaskDraft, TaskFilter, TaskId, TaskOwner, TaskStatus},
    ports::TaskSession,
};
use mockable::Clock;

/// Checks that the account exists and that the user belongs to it.
pub(super) fn ensure_owner(session: &mut dyn TaskSession, owner: TaskOwner) -> TaskRuleResult<()> {
    if !session.account_exists(owner.account())? {
        return Err(TaskRuleError::AccountDoesntExist(owner.account()));
    }
    match session.user_account(owner.user())? {
        Some(account) if account == owner.account() => Ok(()),
        _ => Err(TaskRuleError::UserDoesntExist {
            user: owner.user(),
            account: owner.account(),
        }),
    }
}

fn require_task(
    session: &mut dyn TaskSession,
    owner: TaskOwner,
    id: TaskId,
) -> TaskRuleResult<Task> {
    session
        .find_active(owner, id)?
        .ok_or(TaskRuleError::TaskDoesntExist(id))
}

fn ensure_title_free(
    session: &mut dyn TaskSession,
    owner: TaskOwner,
    draft: &TaskDraft,
    excluding: Option<TaskId>,
) -> TaskRuleResult<()> {
    if session.title_in_use(owner, &draft.title, excluding)? {
        return Err(TaskRuleError::TitleAlreadyExists {
            owner,
            title: draft.title.clone(),
        });
    }
    Ok(())
}

pub(super) fn create_task(session: &mut dyn TaskSession, task: &NewTask) -> TaskRuleResult<TaskId> {
    ensure_owner(session, task.owner())?;
    ensure_title_free(session, task.owner(), task.draft(), None)?;
    Ok(session.insert(task)?)
}

pub(super) fn list_tasks(
    session: &mut dyn TaskSession,
    owner: TaskOwner,
    filter: TaskFilter,
) -> TaskRuleResult<Vec<Task>> {
    ensure_owner(session, owner)?;
    Ok(session.list_active(owner, filter)?)
}

pub(super) fn get_task(
    session: &mut dyn TaskSession,
    owner: TaskOwner,
    id: TaskId,
) -> TaskRuleResult<Task> {
    ensure_owner(session, owner)?;
    require_task(session, owner, id)
}

pub(super) fn update_task(
    session: &mut dyn TaskSession,
    owner: TaskOwner,
    id: TaskId,
    draft: TaskDraft,
    status: TaskStatus,
    clock: &impl Clock,
) -> TaskRuleResult<TaskId> {
    ensure_owner(session, owner)?;
    let mut task = require_task(session, owner, id)?;
    ensure_title_free(session, owner, &draft, Some(id))?;
    task.replace(draft, status, clock);
    session.save(&task)?;
    Ok(id)
}

pub(super) fn delete_task(
    session: &mut dyn TaskSession,
    owner: TaskOwner,
    id: TaskId,
    clock: &impl Clock,
) -> TaskRuleResult<TaskId> {
    ensure_owner(session, owner)?;
    let mut task = require_task(session, owner, id)?;
    task.mark_deleted(clock);
    session.save(&task)?;
    Ok(id)
}
