//! In-memory task store for tests and local runs.
//!
//! Mirrors the `PostgreSQL` constraints: live titles are unique per owner,
//! tasks must reference a consistent account and user, and soft-deleted rows
//! stay in storage but disappear from every query.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{
        AccountId, NewTask, Task, TaskFilter, TaskId, TaskOwner, TaskTitle, UserId, listing_order,
    },
    ports::{TaskSession, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Clone, Copy)]
struct UserRecord {
    account: AccountId,
    deleted: bool,
}

#[derive(Debug, Clone, Default)]
struct InMemoryTaskState {
    accounts: HashMap<AccountId, bool>,
    users: HashMap<UserId, UserRecord>,
    tasks: BTreeMap<TaskId, Task>,
    last_task_id: i64,
}

fn lock_error(err: &impl ToString) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a live account.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is poisoned.
    pub fn register_account(&self, account: AccountId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.accounts.insert(account, false);
        Ok(())
    }

    /// Registers a live user inside `account`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is poisoned.
    pub fn register_user(&self, user: UserId, account: AccountId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.users.insert(
            user,
            UserRecord {
                account,
                deleted: false,
            },
        );
        Ok(())
    }

    /// Registers both halves of an ownership key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is poisoned.
    pub fn register_owner(&self, owner: TaskOwner) -> TaskStoreResult<()> {
        self.register_account(owner.account())?;
        self.register_user(owner.user(), owner.account())
    }

    /// Soft-deletes an account so that it no longer counts as existing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is poisoned.
    pub fn deactivate_account(&self, account: AccountId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        if let Some(deleted) = state.accounts.get_mut(&account) {
            *deleted = true;
        }
        Ok(())
    }

    /// Returns the stored row for `id`, including soft-deleted rows.
    ///
    /// Intended for auditing; regular reads go through [`TaskStore`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is poisoned.
    pub fn audit_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    /// Returns the number of stored rows, including soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the state lock is poisoned.
    pub fn stored_row_count(&self) -> TaskStoreResult<usize> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.tasks.len())
    }
}

impl InMemoryTaskState {
    fn live_tasks_of(&self, owner: TaskOwner) -> impl Iterator<Item = &Task> {
        self.tasks
            .values()
            .filter(move |task| !task.is_deleted() && task.owner() == owner)
    }

    fn check_references(&self, owner: TaskOwner) -> TaskStoreResult<()> {
        let user_matches = self
            .users
            .get(&owner.user())
            .is_some_and(|record| record.account == owner.account());
        if self.accounts.contains_key(&owner.account()) && user_matches {
            return Ok(());
        }
        Err(TaskStoreError::persistence(std::io::Error::other(format!(
            "foreign key violation for {owner}"
        ))))
    }

    fn check_title_unique(
        &self,
        owner: TaskOwner,
        title: &TaskTitle,
        excluding: Option<TaskId>,
    ) -> TaskStoreResult<()> {
        if self.title_taken(owner, title, excluding) {
            return Err(TaskStoreError::DuplicateTitle {
                owner,
                title: title.clone(),
            });
        }
        Ok(())
    }
}

impl InMemoryTaskState {
    fn account_is_live(&self, account: AccountId) -> bool {
        self.accounts.get(&account).is_some_and(|deleted| !deleted)
    }

    fn live_user_account(&self, user: UserId) -> Option<AccountId> {
        self.users
            .get(&user)
            .filter(|record| !record.deleted)
            .map(|record| record.account)
    }

    fn live_task(&self, owner: TaskOwner, id: TaskId) -> Option<Task> {
        self.tasks
            .get(&id)
            .filter(|task| !task.is_deleted() && task.owner() == owner)
            .cloned()
    }

    fn title_taken(&self, owner: TaskOwner, title: &TaskTitle, excluding: Option<TaskId>) -> bool {
        self.live_tasks_of(owner)
            .any(|task| task.title() == title && Some(task.id()) != excluding)
    }

    fn listing(&self, owner: TaskOwner, filter: TaskFilter) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .live_tasks_of(owner)
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by(listing_order);
        tasks
    }
}

impl TaskSession for InMemoryTaskState {
    fn account_exists(&mut self, account: AccountId) -> TaskStoreResult<bool> {
        Ok(self.account_is_live(account))
    }

    fn user_account(&mut self, user: UserId) -> TaskStoreResult<Option<AccountId>> {
        Ok(self.live_user_account(user))
    }

    fn find_active(&mut self, owner: TaskOwner, id: TaskId) -> TaskStoreResult<Option<Task>> {
        Ok(self.live_task(owner, id))
    }

    fn title_in_use(
        &mut self,
        owner: TaskOwner,
        title: &TaskTitle,
        excluding: Option<TaskId>,
    ) -> TaskStoreResult<bool> {
        Ok(self.title_taken(owner, title, excluding))
    }

    fn list_active(&mut self, owner: TaskOwner, filter: TaskFilter) -> TaskStoreResult<Vec<Task>> {
        Ok(self.listing(owner, filter))
    }

    fn insert(&mut self, task: &NewTask) -> TaskStoreResult<TaskId> {
        self.check_references(task.owner())?;
        self.check_title_unique(task.owner(), &task.draft().title, None)?;
        self.last_task_id += 1;
        let id = TaskId::new(self.last_task_id);
        self.tasks.insert(id, task.clone().into_task(id));
        Ok(id)
    }

    fn save(&mut self, task: &Task) -> TaskStoreResult<()> {
        let is_live = self
            .tasks
            .get(&task.id())
            .is_some_and(|stored| !stored.is_deleted() && stored.owner() == task.owner());
        if !is_live {
            return Err(TaskStoreError::MissingRow(task.id()));
        }
        if !task.is_deleted() {
            self.check_title_unique(task.owner(), task.title(), Some(task.id()))?;
        }
        self.tasks.insert(task.id(), task.clone());
        Ok(())
    }
}

/// Session over a shared borrow of the state; writes are refused.
struct ReadSession<'state> {
    state: &'state InMemoryTaskState,
}

fn read_only_error() -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(
        "write attempted in a read-only session",
    ))
}

impl TaskSession for ReadSession<'_> {
    fn account_exists(&mut self, account: AccountId) -> TaskStoreResult<bool> {
        Ok(self.state.account_is_live(account))
    }

    fn user_account(&mut self, user: UserId) -> TaskStoreResult<Option<AccountId>> {
        Ok(self.state.live_user_account(user))
    }

    fn find_active(&mut self, owner: TaskOwner, id: TaskId) -> TaskStoreResult<Option<Task>> {
        Ok(self.state.live_task(owner, id))
    }

    fn title_in_use(
        &mut self,
        owner: TaskOwner,
        title: &TaskTitle,
        excluding: Option<TaskId>,
    ) -> TaskStoreResult<bool> {
        Ok(self.state.title_taken(owner, title, excluding))
    }

    fn list_active(&mut self, owner: TaskOwner, filter: TaskFilter) -> TaskStoreResult<Vec<Task>> {
        Ok(self.state.listing(owner, filter))
    }

    fn insert(&mut self, _task: &NewTask) -> TaskStoreResult<TaskId> {
        Err(read_only_error())
    }

    fn save(&mut self, _task: &Task) -> TaskStoreResult<()> {
        Err(read_only_error())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskSession) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static,
    {
        let mut state = self.state.write().map_err(|err| E::from(lock_error(&err)))?;
        // Work runs against a copy that only replaces the live state on success.
        let mut staged = state.clone();
        let value = work(&mut staged)?;
        *state = staged;
        Ok(value)
    }

    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskSession) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static,
    {
        let state = self.state.read().map_err(|err| E::from(lock_error(&err)))?;
        work(&mut ReadSession { state: &state })
    }
}
