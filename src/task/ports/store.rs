//! Store port: units of work over the task table and its tenancy references.
//!
//! The rule engine never talks to a connection directly. It hands a closure to
//! [`TaskStore::atomically`] or [`TaskStore::read`] and the closure drives a
//! [`TaskSession`]. Adapters guarantee that an `Err` from an atomic closure
//! leaves no trace in the store.

use crate::task::domain::{AccountId, NewTask, Task, TaskFilter, TaskId, TaskOwner, TaskTitle, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store primitives.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Primitive task store operations available inside a unit of work.
///
/// Every method that reads tasks ignores soft-deleted rows.
pub trait TaskSession {
    /// Returns whether a live account with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the lookup fails.
    fn account_exists(&mut self, account: AccountId) -> TaskStoreResult<bool>;

    /// Returns the account a live user belongs to, or `None` when the user
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the lookup fails.
    fn user_account(&mut self, user: UserId) -> TaskStoreResult<Option<AccountId>>;

    /// Finds a non-deleted task by identifier within the owner's scope.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the lookup fails.
    fn find_active(&mut self, owner: TaskOwner, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns whether another non-deleted task of the owner uses `title`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the lookup fails.
    fn title_in_use(
        &mut self,
        owner: TaskOwner,
        title: &TaskTitle,
        excluding: Option<TaskId>,
    ) -> TaskStoreResult<bool>;

    /// Lists the owner's non-deleted tasks that match `filter`, in listing
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the query fails.
    fn list_active(&mut self, owner: TaskOwner, filter: TaskFilter) -> TaskStoreResult<Vec<Task>>;

    /// Inserts a new task and returns the store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTitle`] when the store's uniqueness
    /// constraint rejects the row.
    fn insert(&mut self, task: &NewTask) -> TaskStoreResult<TaskId>;

    /// Writes every mutable column of an existing task, including the
    /// soft-delete flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTitle`] when the store's uniqueness
    /// constraint rejects the new title, or [`TaskStoreError::MissingRow`]
    /// when no live row matched.
    fn save(&mut self, task: &Task) -> TaskStoreResult<()>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Runs `work` inside one atomic transaction.
    ///
    /// Any `Err` returned by `work` rolls the transaction back and is handed
    /// back unchanged.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`TaskStoreError`] converted into `E`
    /// when a connection cannot be obtained or the commit fails.
    async fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskSession) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static;

    /// Runs read-only `work` without opening a transaction.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`TaskStoreError`] converted into `E`
    /// when a connection cannot be obtained.
    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskSession) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The partial unique index on `(account, user, title)` rejected a write.
    #[error("title '{title}' is already used by a live task of {owner}")]
    DuplicateTitle {
        /// Owner whose namespace collided.
        owner: TaskOwner,
        /// Conflicting title.
        title: TaskTitle,
    },

    /// A write targeted a row that is absent or soft-deleted.
    #[error("no live task row {0}")]
    MissingRow(TaskId),

    /// No connection could be checked out in time. Callers may retry.
    #[error("task store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a connection checkout failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Returns whether the failure is transient and worth retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
