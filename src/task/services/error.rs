//! Tagged errors raised by the task rule engine.

use crate::task::{
    domain::{AccountId, TaskDomainError, TaskId, TaskOwner, TaskTitle, UserId},
    ports::TaskStoreError,
};
use thiserror::Error;

/// Stable error kinds exposed to callers.
///
/// The rule engine is status-code agnostic; transports translate kinds into
/// their own vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// Title missing or blank.
    TitleRequired,
    /// Title longer than the limit.
    TitleExceedsMaxLength,
    /// Description longer than the limit.
    DescriptionExceedsMaxLength,
    /// Title or description holds a NUL character.
    TextContainsNul,
    /// Priority code out of range.
    InvalidPriority,
    /// Status code out of range.
    InvalidStatus,
    /// Due date before today.
    DueDateInPast,
    /// Account unknown or deleted.
    AccountDoesntExist,
    /// User unknown, deleted, or in another account.
    UserDoesntExist,
    /// Task unknown, deleted, or owned by someone else.
    TaskDoesntExist,
    /// Title already used by a live task of the same owner.
    TitleAlreadyExists,
    /// The store could not be reached; retry with backoff.
    StoreUnavailable,
    /// Unclassified infrastructure failure.
    Internal,
}

impl TaskErrorKind {
    /// Returns the wire code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TitleRequired => "titleRequired",
            Self::TitleExceedsMaxLength => "titleExceedsMaxLength",
            Self::DescriptionExceedsMaxLength => "descriptionExceedsMaxLength",
            Self::TextContainsNul => "textContainsNul",
            Self::InvalidPriority => "invalidPriority",
            Self::InvalidStatus => "invalidStatus",
            Self::DueDateInPast => "dueDateInPast",
            Self::AccountDoesntExist => "accountDoesntExist",
            Self::UserDoesntExist => "userDoesntExist",
            Self::TaskDoesntExist => "taskDoesntExist",
            Self::TitleAlreadyExists => "titleAlreadyExists",
            Self::StoreUnavailable => "storeUnavailable",
            Self::Internal => "internalError",
        }
    }
}

/// Errors returned by task rule engine operations.
#[derive(Debug, Clone, Error)]
pub enum TaskRuleError {
    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The account does not exist.
    #[error("account {0} does not exist")]
    AccountDoesntExist(AccountId),

    /// The user does not exist or belongs to another account.
    #[error("user {user} does not exist in account {account}")]
    UserDoesntExist {
        /// Requested user.
        user: UserId,
        /// Account the user was expected in.
        account: AccountId,
    },

    /// No live task with this identifier belongs to the caller.
    #[error("task {0} does not exist")]
    TaskDoesntExist(TaskId),

    /// Another live task of the owner already uses the title.
    #[error("a task titled '{title}' already exists for {owner}")]
    TitleAlreadyExists {
        /// Owner whose namespace collided.
        owner: TaskOwner,
        /// Conflicting title.
        title: TaskTitle,
    },

    /// Store infrastructure failed.
    #[error(transparent)]
    Store(TaskStoreError),
}

impl TaskRuleError {
    /// Returns the stable kind of this error.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Domain(err) => match err {
                TaskDomainError::TitleRequired => TaskErrorKind::TitleRequired,
                TaskDomainError::TitleExceedsMaxLength { .. } => {
                    TaskErrorKind::TitleExceedsMaxLength
                }
                TaskDomainError::DescriptionExceedsMaxLength { .. } => {
                    TaskErrorKind::DescriptionExceedsMaxLength
                }
                TaskDomainError::ContainsNul { .. } => TaskErrorKind::TextContainsNul,
                TaskDomainError::InvalidPriority(_) => TaskErrorKind::InvalidPriority,
                TaskDomainError::InvalidStatus(_) => TaskErrorKind::InvalidStatus,
                TaskDomainError::DueDateInPast { .. } => TaskErrorKind::DueDateInPast,
            },
            Self::AccountDoesntExist(_) => TaskErrorKind::AccountDoesntExist,
            Self::UserDoesntExist { .. } => TaskErrorKind::UserDoesntExist,
            Self::TaskDoesntExist(_) => TaskErrorKind::TaskDoesntExist,
            Self::TitleAlreadyExists { .. } => TaskErrorKind::TitleAlreadyExists,
            Self::Store(err) if err.is_retryable() => TaskErrorKind::StoreUnavailable,
            Self::Store(_) => TaskErrorKind::Internal,
        }
    }

    /// Returns the wire code of this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns whether the caller should retry with backoff.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_retryable())
    }
}

impl From<TaskStoreError> for TaskRuleError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::DuplicateTitle { owner, title } => {
                Self::TitleAlreadyExists { owner, title }
            }
            TaskStoreError::MissingRow(id) => Self::TaskDoesntExist(id),
            other => Self::Store(other),
        }
    }
}

/// Result type for task rule engine operations.
pub type TaskRuleResult<T> = Result<T, TaskRuleError>;
