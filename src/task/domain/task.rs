//! Task aggregate root and listing helpers.

use super::{
    DueDate, TaskDescription, TaskId, TaskOwner, TaskPriority, TaskStatus, TaskTitle,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::cmp::Ordering;

/// User-editable content of a task, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: TaskTitle,
    /// Task description.
    pub description: TaskDescription,
    /// Task priority.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<DueDate>,
}

/// A task that has been validated but not yet assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    owner: TaskOwner,
    draft: TaskDraft,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Prepares a pending task stamped with the current clock time.
    #[must_use]
    pub fn new(owner: TaskOwner, draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            owner,
            draft,
            created_at: clock.utc(),
        }
    }

    /// Returns the owning tenant pair.
    #[must_use]
    pub const fn owner(&self) -> TaskOwner {
        self.owner
    }

    /// Returns the validated content.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Returns the creation timestamp, also used as the first modification
    /// timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Newly created tasks always start pending.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        TaskStatus::Pending
    }

    /// Materialises the task once the store has assigned its identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            owner: self.owner,
            title: self.draft.title,
            description: self.draft.description,
            priority: self.draft.priority,
            due_date: self.draft.due_date,
            status: TaskStatus::Pending,
            created_at: self.created_at,
            updated_at: self.created_at,
            deleted: false,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner: TaskOwner,
    title: TaskTitle,
    description: TaskDescription,
    priority: TaskPriority,
    due_date: Option<DueDate>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted: bool,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted ownership key.
    pub owner: TaskOwner,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date, not re-validated.
    pub due_date: Option<DueDate>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-delete flag.
    pub deleted: bool,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            priority: data.priority,
            due_date: data.due_date,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted: data.deleted,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning tenant pair.
    #[must_use]
    pub const fn owner(&self) -> TaskOwner {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Replaces every editable field, including status.
    ///
    /// Status may move between pending and completed in either direction.
    pub fn replace(&mut self, draft: TaskDraft, status: TaskStatus, clock: &impl Clock) {
        self.title = draft.title;
        self.description = draft.description;
        self.priority = draft.priority;
        self.due_date = draft.due_date;
        self.status = status;
        self.touch(clock);
    }

    /// Flags the task as deleted. There is no inverse operation.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        self.deleted = true;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Optional exact-match filters for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Keep only tasks with this priority.
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Returns whether `task` satisfies every present filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
    }
}

/// Total order used for task listings.
///
/// Priority descending, then due date ascending with undated tasks last, then
/// newest first by creation time, then by descending identifier.
#[must_use]
pub fn listing_order(left: &Task, right: &Task) -> Ordering {
    right
        .priority()
        .cmp(&left.priority())
        .then_with(|| match (left.due_date(), right.due_date()) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| right.created_at().cmp(&left.created_at()))
        .then_with(|| right.id().cmp(&left.id()))
}
