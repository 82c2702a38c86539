//! Request payloads accepted by the task services.
//!
//! Requests carry transport-checked but not yet rule-checked values: numeric
//! codes stay raw so the engine can report range violations in order.

use crate::task::domain::{TaskId, TaskOwner};
use chrono::NaiveDate;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) owner: TaskOwner,
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) priority: Option<i64>,
    pub(super) due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner: TaskOwner, title: impl Into<String>) -> Self {
        Self {
            owner,
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the raw priority code.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the owner the task will belong to.
    #[must_use]
    pub const fn owner(&self) -> TaskOwner {
        self.owner
    }
}

/// Request payload for listing an owner's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTasksRequest {
    pub(super) owner: TaskOwner,
    pub(super) status: Option<i64>,
    pub(super) priority: Option<i64>,
}

impl ListTasksRequest {
    /// Lists every live task of `owner`.
    #[must_use]
    pub const fn new(owner: TaskOwner) -> Self {
        Self {
            owner,
            status: None,
            priority: None,
        }
    }

    /// Restricts the listing to a raw status code.
    #[must_use]
    pub const fn with_status(mut self, status: i64) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the listing to a raw priority code.
    #[must_use]
    pub const fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns the owner being listed.
    #[must_use]
    pub const fn owner(&self) -> TaskOwner {
        self.owner
    }
}

/// Request payload for fully replacing a task's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) owner: TaskOwner,
    pub(super) task_id: TaskId,
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) priority: i64,
    pub(super) due_date: Option<NaiveDate>,
    pub(super) status: i64,
}

impl UpdateTaskRequest {
    /// Creates a request with the required fields. Omitted optional fields
    /// are cleared by the update.
    #[must_use]
    pub fn new(
        owner: TaskOwner,
        task_id: TaskId,
        title: impl Into<String>,
        priority: i64,
        status: i64,
    ) -> Self {
        Self {
            owner,
            task_id,
            title: title.into(),
            description: None,
            priority,
            due_date: None,
            status,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the owner of the task.
    #[must_use]
    pub const fn owner(&self) -> TaskOwner {
        self.owner
    }

    /// Returns the targeted task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}
