//! JSON response envelope and payload views.

use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Uniform response wrapper: `{success, data?, error?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiEnvelope<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiEnvelope<()> {
    /// Wraps a failure.
    #[must_use]
    pub const fn failure(error: ApiErrorBody) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Error section of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
    /// Per-field transport validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// One failed transport-level field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: String,
    /// Why the value was rejected.
    pub message: String,
}

/// `{idTask}` payload returned by writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskIdView {
    /// Affected task.
    pub id_task: i64,
}

impl From<TaskId> for TaskIdView {
    fn from(id: TaskId) -> Self {
        Self {
            id_task: id.value(),
        }
    }
}

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id_task: i64,
    /// Owning account.
    pub id_account: i64,
    /// Owning user.
    pub id_user: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority code.
    pub priority: i16,
    /// Due date, `null` when unset.
    pub due_date: Option<NaiveDate>,
    /// Status code.
    pub status: i16,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub date_modified: DateTime<Utc>,
    /// Always `false` on read surfaces.
    pub deleted: bool,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id_task: task.id().value(),
            id_account: task.owner().account().value(),
            id_user: task.owner().user().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            priority: task.priority().code(),
            due_date: task.due_date().map(|due| due.date()),
            status: task.status().code(),
            date_created: task.created_at(),
            date_modified: task.updated_at(),
            deleted: task.is_deleted(),
        }
    }
}

/// Liveness probe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthView {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
}
