//! Domain model for multi-tenant task management.
//!
//! Field rules live on the validated value types so that every layer above
//! works with data that already satisfies the storage limits.

mod error;
mod fields;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use fields::{DueDate, TaskDescription, TaskPriority, TaskStatus, TaskTitle};
pub use ids::{AccountId, TaskId, TaskOwner, UserId};
pub use task::{NewTask, PersistedTaskData, Task, TaskDraft, TaskFilter, listing_order};
