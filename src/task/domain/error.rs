//! Error types for task domain validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing validated task field values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is missing or blank after trimming.
    #[error("task title is required")]
    TitleRequired,

    /// The title exceeds the storage limit.
    #[error("task title has {actual} characters, exceeds limit of {max}")]
    TitleExceedsMaxLength {
        /// Character count of the rejected title.
        actual: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// The description exceeds the storage limit.
    #[error("task description has {actual} characters, exceeds limit of {max}")]
    DescriptionExceedsMaxLength {
        /// Character count of the rejected description.
        actual: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// A text field contains a NUL character, which `PostgreSQL` text
    /// columns cannot hold.
    #[error("task {field} contains a NUL character")]
    ContainsNul {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// The priority code is outside the `Low..=High` range.
    #[error("invalid task priority {0}, expected 0 (low), 1 (medium) or 2 (high)")]
    InvalidPriority(i64),

    /// The status code is outside the `Pending..=Completed` range.
    #[error("invalid task status {0}, expected 0 (pending) or 1 (completed)")]
    InvalidStatus(i64),

    /// The due date lies before the current calendar day.
    #[error("due date {due} is before today ({today})")]
    DueDateInPast {
        /// The rejected due date.
        due: NaiveDate,
        /// The calendar day the date was validated against.
        today: NaiveDate,
    },
}
