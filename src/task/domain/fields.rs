//! Validated scalar fields of a task.
//!
//! Each constructor enforces one storage rule and reports the first violation
//! as a [`TaskDomainError`]. The same limits are mirrored by check
//! constraints in the `tasks` table.

use super::TaskDomainError;
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

fn reject_nul(raw: &str, field: &'static str) -> Result<(), TaskDomainError> {
    if raw.contains('\0') {
        return Err(TaskDomainError::ContainsNul { field });
    }
    Ok(())
}

/// Task title: non-blank and at most [`TaskTitle::MAX_CHARS`] characters.
///
/// The title is kept exactly as supplied; blankness is judged after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum title length in characters.
    pub const MAX_CHARS: usize = 100;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TitleRequired`] when the value is blank,
    /// [`TaskDomainError::TitleExceedsMaxLength`] when it is too long and
    /// [`TaskDomainError::ContainsNul`] when it holds a NUL character.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::TitleRequired);
        }
        let actual = raw.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskDomainError::TitleExceedsMaxLength {
                actual,
                max: Self::MAX_CHARS,
            });
        }
        reject_nul(&raw, "title")?;
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text task description, empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Maximum description length in characters.
    pub const MAX_CHARS: usize = 500;

    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionExceedsMaxLength`] when the value
    /// is too long and [`TaskDomainError::ContainsNul`] when it holds a NUL
    /// character.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let actual = raw.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskDomainError::DescriptionExceedsMaxLength {
                actual,
                max: Self::MAX_CHARS,
            });
        }
        reject_nul(&raw, "description")?;
        Ok(Self(raw))
    }

    /// Validates an optional description, substituting the empty default.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskDescription::new`] failures.
    pub fn from_optional(value: Option<String>) -> Result<Self, TaskDomainError> {
        value.map_or_else(|| Ok(Self::default()), Self::new)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task priority. Persisted and serialised as its numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum TaskPriority {
    /// Code `0`.
    Low,
    /// Code `1`.
    #[default]
    Medium,
    /// Code `2`.
    High,
}

impl TaskPriority {
    /// Returns the numeric storage code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl TryFrom<i64> for TaskPriority {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            _ => Err(TaskDomainError::InvalidPriority(value)),
        }
    }
}

impl TryFrom<i16> for TaskPriority {
    type Error = TaskDomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<TaskPriority> for i16 {
    fn from(value: TaskPriority) -> Self {
        value.code()
    }
}

/// Task completion status. Persisted and serialised as its numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum TaskStatus {
    /// Code `0`.
    #[default]
    Pending,
    /// Code `1`.
    Completed,
}

impl TaskStatus {
    /// Returns the numeric storage code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Pending => 0,
            Self::Completed => 1,
        }
    }
}

impl TryFrom<i64> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Completed),
            _ => Err(TaskDomainError::InvalidStatus(value)),
        }
    }
}

impl TryFrom<i16> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<TaskStatus> for i16 {
    fn from(value: TaskStatus) -> Self {
        value.code()
    }
}

/// Calendar due date that was not in the past when it was set.
///
/// Dates read back from storage are not re-validated, so an overdue task
/// stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Validates a due date against the current UTC calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when `date` is strictly
    /// earlier than today. Today itself is accepted.
    pub fn not_before_today(date: NaiveDate, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let today = clock.utc().date_naive();
        if date < today {
            return Err(TaskDomainError::DueDateInPast { due: date, today });
        }
        Ok(Self(date))
    }

    /// Wraps a date loaded from storage without validation.
    #[must_use]
    pub const fn from_persisted(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
