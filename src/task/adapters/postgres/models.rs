//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
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
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Status code.
    pub status: i16,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub date_modified: DateTime<Utc>,
    /// Soft-delete flag.
    pub deleted: bool,
}

/// Insert model for task records. The identifier is generated by the store.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
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
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Status code.
    pub status: i16,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub date_modified: DateTime<Utc>,
    /// Soft-delete flag.
    pub deleted: bool,
}
