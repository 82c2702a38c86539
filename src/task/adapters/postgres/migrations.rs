//! Embedded schema migration for the task tables.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// SQL creating accounts, users, tasks and their constraints and indexes.
///
/// Every statement is guarded with `IF NOT EXISTS`, so applying it to an
/// up-to-date database is a no-op.
pub const CREATE_TASK_TABLES_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_task_tables/up.sql");

/// Applies [`CREATE_TASK_TABLES_SQL`].
///
/// # Errors
///
/// Returns the Diesel error raised by the first failing statement.
pub fn apply_schema(connection: &mut PgConnection) -> diesel::QueryResult<()> {
    connection.batch_execute(CREATE_TASK_TABLES_SQL)
}
