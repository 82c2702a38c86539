//! Shared helpers for `PostgreSQL` integration tests.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use mockable::DefaultClock;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use taskd::task::{
    adapters::postgres::{PoolSettings, PostgresTaskStore, TaskPgPool, apply_schema, build_pool},
    domain::{AccountId, TaskOwner, UserId},
    services::TaskService,
};
use uuid::Uuid;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_VAR: &str = "TASKD_TEST_DATABASE_URL";

/// Service type exercised by the `PostgreSQL` tests.
pub type PgService = TaskService<PostgresTaskStore, DefaultClock>;

/// Pool shared by every test in the binary, with the schema applied once.
static SHARED_POOL: Lazy<Result<TaskPgPool, String>> = Lazy::new(|| {
    let url = database_url().map_err(|err| err.to_string())?;
    let pool = build_pool(&PoolSettings {
        url,
        max_connections: 8,
        checkout_timeout: Duration::from_secs(10),
    });
    let mut connection = pool
        .get()
        .map_err(|err| format!("test database refused a connection: {err}"))?;
    apply_schema(&mut connection).map_err(|err| format!("task schema did not apply: {err}"))?;
    Ok(pool)
});

/// Returns the test database URL.
///
/// # Errors
///
/// Returns an error when `TASKD_TEST_DATABASE_URL` is unset.
pub fn database_url() -> Result<String, eyre::Report> {
    std::env::var(TEST_DATABASE_URL_VAR)
        .map_err(|_| eyre::eyre!("{TEST_DATABASE_URL_VAR} must name a PostgreSQL database"))
}

/// Returns the shared pool.
///
/// # Errors
///
/// Returns an error when the database is not configured or unreachable.
pub fn shared_pool() -> Result<TaskPgPool, eyre::Report> {
    (*SHARED_POOL).clone().map_err(|message| eyre::eyre!(message))
}

/// Builds a service over `pool`.
#[must_use]
pub fn service_over(pool: TaskPgPool) -> PgService {
    TaskService::new(Arc::new(PostgresTaskStore::new(pool)), Arc::new(DefaultClock))
}

#[derive(QueryableByName)]
struct InsertedId {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

/// Inserts a fresh account and user so each test owns an empty namespace.
///
/// # Errors
///
/// Returns an error when a checkout or insert fails.
pub fn seed_owner(pool: &TaskPgPool) -> Result<TaskOwner, eyre::Report> {
    let mut connection = pool.get()?;
    let name = format!("test-{}", Uuid::new_v4().simple());
    let account = diesel::sql_query(
        "INSERT INTO accounts (name) VALUES ($1) RETURNING id_account AS id",
    )
    .bind::<Text, _>(&name)
    .get_result::<InsertedId>(&mut connection)?;
    let user = diesel::sql_query(
        "INSERT INTO users (id_account, name) VALUES ($1, $2) RETURNING id_user AS id",
    )
    .bind::<BigInt, _>(account.id)
    .bind::<Text, _>(&name)
    .get_result::<InsertedId>(&mut connection)?;
    Ok(TaskOwner::new(AccountId::new(account.id), UserId::new(user.id)))
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Counts stored task rows of `owner`, soft-deleted rows included.
///
/// # Errors
///
/// Returns an error when a checkout or query fails.
pub fn stored_rows(pool: &TaskPgPool, owner: TaskOwner, deleted: bool) -> Result<i64, eyre::Report> {
    let mut connection = pool.get()?;
    let rows = diesel::sql_query(
        "SELECT COUNT(*) AS count FROM tasks WHERE id_account = $1 AND id_user = $2 AND deleted = $3",
    )
    .bind::<BigInt, _>(owner.account().value())
    .bind::<BigInt, _>(owner.user().value())
    .bind::<diesel::sql_types::Bool, _>(deleted)
    .get_result::<RowCount>(&mut connection)?;
    Ok(rows.count)
}
