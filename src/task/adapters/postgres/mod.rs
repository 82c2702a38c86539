//! `PostgreSQL` adapters for task persistence.

mod migrations;
mod models;
mod pool;
mod schema;
mod store;

pub use migrations::{CREATE_TASK_TABLES_SQL, apply_schema};
pub use pool::{PoolSettings, TaskPgPool, build_pool};
pub use store::PostgresTaskStore;
