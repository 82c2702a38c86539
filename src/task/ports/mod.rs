//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod store;

pub use store::{TaskSession, TaskStore, TaskStoreError, TaskStoreResult};
