//! taskd: a multi-tenant TODO task backend.
//!
//! Tasks belong to an (account, user) pair and are created, listed, updated
//! and soft-deleted through a REST surface. Business rules live in one place,
//! the task rule engine, and every write runs as a single store transaction.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture:
//!
//! - **Domain**: validated value types and the task aggregate
//! - **Ports**: the unit-of-work store contract
//! - **Adapters**: `PostgreSQL` and in-memory stores
//! - **Services**: the rule engine and the facade handed to transports
//!
//! # Modules
//!
//! - [`task`]: task rules, storage and services
//! - [`http`]: axum router, envelope and status mapping
//! - [`config`]: YAML configuration with environment overrides
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod http;
pub mod task;
pub mod telemetry;
