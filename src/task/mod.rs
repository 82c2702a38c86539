//! Task management for tenants.
//!
//! A task is owned by exactly one (account, user) pair. Titles are unique
//! among an owner's live tasks, deletion is soft and terminal, and status
//! moves freely between pending and completed until then. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Rule engine and facade in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
