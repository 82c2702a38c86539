//! Application services for task management.
//!
//! [`TaskRuleEngine`] owns the business rules; [`TaskService`] is the
//! facade handed to transports.

mod engine;
mod error;
mod facade;
mod procedures;
mod requests;

pub use engine::TaskRuleEngine;
pub use error::{TaskErrorKind, TaskRuleError, TaskRuleResult};
pub use facade::TaskService;
pub use requests::{CreateTaskRequest, ListTasksRequest, UpdateTaskRequest};
