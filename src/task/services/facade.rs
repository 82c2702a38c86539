//! Application-facing task service.

use super::{
    CreateTaskRequest, ListTasksRequest, TaskRuleEngine, TaskRuleError, TaskRuleResult,
    UpdateTaskRequest,
};
use crate::task::{
    domain::{Task, TaskId, TaskOwner},
    ports::TaskStore,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::Instrument;

/// Stateless pass-through from typed requests to the rule engine.
///
/// Results and tagged errors are returned unchanged. Cloning is cheap, so one
/// instance can be shared by every request handler.
pub struct TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync + 'static,
{
    engine: TaskRuleEngine<S, C>,
}

impl<S, C> Clone for TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl<S, C> TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a task service over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            engine: TaskRuleEngine::new(store, clock),
        }
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskRuleError`] from the rule engine.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskRuleResult<TaskId> {
        let span = owner_span("create_task", request.owner());
        let outcome = self.engine.create(request).instrument(span.clone()).await;
        span.in_scope(|| log_outcome(&outcome));
        outcome
    }

    /// Lists an owner's live tasks.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskRuleError`] from the rule engine.
    pub async fn list_tasks(&self, request: ListTasksRequest) -> TaskRuleResult<Vec<Task>> {
        let span = owner_span("list_tasks", request.owner());
        let outcome = self.engine.list(request).instrument(span.clone()).await;
        span.in_scope(|| match &outcome {
            Ok(tasks) => tracing::debug!(count = tasks.len(), "listed tasks"),
            Err(err) => log_failure(err),
        });
        outcome
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskRuleError`] from the rule engine.
    pub async fn get_task(&self, owner: TaskOwner, id: TaskId) -> TaskRuleResult<Task> {
        let span = owner_span("get_task", owner);
        let outcome = self.engine.get(owner, id).instrument(span.clone()).await;
        span.in_scope(|| match &outcome {
            Ok(task) => tracing::debug!(task_id = %task.id(), "fetched task"),
            Err(err) => log_failure(err),
        });
        outcome
    }

    /// Replaces a task's editable fields.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskRuleError`] from the rule engine.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskRuleResult<TaskId> {
        let span = owner_span("update_task", request.owner());
        let outcome = self.engine.update(request).instrument(span.clone()).await;
        span.in_scope(|| log_outcome(&outcome));
        outcome
    }

    /// Soft-deletes a task.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskRuleError`] from the rule engine.
    pub async fn delete_task(&self, owner: TaskOwner, id: TaskId) -> TaskRuleResult<TaskId> {
        let span = owner_span("delete_task", owner);
        let outcome = self.engine.delete(owner, id).instrument(span.clone()).await;
        span.in_scope(|| log_outcome(&outcome));
        outcome
    }
}

fn owner_span(operation: &'static str, owner: TaskOwner) -> tracing::Span {
    tracing::info_span!(
        "task",
        operation,
        account = %owner.account(),
        user = %owner.user(),
    )
}

fn log_outcome(outcome: &TaskRuleResult<TaskId>) {
    match outcome {
        Ok(id) => tracing::info!(task_id = %id, "task written"),
        Err(err) => log_failure(err),
    }
}

fn log_failure(err: &TaskRuleError) {
    if matches!(err, TaskRuleError::Store(_)) {
        tracing::error!(code = err.code(), error = %err, "task store failure");
    } else {
        tracing::debug!(code = err.code(), error = %err, "task rule rejected request");
    }
}
