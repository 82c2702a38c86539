//! Task rule engine: input validation followed by store procedures.
//!
//! Input rules are checked first, in a fixed order, without touching the
//! store. Referential, ownership and uniqueness rules then run inside one unit
//! of work together with the write they guard.

use super::{
    CreateTaskRequest, ListTasksRequest, TaskRuleResult, UpdateTaskRequest, procedures,
};
use crate::task::{
    domain::{
        DueDate, NewTask, Task, TaskDescription, TaskDomainError, TaskDraft, TaskFilter, TaskId,
        TaskOwner, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::TaskStore,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Validates and executes task operations against a [`TaskStore`].
pub struct TaskRuleEngine<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for TaskRuleEngine<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> TaskRuleEngine<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a rule engine over `store`, reading "now" from `clock`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a pending task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`super::TaskRuleError`].
    pub async fn create(&self, request: CreateTaskRequest) -> TaskRuleResult<TaskId> {
        let CreateTaskRequest {
            owner,
            title: raw_title,
            description: raw_description,
            priority: raw_priority,
            due_date: raw_due_date,
        } = request;
        let title = TaskTitle::new(raw_title)?;
        let description = TaskDescription::from_optional(raw_description)?;
        let priority = raw_priority.map_or(Ok(TaskPriority::default()), TaskPriority::try_from)?;
        let due_date = self.schedule(raw_due_date)?;

        let task = NewTask::new(
            owner,
            TaskDraft {
                title,
                description,
                priority,
                due_date,
            },
            &*self.clock,
        );
        self.store
            .atomically(move |session| procedures::create_task(session, &task))
            .await
    }

    /// Lists an owner's live tasks in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRuleError`] for out-of-range filters or unknown
    /// owners.
    pub async fn list(&self, request: ListTasksRequest) -> TaskRuleResult<Vec<Task>> {
        let filter = TaskFilter {
            status: request.status.map(TaskStatus::try_from).transpose()?,
            priority: request.priority.map(TaskPriority::try_from).transpose()?,
        };
        let owner = request.owner;
        self.store
            .read(move |session| procedures::list_tasks(session, owner, filter))
            .await
    }

    /// Fetches one live task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRuleError::TaskDoesntExist`] when the task is
    /// missing, deleted, or owned by someone else.
    pub async fn get(&self, owner: TaskOwner, id: TaskId) -> TaskRuleResult<Task> {
        self.store
            .read(move |session| procedures::get_task(session, owner, id))
            .await
    }

    /// Replaces every editable field of a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`super::TaskRuleError`].
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskRuleResult<TaskId> {
        let UpdateTaskRequest {
            owner,
            task_id,
            title: raw_title,
            description: raw_description,
            priority: raw_priority,
            due_date: raw_due_date,
            status: raw_status,
        } = request;
        let title = TaskTitle::new(raw_title)?;
        let description = TaskDescription::from_optional(raw_description)?;
        let priority = TaskPriority::try_from(raw_priority)?;
        let status = TaskStatus::try_from(raw_status)?;
        let due_date = self.schedule(raw_due_date)?;

        let draft = TaskDraft {
            title,
            description,
            priority,
            due_date,
        };
        let clock = Arc::clone(&self.clock);
        self.store
            .atomically(move |session| {
                procedures::update_task(session, owner, task_id, draft, status, &*clock)
            })
            .await
    }

    /// Soft-deletes a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRuleError::TaskDoesntExist`] when the task is
    /// missing, already deleted, or owned by someone else.
    pub async fn delete(&self, owner: TaskOwner, id: TaskId) -> TaskRuleResult<TaskId> {
        let clock = Arc::clone(&self.clock);
        self.store
            .atomically(move |session| procedures::delete_task(session, owner, id, &*clock))
            .await
    }

    fn schedule(&self, due_date: Option<NaiveDate>) -> Result<Option<DueDate>, TaskDomainError> {
        due_date
            .map(|date| DueDate::not_before_today(date, &*self.clock))
            .transpose()
    }
}
