//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskd::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{TaskId, TaskOwner},
    services::{TaskRuleError, TaskService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskStore, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub service: TestTaskService,
    pub owner: Option<TaskOwner>,
    pub current_task: Option<TaskId>,
    pub last_result: Option<Result<TaskId, TaskRuleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let service = TaskService::new(Arc::clone(&store), Arc::new(DefaultClock));

        Self {
            store,
            service,
            owner: None,
            current_task: None,
            last_result: None,
        }
    }

    /// Returns the registered owner.
    ///
    /// # Errors
    ///
    /// Returns an error when no owner has been registered yet.
    pub fn owner(&self) -> Result<TaskOwner, eyre::Report> {
        self.owner
            .ok_or_else(|| eyre::eyre!("missing owner in scenario world"))
    }

    /// Returns the task the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn current_task(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
