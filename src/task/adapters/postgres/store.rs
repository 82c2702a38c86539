//! `PostgreSQL` task store implementation.

use super::{
    models::{NewTaskRow, TaskRow},
    pool::TaskPgPool,
    schema::{accounts, tasks, users},
};
use crate::task::{
    domain::{
        AccountId, DueDate, NewTask, PersistedTaskData, Task, TaskDescription, TaskFilter, TaskId,
        TaskOwner, TaskPriority, TaskStatus, TaskTitle, UserId,
    },
    ports::{TaskSession, TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::dsl::not;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Name of the partial unique index over live `(account, user, title)` rows.
const OWNER_TITLE_INDEX: &str = "ux_tasks_owner_title_active";

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(TaskStoreError::unavailable(err)))?;
            operation(&mut connection)
        })
        .await
        .map_err(|err| E::from(TaskStoreError::persistence(err)))?
    }
}

/// Error carried out of a Diesel transaction closure.
enum TransactionFailure<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TransactionFailure<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl<E: From<TaskStoreError>> TransactionFailure<E> {
    fn into_inner(self) -> E {
        match self {
            Self::Work(err) => err,
            Self::Database(err) => E::from(TaskStoreError::persistence(err)),
        }
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskSession) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            connection
                .transaction::<T, TransactionFailure<E>, _>(|tx_conn| {
                    let mut session = PgTaskSession::new(tx_conn);
                    work(&mut session).map_err(TransactionFailure::Work)
                })
                .map_err(TransactionFailure::into_inner)
        })
        .await
    }

    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskSession) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            let mut session = PgTaskSession::new(connection);
            work(&mut session)
        })
        .await
    }
}

/// [`TaskSession`] bound to one checked-out connection.
struct PgTaskSession<'conn> {
    connection: &'conn mut PgConnection,
}

impl<'conn> PgTaskSession<'conn> {
    const fn new(connection: &'conn mut PgConnection) -> Self {
        Self { connection }
    }
}

impl TaskSession for PgTaskSession<'_> {
    fn account_exists(&mut self, account: AccountId) -> TaskStoreResult<bool> {
        let count: i64 = accounts::table
            .filter(accounts::id_account.eq(account.value()))
            .filter(not(accounts::deleted))
            .count()
            .get_result(self.connection)
            .map_err(TaskStoreError::persistence)?;
        Ok(count > 0)
    }

    fn user_account(&mut self, user: UserId) -> TaskStoreResult<Option<AccountId>> {
        let account = users::table
            .filter(users::id_user.eq(user.value()))
            .filter(not(users::deleted))
            .select(users::id_account)
            .first::<i64>(self.connection)
            .optional()
            .map_err(TaskStoreError::persistence)?;
        Ok(account.map(AccountId::new))
    }

    fn find_active(&mut self, owner: TaskOwner, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let row = tasks::table
            .filter(tasks::id_task.eq(id.value()))
            .filter(tasks::id_account.eq(owner.account().value()))
            .filter(tasks::id_user.eq(owner.user().value()))
            .filter(not(tasks::deleted))
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.connection)
            .optional()
            .map_err(TaskStoreError::persistence)?;
        row.map(row_to_task).transpose()
    }

    fn title_in_use(
        &mut self,
        owner: TaskOwner,
        title: &TaskTitle,
        excluding: Option<TaskId>,
    ) -> TaskStoreResult<bool> {
        let holders: Vec<i64> = tasks::table
            .filter(tasks::id_account.eq(owner.account().value()))
            .filter(tasks::id_user.eq(owner.user().value()))
            .filter(tasks::title.eq(title.as_str()))
            .filter(not(tasks::deleted))
            .select(tasks::id_task)
            .load(self.connection)
            .map_err(TaskStoreError::persistence)?;
        let excluded = excluding.map(TaskId::value);
        Ok(holders.into_iter().any(|holder| Some(holder) != excluded))
    }

    fn list_active(&mut self, owner: TaskOwner, filter: TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let rows = listing_query(owner, filter)
            .select(TaskRow::as_select())
            .load::<TaskRow>(self.connection)
            .map_err(TaskStoreError::persistence)?;
        rows.into_iter().map(row_to_task).collect()
    }

    fn insert(&mut self, task: &NewTask) -> TaskStoreResult<TaskId> {
        let owner = task.owner();
        let title = task.draft().title.clone();
        let id = diesel::insert_into(tasks::table)
            .values(&to_new_row(task))
            .returning(tasks::id_task)
            .get_result::<i64>(self.connection)
            .map_err(|err| map_write_error(err, owner, &title))?;
        Ok(TaskId::new(id))
    }

    fn save(&mut self, task: &Task) -> TaskStoreResult<()> {
        let owner = task.owner();
        let updated_count = diesel::update(
            tasks::table
                .filter(tasks::id_task.eq(task.id().value()))
                .filter(tasks::id_account.eq(owner.account().value()))
                .filter(tasks::id_user.eq(owner.user().value()))
                .filter(not(tasks::deleted)),
        )
        .set((
            tasks::title.eq(task.title().as_str()),
            tasks::description.eq(task.description().as_str()),
            tasks::priority.eq(task.priority().code()),
            tasks::due_date.eq(task.due_date().map(DueDate::date)),
            tasks::status.eq(task.status().code()),
            tasks::date_modified.eq(task.updated_at()),
            tasks::deleted.eq(task.is_deleted()),
        ))
        .execute(self.connection)
        .map_err(|err| map_write_error(err, owner, task.title()))?;

        if updated_count == 0 {
            return Err(TaskStoreError::MissingRow(task.id()));
        }
        Ok(())
    }
}

/// Live tasks of `owner` matching `filter`, in listing order.
fn listing_query(owner: TaskOwner, filter: TaskFilter) -> tasks::BoxedQuery<'static, Pg> {
    let mut query = tasks::table
        .filter(tasks::id_account.eq(owner.account().value()))
        .filter(tasks::id_user.eq(owner.user().value()))
        .filter(not(tasks::deleted))
        .into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(tasks::status.eq(status.code()));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(tasks::priority.eq(priority.code()));
    }
    query.order_by((
        tasks::priority.desc(),
        tasks::due_date.asc().nulls_last(),
        tasks::date_created.desc(),
        tasks::id_task.desc(),
    ))
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    let draft = task.draft();
    NewTaskRow {
        id_account: task.owner().account().value(),
        id_user: task.owner().user().value(),
        title: draft.title.as_str().to_owned(),
        description: draft.description.as_str().to_owned(),
        priority: draft.priority.code(),
        due_date: draft.due_date.map(DueDate::date),
        status: task.status().code(),
        date_created: task.created_at(),
        date_modified: task.created_at(),
        deleted: false,
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id_task,
        id_account,
        id_user,
        title: persisted_title,
        description: persisted_description,
        priority: persisted_priority,
        due_date,
        status: persisted_status,
        date_created,
        date_modified,
        deleted,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id_task),
        owner: TaskOwner::new(AccountId::new(id_account), UserId::new(id_user)),
        title: TaskTitle::new(persisted_title).map_err(TaskStoreError::persistence)?,
        description: TaskDescription::new(persisted_description)
            .map_err(TaskStoreError::persistence)?,
        priority: TaskPriority::try_from(persisted_priority)
            .map_err(TaskStoreError::persistence)?,
        due_date: due_date.map(DueDate::from_persisted),
        status: TaskStatus::try_from(persisted_status).map_err(TaskStoreError::persistence)?,
        created_at: date_created,
        updated_at: date_modified,
        deleted,
    };
    Ok(Task::from_persisted(data))
}

fn is_owner_title_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == OWNER_TITLE_INDEX)
}

/// Maps the unique-index violation that settles concurrent title races.
fn map_write_error(err: DieselError, owner: TaskOwner, title: &TaskTitle) -> TaskStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_owner_title_violation(info.as_ref()) =>
        {
            TaskStoreError::DuplicateTitle {
                owner,
                title: title.clone(),
            }
        }
        _ => TaskStoreError::persistence(err),
    }
}
