//! Title uniqueness and transactional rollback.

use super::helpers::{seed_owner, service_over, shared_pool, stored_rows};
use mockable::DefaultClock;
use taskd::task::{
    adapters::postgres::PostgresTaskStore,
    domain::{NewTask, TaskDescription, TaskDraft, TaskPriority, TaskTitle},
    ports::{TaskStore, TaskStoreError},
    services::{CreateTaskRequest, TaskErrorKind, TaskRuleError},
};

fn draft(title: &str) -> Result<TaskDraft, eyre::Report> {
    Ok(TaskDraft {
        title: TaskTitle::new(title)?,
        description: TaskDescription::default(),
        priority: TaskPriority::default(),
        due_date: None,
    })
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TASKD_TEST_DATABASE_URL"]
async fn duplicate_live_title_is_rejected_until_deleted() -> Result<(), eyre::Report> {
    let pool = shared_pool()?;
    let owner = seed_owner(&pool)?;
    let service = service_over(pool);

    let first = service
        .create_task(CreateTaskRequest::new(owner, "Buy milk"))
        .await?;
    let duplicate = service
        .create_task(CreateTaskRequest::new(owner, "Buy milk"))
        .await;
    eyre::ensure!(
        duplicate.err().map(|err| err.kind()) == Some(TaskErrorKind::TitleAlreadyExists),
        "duplicate title was accepted"
    );

    service.delete_task(owner, first).await?;
    let reused = service
        .create_task(CreateTaskRequest::new(owner, "Buy milk"))
        .await?;
    eyre::ensure!(reused != first, "identifier was reused");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TASKD_TEST_DATABASE_URL"]
async fn unique_index_settles_writes_that_skip_the_pre_check() -> Result<(), eyre::Report> {
    let pool = shared_pool()?;
    let owner = seed_owner(&pool)?;
    let store = PostgresTaskStore::new(pool.clone());
    let task = NewTask::new(owner, draft("Buy milk")?, &DefaultClock);

    let result: Result<(), TaskStoreError> = store
        .atomically(move |session| {
            session.insert(&task)?;
            session.insert(&task)?;
            Ok(())
        })
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::DuplicateTitle { .. })),
        "expected a duplicate title error, got {result:?}"
    );
    eyre::ensure!(
        stored_rows(&pool, owner, false)? == 0,
        "first insert survived the failed transaction"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires TASKD_TEST_DATABASE_URL"]
async fn failed_unit_of_work_rolls_back() -> Result<(), eyre::Report> {
    let pool = shared_pool()?;
    let owner = seed_owner(&pool)?;
    let store = PostgresTaskStore::new(pool.clone());
    let task = NewTask::new(owner, draft("half done")?, &DefaultClock);

    let result: Result<(), TaskRuleError> = store
        .atomically(move |session| {
            let id = session.insert(&task)?;
            Err(TaskRuleError::TaskDoesntExist(id))
        })
        .await;

    eyre::ensure!(result.is_err(), "work should have failed");
    eyre::ensure!(
        stored_rows(&pool, owner, false)? == 0,
        "insert survived the failed transaction"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires TASKD_TEST_DATABASE_URL"]
async fn concurrent_creates_admit_one_title() -> Result<(), eyre::Report> {
    let pool = shared_pool()?;
    let owner = seed_owner(&pool)?;
    let service = service_over(pool.clone());

    let attempts = (0..6)
        .map(|_| {
            let racer = service.clone();
            tokio::spawn(async move {
                racer
                    .create_task(CreateTaskRequest::new(owner, "Buy milk"))
                    .await
            })
        })
        .collect::<Vec<_>>();

    let mut created = 0;
    for attempt in attempts {
        match attempt.await? {
            Ok(_) => created += 1,
            Err(err) if err.kind() == TaskErrorKind::TitleAlreadyExists => {}
            Err(err) => return Err(err.into()),
        }
    }

    eyre::ensure!(created == 1, "expected one winner, got {created}");
    eyre::ensure!(stored_rows(&pool, owner, false)? == 1, "duplicate rows stored");
    Ok(())
}
