//! Service round-trips against the in-memory store.

use super::helpers::{COLLEAGUE, Fixture, OWNER, seeded, utc_day};
use mockable::DefaultClock;
use rstest::rstest;
use taskd::task::{
    domain::{NewTask, Task, TaskDescription, TaskDraft, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskStore, TaskStoreError},
    services::{
        CreateTaskRequest, ListTasksRequest, TaskErrorKind, TaskRuleError, UpdateTaskRequest,
    },
};

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_keeps_the_row_for_auditing(seeded: Fixture) -> Result<(), eyre::Report> {
    let id = seeded
        .service
        .create_task(
            CreateTaskRequest::new(OWNER, "Renew passport")
                .with_description("bring photos")
                .with_due_date(utc_day(30)),
        )
        .await?;

    seeded
        .service
        .update_task(
            UpdateTaskRequest::new(OWNER, id, "Renew passport", 2, 1).with_due_date(utc_day(10)),
        )
        .await?;
    let updated = seeded.service.get_task(OWNER, id).await?;
    eyre::ensure!(updated.status() == TaskStatus::Completed, "status not replaced");
    eyre::ensure!(updated.priority() == TaskPriority::High, "priority not replaced");
    eyre::ensure!(updated.description().as_str().is_empty(), "description kept");
    eyre::ensure!(
        updated.updated_at() >= updated.created_at(),
        "modification time went backwards"
    );

    seeded.service.delete_task(OWNER, id).await?;

    let listed = seeded
        .service
        .list_tasks(ListTasksRequest::new(OWNER))
        .await?;
    eyre::ensure!(listed.is_empty(), "deleted task is still listed");
    let audited = seeded
        .store
        .audit_task(id)?
        .ok_or_else(|| eyre::eyre!("deleted row should be kept"))?;
    eyre::ensure!(audited.is_deleted(), "row is not flagged as deleted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_scoped_to_the_owner(seeded: Fixture) -> Result<(), eyre::Report> {
    seeded
        .service
        .create_task(CreateTaskRequest::new(OWNER, "mine").with_priority(0))
        .await?;
    seeded
        .service
        .create_task(CreateTaskRequest::new(OWNER, "urgent").with_priority(2))
        .await?;
    seeded
        .service
        .create_task(CreateTaskRequest::new(COLLEAGUE, "theirs"))
        .await?;

    let listed = seeded
        .service
        .list_tasks(ListTasksRequest::new(OWNER))
        .await?;

    assert_eq!(titles(&listed), vec!["urgent", "mine"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unregistered_user_cannot_create(seeded: Fixture) {
    let stranger = taskd::task::domain::TaskOwner::new(
        OWNER.account(),
        taskd::task::domain::UserId::new(999),
    );

    let result = seeded
        .service
        .create_task(CreateTaskRequest::new(stranger, "intruder"))
        .await;

    assert!(matches!(result, Err(TaskRuleError::UserDoesntExist { .. })));
    assert_eq!(seeded.store.stored_row_count().expect("row count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn yesterday_is_in_the_past(seeded: Fixture) {
    let result = seeded
        .service
        .create_task(CreateTaskRequest::new(OWNER, "late").with_due_date(utc_day(-1)))
        .await;

    assert_eq!(
        result.err().map(|err| err.kind()),
        Some(TaskErrorKind::DueDateInPast)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn read_sessions_see_live_rows_but_refuse_writes(
    seeded: Fixture,
) -> Result<(), eyre::Report> {
    seeded
        .service
        .create_task(CreateTaskRequest::new(OWNER, "existing"))
        .await?;
    let task = NewTask::new(
        OWNER,
        TaskDraft {
            title: TaskTitle::new("sneaky")?,
            description: TaskDescription::default(),
            priority: TaskPriority::default(),
            due_date: None,
        },
        &DefaultClock,
    );

    let outcome: Result<(bool, bool), TaskStoreError> = seeded
        .store
        .read(move |session| {
            let existing = TaskTitle::new("existing").map_err(TaskStoreError::persistence)?;
            let seen = session.title_in_use(OWNER, &existing, None)?;
            let refused = session.insert(&task).is_err();
            Ok((seen, refused))
        })
        .await;

    eyre::ensure!(outcome? == (true, true), "read session misbehaved");
    eyre::ensure!(seeded.store.stored_row_count()? == 1, "read session wrote a row");
    Ok(())
}
