//! Racing writers on the same title.

use super::helpers::{Fixture, OWNER, seeded};
use rstest::rstest;
use taskd::task::services::{CreateTaskRequest, ListTasksRequest, TaskErrorKind};

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_admit_exactly_one_title(seeded: Fixture) -> Result<(), eyre::Report> {
    let attempts = (0..8)
        .map(|_| {
            let service = seeded.service.clone();
            tokio::spawn(async move {
                service
                    .create_task(CreateTaskRequest::new(OWNER, "Buy milk"))
                    .await
            })
        })
        .collect::<Vec<_>>();

    let mut created = 0;
    let mut conflicts = 0;
    for attempt in attempts {
        match attempt.await? {
            Ok(_) => created += 1,
            Err(err) if err.kind() == TaskErrorKind::TitleAlreadyExists => conflicts += 1,
            Err(err) => return Err(err.into()),
        }
    }

    eyre::ensure!(created == 1, "expected one winner, got {created}");
    eyre::ensure!(conflicts == 7, "expected seven conflicts, got {conflicts}");
    let listed = seeded
        .service
        .list_tasks(ListTasksRequest::new(OWNER))
        .await?;
    eyre::ensure!(listed.len() == 1, "duplicate rows were stored");
    Ok(())
}
