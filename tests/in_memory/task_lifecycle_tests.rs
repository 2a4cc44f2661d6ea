//! In-memory integration tests for the task lifecycle.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tasksense::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskCategory, TaskFilter, TaskId, TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskChanges, TaskLifecycleService},
};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Asserts the listing holds exactly the expected identifiers, in order.
///
/// # Errors
///
/// Returns an error describing the mismatch.
fn assert_listing(found: &[Task], expected: &[TaskId]) -> Result<(), eyre::Report> {
    let ids: Vec<TaskId> = found.iter().map(Task::id).collect();
    eyre::ensure!(ids == expected, "expected {expected:?}, found {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_flows_from_creation_to_deletion(service: TestService) -> Result<(), eyre::Report> {
    let created = service
        .create(
            CreateTaskRequest::new("Conduct safety inspection")
                .with_description("Notify the department by 12/05/2026"),
        )
        .await?;
    eyre::ensure!(created.category() == TaskCategory::Safety, "category");
    eyre::ensure!(created.priority() == TaskPriority::Low, "priority");
    eyre::ensure!(
        created.extracted_entities().time_indicators == vec!["12/05/2026".to_owned()],
        "time indicators"
    );

    let started = service
        .update(
            created.id(),
            TaskChanges::new()
                .with_status(TaskStatus::InProgress)
                .with_assigned_to("Priya"),
        )
        .await?;
    eyre::ensure!(started.category() == TaskCategory::Safety, "category kept");

    let escalated = service
        .update(
            created.id(),
            TaskChanges::new().with_description("Emergency: report the hazard today"),
        )
        .await?;
    eyre::ensure!(escalated.priority() == TaskPriority::High, "priority raised");
    eyre::ensure!(
        escalated.extracted_entities().urgency_indicators
            == vec!["today".to_owned(), "emergency".to_owned()],
        "urgency indicators: {:?}",
        escalated.extracted_entities().urgency_indicators
    );

    let fetched = service.get_by_id(created.id()).await?;
    let fields: Vec<&str> = fetched
        .history
        .iter()
        .map(|entry| entry.field_name.as_str())
        .collect();
    eyre::ensure!(fields.len() == 4, "expected four history rows, found {fields:?}");
    eyre::ensure!(fields.contains(&"description"), "description change recorded");
    eyre::ensure!(fields.contains(&"priority"), "priority change recorded");

    service.delete(created.id()).await?;
    let stats = service.stats().await?;
    eyre::ensure!(stats.total == 0, "store should be empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_combines_filters(service: TestService) -> Result<(), eyre::Report> {
    let fix = service
        .create(CreateTaskRequest::new("Fix the login bug").with_assigned_to("Ana"))
        .await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let deploy = service
        .create(CreateTaskRequest::new("Deploy the server asap").with_assigned_to("Ana"))
        .await?;
    service
        .create(CreateTaskRequest::new("Pay the invoice").with_assigned_to("Ana"))
        .await?;

    let technical = service
        .list(
            &TaskFilter::new()
                .with_category(TaskCategory::Technical)
                .with_assigned_to("Ana"),
        )
        .await?;
    assert_listing(&technical, &[deploy.id(), fix.id()])?;

    let urgent = service
        .list(
            &TaskFilter::new()
                .with_category(TaskCategory::Technical)
                .with_priority(TaskPriority::High),
        )
        .await?;
    assert_listing(&urgent, &[deploy.id()])
}
