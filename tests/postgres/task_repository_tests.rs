//! `PostgreSQL` integration tests for the task repository.

use super::helpers::{BoxError, DATABASE_URL_ENV, TaskTestContext, task_context};
use mockable::DefaultClock;
use std::sync::Arc;
use tasksense::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        Task, TaskCategory, TaskFilter, TaskHistoryEntry, TaskId, TaskPriority, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskChanges, TaskLifecycleService},
};

fn context_or_skip() -> Result<Option<TaskTestContext>, BoxError> {
    let context = task_context()?;
    if context.is_none() {
        tracing::warn!("{DATABASE_URL_ENV} not set; skipping PostgreSQL test");
    }
    Ok(context)
}

#[tokio::test(flavor = "multi_thread")]
async fn create_persists_classification_as_jsonb() -> Result<(), BoxError> {
    let Some(context) = context_or_skip()? else {
        return Ok(());
    };

    let created = context
        .service
        .create(
            CreateTaskRequest::new("Urgent meeting with Alice")
                .with_description("call before 3:30pm"),
        )
        .await?;
    let stored = context
        .repository
        .find_by_id(created.id())
        .await?
        .ok_or("created task should be stored")?;

    assert_eq!(stored.category(), TaskCategory::Scheduling);
    assert_eq!(stored.priority(), TaskPriority::High);
    assert_eq!(stored.extracted_entities(), created.extracted_entities());
    assert_eq!(stored.suggested_actions(), created.suggested_actions());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_writes_history_and_reclassifies() -> Result<(), BoxError> {
    let Some(context) = context_or_skip()? else {
        return Ok(());
    };

    let created = context
        .service
        .create(CreateTaskRequest::new("Review notes"))
        .await?;
    let updated = context
        .service
        .update(
            created.id(),
            TaskChanges::new()
                .with_title("Fix the server bug asap")
                .with_status(TaskStatus::InProgress),
        )
        .await?;
    assert_eq!(updated.category(), TaskCategory::Technical);

    let fetched = context.service.get_by_id(created.id()).await?;
    let mut fields: Vec<&str> = fetched
        .history
        .iter()
        .map(|entry| entry.field_name.as_str())
        .collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["category", "priority", "status", "title"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn history_from_one_update_matches_memory_order() -> Result<(), BoxError> {
    let Some(context) = context_or_skip()? else {
        return Ok(());
    };
    let memory = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    );
    let changes = || {
        TaskChanges::new()
            .with_title("Fix the server bug asap")
            .with_status(TaskStatus::InProgress)
            .with_assigned_to("Alice")
    };

    let stored = context
        .service
        .create(CreateTaskRequest::new("Review notes"))
        .await?;
    context.service.update(stored.id(), changes()).await?;
    let in_memory = memory.create(CreateTaskRequest::new("Review notes")).await?;
    memory.update(in_memory.id(), changes()).await?;

    let field_order = |history: Vec<TaskHistoryEntry>| -> Vec<String> {
        history.into_iter().map(|entry| entry.field_name).collect()
    };
    let postgres_order = field_order(context.service.get_by_id(stored.id()).await?.history);
    let memory_order = field_order(memory.get_by_id(in_memory.id()).await?.history);

    assert_eq!(postgres_order.len(), 5);
    assert_eq!(postgres_order, memory_order);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn list_filters_in_sql() -> Result<(), BoxError> {
    let Some(context) = context_or_skip()? else {
        return Ok(());
    };

    context
        .service
        .create(CreateTaskRequest::new("Pay the invoice").with_assigned_to("Ana"))
        .await?;
    let fix = context
        .service
        .create(CreateTaskRequest::new("Fix the bug").with_assigned_to("Ana"))
        .await?;

    let found = context
        .repository
        .list(
            &TaskFilter::new()
                .with_category(TaskCategory::Technical)
                .with_assigned_to("Ana"),
        )
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found.first().map(Task::id), Some(fix.id()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_missing_rows() -> Result<(), BoxError> {
    let Some(context) = context_or_skip()? else {
        return Ok(());
    };

    let missing = TaskId::new();
    let err = context
        .repository
        .delete(missing)
        .await
        .err()
        .ok_or("deleting a missing task should fail")?;

    assert!(matches!(err, TaskRepositoryError::NotFound(id) if id == missing));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn summaries_feed_stats() -> Result<(), BoxError> {
    let Some(context) = context_or_skip()? else {
        return Ok(());
    };

    context
        .service
        .create(CreateTaskRequest::new("Safety inspection today"))
        .await?;
    let stats = context.service.stats().await?;

    assert_eq!(stats.total, 1);
    assert_eq!(stats.by_category.get(&TaskCategory::Safety), Some(&1));
    assert_eq!(stats.by_priority.get(&TaskPriority::High), Some(&1));
    Ok(())
}
