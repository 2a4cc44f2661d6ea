//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Each test runs in its own schema on the database named by
//! `TASKSENSE_TEST_DATABASE_URL`; the schema is dropped when the context is.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use tasksense::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    services::TaskLifecycleService,
};
use uuid::Uuid;

/// Boxed error type for fallible test setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const DATABASE_URL_ENV: &str = "TASKSENSE_TEST_DATABASE_URL";

/// SQL creating the task tables.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-01-01-000000_create_tasks/up.sql");

/// Points every pooled connection at the test schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Repository and service bound to an isolated schema.
pub struct TaskTestContext {
    pub repository: Arc<PostgresTaskRepository>,
    pub service: TaskLifecycleService<PostgresTaskRepository, DefaultClock>,
    url: String,
    schema: String,
}

impl Drop for TaskTestContext {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.url)
            .map_err(BoxError::from)
            .and_then(|mut conn| {
                conn.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
                    .map_err(BoxError::from)
            });
        if let Err(err) = dropped {
            tracing::warn!(schema = %self.schema, error = %err, "failed to drop test schema");
        }
    }
}

/// Builds a context, or returns `None` when no test database is configured.
///
/// # Errors
///
/// Returns an error if the schema cannot be created or migrated.
pub fn task_context() -> Result<Option<TaskTestContext>, BoxError> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        return Ok(None);
    };
    let schema = format!("tasksense_test_{}", Uuid::new_v4().simple());

    let mut admin = PgConnection::establish(&url)?;
    admin.batch_execute(&format!(
        "CREATE SCHEMA {schema}; SET search_path TO {schema}; {CREATE_TASKS_SQL}"
    ))?;

    let pool: TaskPgPool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(schema.clone())))
        .build(ConnectionManager::<PgConnection>::new(url.clone()))?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));

    Ok(Some(TaskTestContext {
        repository,
        service,
        url,
        schema,
    }))
}
