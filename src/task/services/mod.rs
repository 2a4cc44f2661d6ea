//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, TaskChanges, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskOperation, TaskWithHistory,
};
