//! Application services for task orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, DEFAULT_PAGE_SIZE, ListTasksRequest, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService, TaskPolicy, TaskSummary,
};
