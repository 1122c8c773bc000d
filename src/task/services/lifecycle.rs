//! Service layer for user-scoped task management.

use crate::task::{
    domain::{
        DeletionTicket, DueFilter, LocalCalendar, PageRequest, PriorityFilter, SnoozeAnchor,
        SnoozeOffset, Task, TaskContent, TaskDomainError, TaskId, TaskPage, TaskPriority,
        TaskQuery, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Default number of tasks per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Tunable lifecycle and listing behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPolicy {
    /// Reference point for snooze offsets.
    pub snooze_anchor: SnoozeAnchor,
    /// Calendar used for due-date filters.
    pub calendar: LocalCalendar,
    /// Number of tasks per listing page.
    pub page_size: u32,
}

impl Default for TaskPolicy {
    fn default() -> Self {
        Self {
            snooze_anchor: SnoozeAnchor::default(),
            calendar: LocalCalendar::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner: UserId,
    content: String,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and default priority.
    #[must_use]
    pub fn new(owner: UserId, content: impl Into<String>) -> Self {
        Self {
            owner,
            content: content.into(),
            due_at: None,
            priority: TaskPriority::default(),
        }
    }

    /// Sets the due instant.
    #[must_use]
    pub const fn with_due(mut self, due_at: Option<DateTime<Utc>>) -> Self {
        self.due_at = due_at;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Listing selection for one user's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListTasksRequest {
    /// Status shown.
    pub status: TaskStatus,
    /// Priority filter.
    pub priority: PriorityFilter,
    /// Due-date filter.
    pub due: DueFilter,
    /// Requested one-based page.
    pub page: u32,
}

/// Open and completed task counts for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSummary {
    /// Number of pending tasks.
    pub open: u64,
    /// Number of completed tasks.
    pub done: u64,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The task belongs to another user.
    #[error("task {task_id} is not accessible to user {user}")]
    Forbidden {
        /// Requested task.
        task_id: TaskId,
        /// Requesting user.
        user: UserId,
    },
}

/// Result type for task service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// User-scoped task orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new service with the default policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            policy: TaskPolicy::default(),
        }
    }

    /// Replaces the lifecycle policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: TaskPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &TaskPolicy {
        &self.policy
    }

    /// Creates a pending task for the requesting user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the content is invalid or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let content = TaskContent::new(request.content)?;
        let task = Task::new(
            request.owner,
            content,
            request.due_at,
            request.priority,
            &*self.clock,
        );
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), user = %task.owner(), priority = %task.priority(), "task created");
        Ok(task)
    }

    /// Retrieves a task owned by `user`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Forbidden`] when it belongs to another user.
    pub async fn get(&self, user: UserId, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        if !task.is_owned_by(user) {
            return Err(TaskLifecycleError::Forbidden { task_id: id, user });
        }
        Ok(task)
    }

    /// Lists one page of the user's tasks.
    ///
    /// A page past the end is clamped to the last non-empty page.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the query fails.
    pub async fn list(
        &self,
        user: UserId,
        request: &ListTasksRequest,
    ) -> TaskLifecycleResult<TaskPage> {
        let now = self.clock.utc();
        let page = PageRequest::new(request.page, self.policy.page_size);
        let query = TaskQuery::for_owner(user, page)
            .with_status(request.status)
            .with_priority(request.priority.priority())
            .with_due(request.due.window(now, &self.policy.calendar));

        let result = self.repository.list(&query).await?;
        let last_page = result.page_count();
        if page.page() <= last_page {
            return Ok(result);
        }
        debug!(user = %user, requested = page.page(), last_page, "clamping listing page");
        let clamped = TaskQuery {
            page: page.with_page(last_page),
            ..query
        };
        Ok(self.repository.list(&clamped).await?)
    }

    /// Returns the user's open and completed task counts.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when a count query fails.
    pub async fn summary(&self, user: UserId) -> TaskLifecycleResult<TaskSummary> {
        let page = PageRequest::new(1, 1);
        let open = self
            .repository
            .list(&TaskQuery::for_owner(user, page).with_status(TaskStatus::Pending))
            .await?
            .total;
        let done = self
            .repository
            .list(&TaskQuery::for_owner(user, page).with_status(TaskStatus::Done))
            .await?
            .total;
        Ok(TaskSummary { open, done })
    }

    /// Marks a task as done.
    ///
    /// Completing an already completed task succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing, not owned by
    /// `user`, or cannot be persisted.
    pub async fn mark_done(&self, user: UserId, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.get(user, id).await?;
        if task.mark_done(&*self.clock) {
            self.repository.update(&task).await?;
            info!(task_id = %id, user = %user, "task marked done");
        } else {
            debug!(task_id = %id, user = %user, "task already done");
        }
        Ok(task)
    }

    /// Returns a completed task to pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is still pending,
    /// plus the lookup and persistence failures of [`Self::get`].
    pub async fn reopen(&self, user: UserId, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.get(user, id).await?;
        task.reopen(&*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %id, user = %user, "task reopened");
        Ok(task)
    }

    /// Postpones a pending task's due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the task is done, plus the
    /// lookup and persistence failures of [`Self::get`].
    pub async fn snooze(
        &self,
        user: UserId,
        id: TaskId,
        offset: SnoozeOffset,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get(user, id).await?;
        let due = task.snooze(offset, self.policy.snooze_anchor, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(task_id = %id, user = %user, offset = offset.code(), due = %due, "task snoozed");
        Ok(task)
    }

    /// Replaces a task's content.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the content is invalid,
    /// plus the lookup and persistence failures of [`Self::get`].
    pub async fn edit_content(
        &self,
        user: UserId,
        id: TaskId,
        text: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Task> {
        let content = TaskContent::new(text)?;
        let mut task = self.get(user, id).await?;
        task.edit_content(content, &*self.clock);
        self.repository.update(&task).await?;
        info!(task_id = %id, user = %user, "task content edited");
        Ok(task)
    }

    /// Starts the two-step deletion of a task.
    ///
    /// The task is left untouched until the ticket is confirmed. Returns the
    /// task with its ticket so callers can show what is being deleted.
    ///
    /// # Errors
    ///
    /// Returns the lookup failures of [`Self::get`].
    pub async fn request_deletion(
        &self,
        user: UserId,
        id: TaskId,
    ) -> TaskLifecycleResult<(Task, DeletionTicket)> {
        let task = self.get(user, id).await?;
        debug!(task_id = %id, user = %user, "deletion requested");
        let ticket = task.request_deletion();
        Ok((task, ticket))
    }

    /// Removes a task for which deletion was requested.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing, not owned by
    /// `user`, does not match the ticket, or cannot be removed.
    pub async fn confirm_deletion(
        &self,
        user: UserId,
        ticket: &DeletionTicket,
    ) -> TaskLifecycleResult<()> {
        let task = self.get(user, ticket.task_id()).await?;
        task.accept_deletion(ticket)?;
        self.repository.delete(task.id()).await?;
        info!(task_id = %task.id(), user = %user, "task deleted");
        Ok(())
    }

    /// Abandons a deletion request, returning the task as it stands.
    ///
    /// # Errors
    ///
    /// Returns the lookup failures of [`Self::get`], or
    /// [`TaskLifecycleError::Domain`] when the ticket does not match.
    pub async fn cancel_deletion(
        &self,
        user: UserId,
        ticket: &DeletionTicket,
    ) -> TaskLifecycleResult<Task> {
        let task = self.get(user, ticket.task_id()).await?;
        task.accept_deletion(ticket)?;
        debug!(task_id = %task.id(), user = %user, status = %task.status(), "deletion cancelled");
        Ok(task)
    }
}
