//! Task aggregate root and lifecycle policy.
//!
//! Status moves between `pending` and `done`. Deletion is a separate
//! two-step concern: [`Task::request_deletion`] issues a
//! [`DeletionTicket`] that must be presented back before the task may be
//! removed, and the task keeps its status while the ticket is outstanding.

use super::{
    ParseTaskValueError, SnoozeAnchor, SnoozeOffset, TaskContent, TaskDomainError, TaskId,
    TaskPriority,
};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet completed.
    #[default]
    Pending,
    /// Completed.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }

    /// Returns the one-letter code used in callback payloads.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Pending => 'o',
            Self::Done => 'd',
        }
    }

    /// Parses a one-letter callback code.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskValueError`] for unknown codes.
    pub fn from_code(code: char) -> Result<Self, ParseTaskValueError> {
        match code {
            'o' => Ok(Self::Pending),
            'd' => Ok(Self::Done),
            _ => Err(ParseTaskValueError::new("task status", code.to_string())),
        }
    }

    /// Returns the other status, used by the list-header toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Done,
            Self::Done => Self::Pending,
        }
    }

    /// Returns whether the lifecycle action is permitted from this status.
    ///
    /// Marking a done task as done is permitted and has no effect.
    #[must_use]
    pub const fn permits(self, action: LifecycleAction) -> bool {
        match action {
            LifecycleAction::MarkDone | LifecycleAction::Edit | LifecycleAction::Delete => true,
            LifecycleAction::Reopen => matches!(self, Self::Done),
            LifecycleAction::Snooze => matches!(self, Self::Pending),
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskValueError::new("task status", value)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle operations validated against the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    /// Complete the task.
    MarkDone,
    /// Return a completed task to pending.
    Reopen,
    /// Postpone the due date.
    Snooze,
    /// Replace the task content.
    Edit,
    /// Request or confirm removal.
    Delete,
}

impl LifecycleAction {
    /// Returns a human-readable verb phrase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MarkDone => "mark done",
            Self::Reopen => "reopen",
            Self::Snooze => "snooze",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof that deletion of a task was requested and awaits confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionTicket {
    task_id: TaskId,
    prior_status: TaskStatus,
}

impl DeletionTicket {
    /// Returns the task the ticket was issued for.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status the task had when deletion was requested.
    #[must_use]
    pub const fn prior_status(&self) -> TaskStatus {
        self.prior_status
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    content: TaskContent,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning user.
    pub owner: UserId,
    /// Persisted content.
    pub content: TaskContent,
    /// Persisted due instant, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if done.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn new(
        owner: UserId,
        content: TaskContent,
        due_at: Option<DateTime<Utc>>,
        priority: TaskPriority,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner,
            content,
            due_at,
            priority,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            content: data.content,
            due_at: data.due_at,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the task content.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the due instant, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, if done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns whether the task belongs to `user`.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Marks the task as done.
    ///
    /// Returns `true` when the status changed. Marking an already completed
    /// task leaves it untouched and returns `false`.
    pub fn mark_done(&mut self, clock: &impl Clock) -> bool {
        if self.status == TaskStatus::Done {
            return false;
        }
        let now = clock.utc();
        self.status = TaskStatus::Done;
        self.completed_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Returns a completed task to pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is not
    /// done.
    pub fn reopen(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.guard(LifecycleAction::Reopen)?;
        self.status = TaskStatus::Pending;
        self.completed_at = None;
        self.touch(clock);
        Ok(())
    }

    /// Postpones the due date by a fixed offset.
    ///
    /// Returns the new due instant. Status is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is done
    /// and [`TaskDomainError::DueDateOverflow`] when the result is out of
    /// range.
    pub fn snooze(
        &mut self,
        offset: SnoozeOffset,
        anchor: SnoozeAnchor,
        clock: &impl Clock,
    ) -> Result<DateTime<Utc>, TaskDomainError> {
        self.guard(LifecycleAction::Snooze)?;
        let now = clock.utc();
        let new_due = anchor
            .resolve(self.due_at, now)
            .checked_add_signed(offset.delta())
            .ok_or(TaskDomainError::DueDateOverflow(self.id))?;
        self.due_at = Some(new_due);
        self.updated_at = now;
        Ok(new_due)
    }

    /// Replaces the task content.
    pub fn edit_content(&mut self, content: TaskContent, clock: &impl Clock) {
        self.content = content;
        self.touch(clock);
    }

    /// Issues a ticket that must be confirmed before the task is removed.
    #[must_use]
    pub const fn request_deletion(&self) -> DeletionTicket {
        DeletionTicket {
            task_id: self.id,
            prior_status: self.status,
        }
    }

    /// Validates a deletion ticket against this task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TicketMismatch`] when the ticket was issued
    /// for another task.
    pub fn accept_deletion(&self, ticket: &DeletionTicket) -> Result<(), TaskDomainError> {
        if ticket.task_id != self.id {
            return Err(TaskDomainError::TicketMismatch {
                ticket: ticket.task_id,
                task_id: self.id,
            });
        }
        Ok(())
    }

    fn guard(&self, action: LifecycleAction) -> Result<(), TaskDomainError> {
        if self.status.permits(action) {
            return Ok(());
        }
        Err(TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.status,
            action,
        })
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
