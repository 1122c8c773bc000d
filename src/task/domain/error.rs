//! Error types for task domain validation and parsing.

use super::{LifecycleAction, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task content is empty or too short after trimming.
    #[error("task content must contain at least {min} characters")]
    ContentTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },

    /// The task content exceeds the persisted column width.
    #[error("task content must not exceed {max} characters, got {actual}")]
    ContentTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },

    /// The requested lifecycle transition is not permitted from the current
    /// status.
    #[error("task {task_id} cannot {action} while {from}")]
    InvalidTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status at the time of the attempt.
        from: TaskStatus,
        /// Rejected lifecycle action.
        action: LifecycleAction,
    },

    /// A deletion ticket was presented for a different task.
    #[error("deletion ticket for task {ticket} does not match task {task_id}")]
    TicketMismatch {
        /// Task the ticket was issued for.
        ticket: TaskId,
        /// Task the ticket was presented to.
        task_id: TaskId,
    },

    /// Applying a snooze offset overflowed the supported date range.
    #[error("snoozing task {0} overflows the supported date range")]
    DueDateOverflow(TaskId),
}

/// Error returned while parsing task enumerations from persistence or
/// callback payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseTaskValueError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: String,
}

impl ParseTaskValueError {
    /// Creates a parse error for the named enumeration.
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
