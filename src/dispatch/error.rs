//! Dispatch failures and their user-facing classification.

use crate::task::domain::TaskDomainError;
use crate::task::ports::TaskRepositoryError;
use crate::task::services::TaskLifecycleError;
use crate::user::ports::UserRepositoryError;
use serde::Serialize;
use thiserror::Error;

/// Failure categories shown to users and reported to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The task does not exist.
    NotFound,
    /// The task belongs to someone else.
    Forbidden,
    /// The action is not valid in the task's current status.
    InvalidTransition,
    /// Input that matches no command, menu entry, or flow.
    UnknownAction,
    /// Content or date input failed validation.
    InvalidInput,
    /// The store could not complete the operation.
    StorageFailure,
    /// A bundled template failed to render.
    Rendering,
}

impl FailureKind {
    /// Returns whether failures of this kind go to the error reporter.
    #[must_use]
    pub const fn is_reported(self) -> bool {
        matches!(self, Self::StorageFailure | Self::Rendering)
    }

    /// Returns the stable name used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidTransition => "invalid_transition",
            Self::UnknownAction => "unknown_action",
            Self::InvalidInput => "invalid_input",
            Self::StorageFailure => "storage_failure",
            Self::Rendering => "rendering",
        }
    }
}

/// Errors raised while handling one inbound action.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A task operation failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
    /// The user directory failed.
    #[error(transparent)]
    UserDirectory(#[from] UserRepositoryError),
    /// A template failed to render.
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),
    /// The input matched nothing.
    #[error("unrecognised input: {0}")]
    UnknownAction(String),
    /// The input was rejected for the current step.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DispatchError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Lifecycle(err) => lifecycle_kind(err),
            Self::UserDirectory(_) => FailureKind::StorageFailure,
            Self::Render(_) => FailureKind::Rendering,
            Self::UnknownAction(_) => FailureKind::UnknownAction,
            Self::InvalidInput(_) => FailureKind::InvalidInput,
        }
    }
}

const fn lifecycle_kind(err: &TaskLifecycleError) -> FailureKind {
    match err {
        TaskLifecycleError::NotFound(_)
        | TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_)) => FailureKind::NotFound,
        TaskLifecycleError::Forbidden { .. } => FailureKind::Forbidden,
        TaskLifecycleError::Domain(
            TaskDomainError::InvalidTransition { .. } | TaskDomainError::TicketMismatch { .. },
        ) => FailureKind::InvalidTransition,
        TaskLifecycleError::Domain(
            TaskDomainError::ContentTooShort { .. }
            | TaskDomainError::ContentTooLong { .. }
            | TaskDomainError::DueDateOverflow(_),
        ) => FailureKind::InvalidInput,
        TaskLifecycleError::Repository(
            TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::Persistence(_),
        ) => FailureKind::StorageFailure,
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
