//! Error reporting sink.
//!
//! Failures that users cannot recover from by themselves (storage outages,
//! broken templates) are handed to an [`ErrorReporter`] after the user has
//! been answered. The default reporter emits a structured `tracing` event.

use crate::dispatch::FailureKind;
use crate::user::domain::UserId;
use serde::Serialize;
use tracing::error;

/// Structured description of a failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Failure category.
    pub kind: FailureKind,
    /// User whose action failed.
    pub user: UserId,
    /// Kind of input being handled.
    pub input: &'static str,
    /// JSON snapshot of the user's pending interaction, if any.
    pub interaction: Option<String>,
    /// Error message.
    pub message: String,
}

/// Receives reports of failed actions.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    /// Records one failure.
    fn report(&self, report: &FailureReport);
}

/// Reporter that logs failures at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, report: &FailureReport) {
        error!(
            kind = report.kind.as_str(),
            user = %report.user,
            input = report.input,
            interaction = report.interaction.as_deref().unwrap_or("idle"),
            error = %report.message,
            "action failed"
        );
    }
}
