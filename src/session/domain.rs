//! Pending interaction states.

use crate::task::domain::{DeletionTicket, TaskContent, TaskId};
use crate::view::ListView;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Steps of the add-task conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum AddTaskStep {
    /// Waiting for the task text.
    AwaitingContent,
    /// Waiting for a due-date choice.
    AwaitingDue {
        /// Validated task text.
        content: TaskContent,
    },
    /// Waiting for a typed due date.
    AwaitingCustomDue {
        /// Validated task text.
        content: TaskContent,
    },
    /// Waiting for a priority choice.
    AwaitingPriority {
        /// Validated task text.
        content: TaskContent,
        /// Chosen due instant, if any.
        due: Option<DateTime<Utc>>,
    },
}

/// Multi-step interaction a user is part-way through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum PendingInteraction {
    /// Creating a task.
    AddingTask {
        /// Current step.
        step: AddTaskStep,
    },
    /// Waiting for replacement text for a task.
    EditingContent {
        /// Task being edited.
        task_id: TaskId,
        /// Listing to return to.
        view: ListView,
    },
    /// Waiting for the user to confirm or cancel a deletion.
    ConfirmingDelete {
        /// Outstanding deletion ticket.
        ticket: DeletionTicket,
        /// Listing to return to.
        view: ListView,
    },
}

impl PendingInteraction {
    /// Starts the add-task conversation.
    #[must_use]
    pub const fn start_adding() -> Self {
        Self::AddingTask {
            step: AddTaskStep::AwaitingContent,
        }
    }

    /// Returns a short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AddingTask { step } => match step {
                AddTaskStep::AwaitingContent => "adding_task.content",
                AddTaskStep::AwaitingDue { .. } => "adding_task.due",
                AddTaskStep::AwaitingCustomDue { .. } => "adding_task.custom_due",
                AddTaskStep::AwaitingPriority { .. } => "adding_task.priority",
            },
            Self::EditingContent { .. } => "editing_content",
            Self::ConfirmingDelete { .. } => "confirming_delete",
        }
    }
}
