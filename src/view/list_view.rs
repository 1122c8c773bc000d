//! Listing selection carried through listing callbacks.

use crate::task::domain::{DueFilter, PriorityFilter, TaskStatus};
use crate::task::services::ListTasksRequest;
use serde::{Deserialize, Serialize};

/// Status, page, and filters of a task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListView {
    /// Status shown.
    pub status: TaskStatus,
    /// One-based page.
    pub page: u32,
    /// Priority filter.
    pub priority: PriorityFilter,
    /// Due-date filter.
    pub due: DueFilter,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            status: TaskStatus::Pending,
            page: 1,
            priority: PriorityFilter::All,
            due: DueFilter::All,
        }
    }
}

impl ListView {
    /// Returns the service request for this selection.
    #[must_use]
    pub const fn request(&self) -> ListTasksRequest {
        ListTasksRequest {
            status: self.status,
            priority: self.priority,
            due: self.due,
            page: self.page,
        }
    }

    /// Returns the same selection on another page.
    #[must_use]
    pub fn at_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    /// Switches between pending and done, back to the first page.
    #[must_use]
    pub const fn toggled_status(self) -> Self {
        Self {
            status: self.status.toggled(),
            page: 1,
            ..self
        }
    }

    /// Advances the priority filter, back to the first page.
    #[must_use]
    pub const fn next_priority(self) -> Self {
        Self {
            priority: self.priority.next(),
            page: 1,
            ..self
        }
    }

    /// Advances the due-date filter, back to the first page.
    #[must_use]
    pub const fn next_due(self) -> Self {
        Self {
            due: self.due.next(),
            page: 1,
            ..self
        }
    }
}
