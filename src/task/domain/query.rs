//! Listing queries and result pages.

use super::{DueWindow, ParseTaskValueError, Task, TaskPriority, TaskStatus};
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};

/// Priority filter selectable on the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFilter {
    /// No restriction.
    #[default]
    All,
    /// Only tasks of the given priority.
    Only(TaskPriority),
}

impl PriorityFilter {
    /// Returns the one-letter code used in callback payloads.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::All => 'A',
            Self::Only(priority) => priority.code(),
        }
    }

    /// Parses a one-letter callback code.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskValueError`] for unknown codes.
    pub fn from_code(code: char) -> Result<Self, ParseTaskValueError> {
        if code == 'A' {
            return Ok(Self::All);
        }
        TaskPriority::from_code(code)
            .map(Self::Only)
            .ok_or_else(|| ParseTaskValueError::new("priority filter", code.to_string()))
    }

    /// Returns the next filter in the list-header cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Only(TaskPriority::High),
            Self::Only(TaskPriority::High) => Self::Only(TaskPriority::Medium),
            Self::Only(TaskPriority::Medium) => Self::Only(TaskPriority::Low),
            Self::Only(TaskPriority::Low) => Self::All,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All priorities",
            Self::Only(TaskPriority::High) => "High",
            Self::Only(TaskPriority::Medium) => "Medium",
            Self::Only(TaskPriority::Low) => "Low",
        }
    }

    /// Returns the priority the filter restricts to, if any.
    #[must_use]
    pub const fn priority(self) -> Option<TaskPriority> {
        match self {
            Self::All => None,
            Self::Only(priority) => Some(priority),
        }
    }
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a page request; zero values are raised to one.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the number of records preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Returns the number of pages needed for `total` records, at least one.
    #[must_use]
    pub fn page_count(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Returns this request moved to `page`.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self::new(page, self.per_page)
    }
}

/// Filtered, paginated listing request for one user's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskQuery {
    /// Owner whose tasks are listed.
    pub owner: UserId,
    /// Status restriction, if any.
    pub status: Option<TaskStatus>,
    /// Priority restriction, if any.
    pub priority: Option<TaskPriority>,
    /// Due-date restriction.
    pub due: DueWindow,
    /// Requested page.
    pub page: PageRequest,
}

impl TaskQuery {
    /// Creates an unfiltered query for `owner`.
    #[must_use]
    pub fn for_owner(owner: UserId, page: PageRequest) -> Self {
        Self {
            owner,
            status: None,
            priority: None,
            due: DueWindow::Any,
            page,
        }
    }

    /// Restricts the query to a status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the query to a priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Option<TaskPriority>) -> Self {
        self.priority = priority;
        self
    }

    /// Restricts the query to a due window.
    #[must_use]
    pub const fn with_due(mut self, due: DueWindow) -> Self {
        self.due = due;
        self
    }

    /// Returns whether a task satisfies every filter of the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.owner() == self.owner
            && self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.due.contains(task.due_at())
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// Tasks on the requested page, in listing order.
    pub tasks: Vec<Task>,
    /// Number of tasks matching the query across all pages.
    pub total: u64,
    /// The page that was served.
    pub page: PageRequest,
}

impl TaskPage {
    /// Returns the number of pages for the query.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page.page_count(self.total)
    }

    /// Returns whether a following page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.page() < self.page_count()
    }

    /// Returns whether a preceding page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page.page() > 1
    }
}
