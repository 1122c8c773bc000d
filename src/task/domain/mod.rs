//! Domain model for personal task management.
//!
//! Tasks belong to a single user and move between `pending` and `done`.
//! Due-date buckets and filters are derived from a [`LocalCalendar`] at read
//! time. Infrastructure concerns stay outside of this module.

mod due;
mod error;
mod ids;
mod priority;
mod query;
mod snooze;
mod task;

pub use due::{DueBucket, DueFilter, DueWindow, LocalCalendar};
pub use error::{ParseTaskValueError, TaskDomainError};
pub use ids::{MAX_CONTENT_CHARS, MIN_CONTENT_CHARS, TaskContent, TaskId};
pub use priority::TaskPriority;
pub use query::{PageRequest, PriorityFilter, TaskPage, TaskQuery};
pub use snooze::{SnoozeAnchor, SnoozeOffset};
pub use task::{DeletionTicket, LifecycleAction, PersistedTaskData, Task, TaskStatus};
