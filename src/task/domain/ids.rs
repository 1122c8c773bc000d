//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum task content length in characters.
pub const MIN_CONTENT_CHARS: usize = 2;

/// Maximum task content length, matching the `VARCHAR(255)` column.
pub const MAX_CONTENT_CHARS: usize = 255;

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Returns the 32-character hyphenless form used in callback payloads.
    #[must_use]
    pub fn to_compact(self) -> String {
        self.0.simple().to_string()
    }

    /// Parses either the compact or the hyphenated form.
    ///
    /// Returns `None` when the value is not a UUID.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::try_parse(value).ok().map(Self)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated task text.
///
/// Content is trimmed and must hold between [`MIN_CONTENT_CHARS`] and
/// [`MAX_CONTENT_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskContent(String);

impl TaskContent {
    /// Creates validated task content.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ContentTooShort`] or
    /// [`TaskDomainError::ContentTooLong`] when the trimmed value falls
    /// outside the accepted length range.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let length = normalized.chars().count();

        if length < MIN_CONTENT_CHARS {
            return Err(TaskDomainError::ContentTooShort {
                min: MIN_CONTENT_CHARS,
            });
        }
        if length > MAX_CONTENT_CHARS {
            return Err(TaskDomainError::ContentTooLong {
                max: MAX_CONTENT_CHARS,
                actual: length,
            });
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the content as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<TaskContent> for String {
    fn from(content: TaskContent) -> Self {
        content.0
    }
}

impl AsRef<str> for TaskContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
