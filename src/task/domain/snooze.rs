//! Snooze presets and anchoring.

use super::ParseTaskValueError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Fixed postponement offsets offered on task cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnoozeOffset {
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    FifteenMinutes,
    /// One hour.
    #[serde(rename = "1h")]
    OneHour,
    /// One day.
    #[serde(rename = "1d")]
    OneDay,
    /// Three days.
    #[serde(rename = "3d")]
    ThreeDays,
    /// One week.
    #[serde(rename = "1w")]
    OneWeek,
}

impl SnoozeOffset {
    /// All presets in picker order.
    pub const ALL: [Self; 5] = [
        Self::FifteenMinutes,
        Self::OneHour,
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
    ];

    /// Returns the short code used for labels and callback payloads.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::OneWeek => "1w",
        }
    }

    /// Returns the offset length in minutes.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        match self {
            Self::FifteenMinutes => 15,
            Self::OneHour => 60,
            Self::OneDay => 60 * 24,
            Self::ThreeDays => 60 * 24 * 3,
            Self::OneWeek => 60 * 24 * 7,
        }
    }

    /// Returns the offset as a time delta.
    #[must_use]
    pub const fn delta(self) -> TimeDelta {
        TimeDelta::minutes(self.minutes())
    }
}

impl TryFrom<&str> for SnoozeOffset {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|offset| offset.code() == value)
            .ok_or_else(|| ParseTaskValueError::new("snooze offset", value))
    }
}

/// Reference point a snooze offset is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnoozeAnchor {
    /// Postpone from the current due date; undated tasks start from now.
    #[default]
    DueDate,
    /// Postpone from the current time regardless of the due date.
    Now,
}

impl SnoozeAnchor {
    /// Returns the instant the offset is applied to.
    #[must_use]
    pub fn resolve(self, due_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::DueDate => due_at.unwrap_or(now),
            Self::Now => now,
        }
    }
}
