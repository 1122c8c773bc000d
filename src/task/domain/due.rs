//! Due-date buckets, filters, and the local calendar they are computed in.
//!
//! Buckets are derived at render time and never persisted. All boundaries
//! are computed in the configured local offset so that "today" matches the
//! user's wall clock.

use super::{ParseTaskValueError, TaskStatus};
use chrono::{
    DateTime, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, Utc,
};
use serde::{Deserialize, Serialize};

/// Length of the "this week" window in days, starting today.
const WEEK_DAYS: i64 = 7;

/// Wall-clock time assigned to date-only due dates.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// Fixed-offset calendar used for day boundaries and date input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCalendar {
    offset: FixedOffset,
}

impl LocalCalendar {
    /// Creates a calendar from an offset east of UTC in minutes.
    ///
    /// Returns `None` when the offset is outside ±24 hours.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(seconds).map(|offset| Self { offset })
    }

    /// Returns the configured offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Converts an instant into local wall-clock time.
    #[must_use]
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// Returns the local calendar date of an instant.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date_naive()
    }

    /// Returns the UTC instant of local midnight starting the day of `instant`.
    ///
    /// Returns `None` when that midnight lies before the representable range.
    #[must_use]
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.local_to_utc(self.local_date(instant).and_time(NaiveTime::MIN))
    }

    /// Returns the UTC instant of the local wall-clock time given.
    ///
    /// Returns `None` when the shifted instant is out of range.
    #[must_use]
    pub fn local_to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        let shift = TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        local
            .checked_sub_signed(shift)
            .map(|utc| DateTime::from_naive_utc_and_offset(utc, Utc))
    }

    /// Returns end of the local day `days_ahead` days after `now`'s date.
    #[must_use]
    pub fn end_of_day_in(&self, now: DateTime<Utc>, days_ahead: u64) -> Option<DateTime<Utc>> {
        let date = self.local_date(now).checked_add_days(Days::new(days_ahead))?;
        self.local_to_utc(date.and_time(end_of_day()))
    }

    /// Returns local midnight today and the instant `days` later, saturating
    /// at the ends of the representable range.
    fn days_from_today(&self, now: DateTime<Utc>, days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = self.start_of_day(now).unwrap_or(DateTime::<Utc>::MIN_UTC);
        let end = today
            .checked_add_signed(TimeDelta::days(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (today, end)
    }

    /// Parses user-entered local dates.
    ///
    /// Accepts `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`; a bare date means the end
    /// of that local day. Returns `None` for anything else.
    #[must_use]
    pub fn parse_local(&self, input: &str) -> Option<DateTime<Utc>> {
        let trimmed = input.trim();
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
            return self.local_to_utc(local);
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| self.local_to_utc(date.and_time(end_of_day())))
    }
}

impl Default for LocalCalendar {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }
}

/// Derived display category of a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    /// Pending and past its due instant.
    Overdue,
    /// Due within the current local day.
    Today,
    /// Due within the next seven local days, excluding today.
    ThisWeek,
    /// Due after the current week window.
    Later,
    /// Completed task whose due instant lies before today.
    Past,
    /// No due date.
    NoDate,
}

impl DueBucket {
    /// Classifies a due date relative to `now`.
    ///
    /// A pending task whose due instant has passed is `Overdue` even when it
    /// fell earlier on the current day.
    #[must_use]
    pub fn classify(
        due_at: Option<DateTime<Utc>>,
        status: TaskStatus,
        now: DateTime<Utc>,
        calendar: &LocalCalendar,
    ) -> Self {
        let Some(due) = due_at else {
            return Self::NoDate;
        };
        let (today, tomorrow) = calendar.days_from_today(now, 1);
        let (_, week_end) = calendar.days_from_today(now, WEEK_DAYS);

        if due < now {
            return match status {
                TaskStatus::Pending => Self::Overdue,
                TaskStatus::Done if due >= today => Self::Today,
                TaskStatus::Done => Self::Past,
            };
        }
        if due < tomorrow {
            Self::Today
        } else if due < week_end {
            Self::ThisWeek
        } else {
            Self::Later
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
            Self::Later => "Later",
            Self::Past => "Past",
            Self::NoDate => "No date",
        }
    }
}

/// Due-date filter selectable on the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueFilter {
    /// No restriction.
    #[default]
    All,
    /// Due within the current local day.
    Today,
    /// Due within seven local days starting today.
    ThisWeek,
    /// Due before now.
    Overdue,
    /// Without a due date.
    NoDate,
}

impl DueFilter {
    /// Returns the one-letter code used in callback payloads.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::All => 'A',
            Self::Today => 'T',
            Self::ThisWeek => 'W',
            Self::Overdue => 'O',
            Self::NoDate => 'N',
        }
    }

    /// Parses a one-letter callback code.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskValueError`] for unknown codes.
    pub fn from_code(code: char) -> Result<Self, ParseTaskValueError> {
        match code {
            'A' => Ok(Self::All),
            'T' => Ok(Self::Today),
            'W' => Ok(Self::ThisWeek),
            'O' => Ok(Self::Overdue),
            'N' => Ok(Self::NoDate),
            _ => Err(ParseTaskValueError::new("due filter", code.to_string())),
        }
    }

    /// Returns the next filter in the list-header cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Today,
            Self::Today => Self::ThisWeek,
            Self::ThisWeek => Self::Overdue,
            Self::Overdue => Self::NoDate,
            Self::NoDate => Self::All,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All dates",
            Self::Today => "Today",
            Self::ThisWeek => "This week",
            Self::Overdue => "Overdue",
            Self::NoDate => "No date",
        }
    }

    /// Resolves the filter into a concrete window relative to `now`.
    #[must_use]
    pub fn window(self, now: DateTime<Utc>, calendar: &LocalCalendar) -> DueWindow {
        let between = |days| {
            let (start, end) = calendar.days_from_today(now, days);
            DueWindow::Between { start, end }
        };
        match self {
            Self::All => DueWindow::Any,
            Self::Today => between(1),
            Self::ThisWeek => between(WEEK_DAYS),
            Self::Overdue => DueWindow::Before(now),
            Self::NoDate => DueWindow::Missing,
        }
    }
}

/// Concrete due-date restriction applied by task repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueWindow {
    /// Any due date, including none.
    #[default]
    Any,
    /// Due at or after `start` and strictly before `end`.
    Between {
        /// Inclusive lower bound.
        start: DateTime<Utc>,
        /// Exclusive upper bound.
        end: DateTime<Utc>,
    },
    /// Due strictly before the instant.
    Before(DateTime<Utc>),
    /// No due date set.
    Missing,
}

impl DueWindow {
    /// Returns whether a due date satisfies the window.
    #[must_use]
    pub fn contains(&self, due_at: Option<DateTime<Utc>>) -> bool {
        match (*self, due_at) {
            (Self::Any, _) => true,
            (Self::Missing, due) => due.is_none(),
            (Self::Between { start, end }, Some(due)) => due >= start && due < end,
            (Self::Before(limit), Some(due)) => due < limit,
            (Self::Between { .. } | Self::Before(_), None) => false,
        }
    }
}
