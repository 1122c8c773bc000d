//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock frozen at an instant that tests can move forward.
#[derive(Debug)]
pub struct FixedClock(RwLock<DateTime<Utc>>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(RwLock::new(instant))
    }

    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.0.write() {
            *now += delta;
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.read().map_or(DateTime::UNIX_EPOCH, |now| *now)
    }
}

/// 2026-03-10 09:00 UTC, a Tuesday.
pub fn tuesday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}
