use chrono::{Days, NaiveDate};

use crate::error::{Result, TrackerError};

pub const TOTAL_DAYS: u32 = 100;

/// The fixed span of days a challenge runs for, starting at `start` (day 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeWindow {
    pub start: NaiveDate,
    pub total_days: u32,
}

impl Default for ChallengeWindow {
    fn default() -> Self {
        Self::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default())
    }
}

impl ChallengeWindow {
    pub const fn new(start: NaiveDate) -> Self {
        Self { start, total_days: TOTAL_DAYS }
    }

    /// 1-based day number of `date`, or `None` when it falls outside the window.
    pub fn day_number(&self, date: NaiveDate) -> Option<u32> {
        let offset = (date - self.start).num_days();
        (0..i64::from(self.total_days)).contains(&offset).then(|| offset as u32 + 1)
    }

    /// Like [`day_number`](Self::day_number), but an error for dates outside the window.
    pub fn require_day(&self, date: NaiveDate) -> Result<u32> {
        self.day_number(date).ok_or_else(|| TrackerError::OutsideWindow {
            date,
            start: self.start,
            end: self.end(),
        })
    }

    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.total_days {
            return None;
        }
        self.start.checked_add_days(Days::new(u64::from(day - 1)))
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(u64::from(self.total_days.saturating_sub(1)))
    }

    /// Days `1..=day_number(as_of)`, clamped to the window; empty before the start.
    pub fn days_through(&self, as_of: NaiveDate) -> std::ops::RangeInclusive<u32> {
        let last = match self.day_number(as_of) {
            Some(d) => d,
            None if as_of > self.end() => self.total_days,
            None => 0,
        };
        1..=last
    }
}
