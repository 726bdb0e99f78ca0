//! Streaks derived from the daily log, where any day without logged activity eliminates the
//! running streak.
//!
//! These are recomputed from history rather than read from the stored `Day Streak` column,
//! so they stay correct when runs were skipped or repeated.

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::challenge::ChallengeWindow;
use crate::daily_log::DailyLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    /// No zero day so far, not counting `as_of` while it is still empty.
    pub alive: bool,
    /// First challenge day with no activity.
    pub eliminated_on: Option<u32>,
    pub active_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakRow {
    pub handle: String,
    pub current: u32,
    pub longest: u32,
    pub standing: Standing,
}

fn activity(log: &DailyLog, handle: &str, window: &ChallengeWindow, as_of: NaiveDate) -> Vec<bool> {
    window
        .days_through(as_of)
        .map(|day| window.date_of(day).is_some_and(|date| log.solved_on(handle, date) > 0))
        .collect()
}

/// Consecutive active days ending at `as_of`, or at the day before if `as_of` has no activity yet.
pub fn current_streak(
    log: &DailyLog,
    handle: &str,
    window: &ChallengeWindow,
    as_of: NaiveDate,
) -> u32 {
    let mut days = activity(log, handle, window, as_of);
    if window.day_number(as_of).is_some() && days.last() == Some(&false) {
        days.pop();
    }
    days.iter().rev().take_while(|&&a| a).count() as u32
}

pub fn longest_streak(
    log: &DailyLog,
    handle: &str,
    window: &ChallengeWindow,
    as_of: NaiveDate,
) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for active in activity(log, handle, window, as_of) {
        run = if active { run + 1 } else { 0 };
        longest = longest.max(run);
    }
    longest
}

pub fn standing(
    log: &DailyLog,
    handle: &str,
    window: &ChallengeWindow,
    as_of: NaiveDate,
) -> Standing {
    let days = activity(log, handle, window, as_of);
    let pending = window.day_number(as_of).is_some() && days.last() == Some(&false);
    let judged = if pending { &days[..days.len() - 1] } else { &days[..] };

    let eliminated_on = judged.iter().position(|&a| !a).map(|i| i as u32 + 1);
    Standing {
        alive: eliminated_on.is_none(),
        eliminated_on,
        active_days: days.iter().filter(|&&a| a).count() as u32,
    }
}

/// Everyone on `handles`, survivors first, then by current streak and activity.
pub fn leaderboard(
    log: &DailyLog,
    handles: &[String],
    window: &ChallengeWindow,
    as_of: NaiveDate,
) -> Vec<StreakRow> {
    let mut rows: Vec<StreakRow> = handles
        .iter()
        .map(|h| StreakRow {
            handle: h.clone(),
            current: current_streak(log, h, window, as_of),
            longest: longest_streak(log, h, window, as_of),
            standing: standing(log, h, window, as_of),
        })
        .collect();

    rows.sort_by_key(|r| {
        (
            Reverse(r.standing.alive),
            Reverse(r.current),
            Reverse(r.standing.active_days),
            r.handle.clone(),
        )
    });
    rows
}
