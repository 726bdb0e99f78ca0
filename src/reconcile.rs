//! Merging one day's fetched activity into a user's durable progress.
//!
//! A run may happen several times on the same day, may skip days entirely, and may be pointed
//! at a date older than the last recorded one. Each case has its own rule; see [`Outcome`].

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::codeforces::DailyActivity;
use crate::progress::{ProgressBook, UserProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// First time this handle was tracked.
    Joined,
    /// Another run for the already-recorded day; counts only ever grow.
    Refreshed,
    /// The previous recorded day was yesterday.
    Continued,
    /// One or more days were skipped, or the user had never been dated.
    Restarted,
    /// The date is older than the last recorded one; only attendance is touched.
    Backfilled,
}

/// Merge `activity` for `date` (challenge day `day`) into `book`.
pub fn reconcile(
    book: &mut ProgressBook,
    handle: &str,
    activity: &DailyActivity,
    date: NaiveDate,
    day: u32,
) -> Outcome {
    let outcome = match book.get_mut(handle) {
        Some(user) => merge(user, activity, date, day),
        None => {
            let mut user = UserProgress::new(handle, book.total_days());
            user.total_solved = activity.solved;
            user.today_solved = activity.solved;
            user.day_streak = u32::from(activity.active());
            user.submission_link.clone_from(&activity.link);
            user.last_updated = Some(date);
            user.set_attended(day, activity.active());
            book.insert(user);
            Outcome::Joined
        }
    };

    debug!(handle, %date, day, solved = activity.solved, ?outcome, "reconciled");
    outcome
}

fn merge(user: &mut UserProgress, activity: &DailyActivity, date: NaiveDate, day: u32) -> Outcome {
    let solved = activity.solved;

    match user.last_updated {
        Some(last) if last == date => {
            let previous = user.today_solved;
            user.today_solved = previous.max(solved);
            user.total_solved += solved.saturating_sub(previous);
            if activity.active() && user.submission_link.is_empty() {
                user.submission_link.clone_from(&activity.link);
            }
            if activity.active() {
                user.set_attended(day, true);
            }
            Outcome::Refreshed
        }
        Some(last) if last > date => {
            warn!(handle = %user.handle, %date, %last, "date precedes last update; only marking attendance");
            if activity.active() {
                user.set_attended(day, true);
            }
            Outcome::Backfilled
        }
        last => {
            let consecutive = last.and_then(|l| l.succ_opt()) == Some(date);
            let outcome = if consecutive { Outcome::Continued } else { Outcome::Restarted };

            user.day_streak = match (consecutive, activity.active()) {
                (_, false) => 0,
                (true, true) => user.day_streak + 1,
                (false, true) => 1,
            };
            user.total_solved += solved;
            user.today_solved = solved;
            user.submission_link.clone_from(&activity.link);
            user.last_updated = Some(date);
            user.set_attended(day, activity.active());
            outcome
        }
    }
}
