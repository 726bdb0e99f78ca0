//! One tracking pass: fetch each roster handle, reconcile into in-memory state, and report.
//! Nothing is written to disk here; the caller decides whether to persist.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::codeforces::{Client, DailyActivity, Submission};
use crate::config::Settings;
use crate::daily_log::{DailyLog, LogEntry};
use crate::error::Result;
use crate::progress::ProgressBook;
use crate::reconcile::{Outcome, reconcile};
use crate::summary::{self, Status, SummaryRow};

/// Where submissions come from.
pub trait ActivitySource {
    fn submissions(&self, handle: &str) -> Result<Vec<Submission>>;
}

impl ActivitySource for Client {
    fn submissions(&self, handle: &str) -> Result<Vec<Submission>> {
        self.user_status(handle)
    }
}

#[derive(Debug)]
pub struct Report {
    pub date: NaiveDate,
    pub day: u32,
    pub rows: Vec<SummaryRow>,
    pub outcomes: Vec<(String, Outcome)>,
    pub failures: Vec<(String, String)>,
}

/// `on_fetch(position, handle)` is called before each handle is fetched; `position` is 1-based.
pub fn track(
    source: &dyn ActivitySource,
    settings: &Settings,
    handles: &[String],
    date: NaiveDate,
    book: &mut ProgressBook,
    log: &mut DailyLog,
    mut on_fetch: impl FnMut(usize, &str),
) -> Result<Report> {
    let day = settings.window.require_day(date)?;
    info!(%date, day, users = handles.len(), "tracking");

    let mut outcomes = Vec::new();
    let mut failures = Vec::new();
    let mut backfilled: Vec<(String, u32)> = Vec::new();

    for (i, handle) in handles.iter().enumerate() {
        if i > 0 && !settings.delay.is_zero() {
            std::thread::sleep(settings.delay);
        }
        on_fetch(i + 1, handle);

        let subs = match source.submissions(handle) {
            Ok(s) => s,
            Err(e) => {
                warn!(handle = %handle, error = %e, "fetch failed; leaving state untouched");
                failures.push((handle.clone(), e.to_string()));
                continue;
            }
        };

        let activity = DailyActivity::from_submissions(&subs, date, settings.utc_offset);
        let outcome = reconcile(book, handle, &activity, date, day);
        if outcome == Outcome::Backfilled {
            backfilled.push((handle.clone(), activity.solved));
        }
        log.record(LogEntry {
            date,
            handle: handle.clone(),
            solved: activity.solved,
            link: activity.link,
            day,
        });
        outcomes.push((handle.clone(), outcome));
    }

    let mut rows = summary::rows(book, handles, date);
    for row in &mut rows {
        if failures.iter().any(|(h, _)| *h == row.handle) {
            row.status = Status::FetchFailed;
        } else if let Some((_, solved)) = backfilled.iter().find(|(h, _)| *h == row.handle) {
            row.today = *solved;
            row.status = if *solved > 0 { Status::Active } else { Status::Idle };
        }
    }

    Ok(Report { date, day, rows, outcomes, failures })
}
