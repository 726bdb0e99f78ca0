use std::collections::HashMap;
use std::time::Duration;

use cf_hundred::codeforces::Submission;
use cf_hundred::config::{Settings, default_offset};
use cf_hundred::daily_log::DailyLog;
use cf_hundred::progress::ProgressBook;
use cf_hundred::reconcile::Outcome;
use cf_hundred::summary::{self, Status};
use cf_hundred::tracker::{ActivitySource, track};
use cf_hundred::{Result, TrackerError, roster};
use chrono::{NaiveDate, TimeZone};

struct FakeSource {
    by_handle: HashMap<String, Vec<Submission>>,
}

impl ActivitySource for FakeSource {
    fn submissions(&self, handle: &str) -> Result<Vec<Submission>> {
        self.by_handle.get(handle).cloned().ok_or_else(|| TrackerError::Api {
            handle: handle.to_string(),
            comment: "not found".to_string(),
        })
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn accepted_on(day: &str, ids: &[u64]) -> Vec<Submission> {
    let noon = date(day).and_hms_opt(12, 0, 0).unwrap();
    let base = default_offset().from_local_datetime(&noon).unwrap().timestamp();
    ids.iter()
        .map(|&id| Submission {
            id,
            contest_id: Some(1),
            creation_time_seconds: base + id as i64,
            verdict: Some("OK".to_string()),
        })
        .collect()
}

fn settings() -> Settings {
    Settings { delay: Duration::ZERO, ..Settings::default() }
}

fn handles() -> Vec<String> {
    roster::parse("alice\nbob\ncarol\n")
}

#[test]
fn test_track_reconciles_and_logs() {
    let source = FakeSource {
        by_handle: HashMap::from([
            ("alice".to_string(), accepted_on("2025-09-01", &[1, 2])),
            ("bob".to_string(), Vec::new()),
        ]),
    };
    let mut book = ProgressBook::new(100);
    let mut log = DailyLog::default();

    let report =
        track(&source, &settings(), &handles(), date("2025-09-01"), &mut book, &mut log, |_, _| {}).unwrap();

    assert_eq!(report.day, 1);
    assert_eq!(report.rows.iter().filter(|r| r.status == Status::Active).count(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "carol");
    assert_eq!(report.outcomes, [("alice".to_string(), Outcome::Joined), ("bob".to_string(), Outcome::Joined)]);

    assert_eq!(report.rows[0].today, 2);
    assert_eq!(report.rows[0].status, Status::Active);
    assert_eq!(report.rows[1].status, Status::Idle);
    assert_eq!(report.rows[2].status, Status::FetchFailed);

    assert!(book.get("carol").is_none());
    assert_eq!(log.entries().len(), 1);
    assert_eq!(log.solved_on("alice", date("2025-09-01")), 2);
}

#[test]
fn test_track_two_days_and_rerun() {
    let mut book = ProgressBook::new(100);
    let mut log = DailyLog::default();
    let roster = vec!["alice".to_string()];

    let day1 = FakeSource {
        by_handle: HashMap::from([("alice".to_string(), accepted_on("2025-09-01", &[1]))]),
    };
    track(&day1, &settings(), &roster, date("2025-09-01"), &mut book, &mut log, |_, _| {}).unwrap();

    let mut subs = accepted_on("2025-09-02", &[10]);
    subs.extend(accepted_on("2025-09-01", &[1]));
    let day2 = FakeSource { by_handle: HashMap::from([("alice".to_string(), subs.clone())]) };
    track(&day2, &settings(), &roster, date("2025-09-02"), &mut book, &mut log, |_, _| {}).unwrap();

    subs.extend(accepted_on("2025-09-02", &[11, 12]));
    let rerun = FakeSource { by_handle: HashMap::from([("alice".to_string(), subs)]) };
    let report = track(&rerun, &settings(), &roster, date("2025-09-02"), &mut book, &mut log, |_, _| {}).unwrap();

    assert_eq!(report.outcomes[0].1, Outcome::Refreshed);
    let alice = book.get("alice").unwrap();
    assert_eq!(alice.day_streak, 2);
    assert_eq!(alice.today_solved, 3);
    assert_eq!(alice.total_solved, 4);
    assert_eq!(log.entries().len(), 2);
    assert_eq!(log.solved_on("alice", date("2025-09-02")), 3);
}

#[test]
fn test_track_rejects_date_outside_window() {
    let source = FakeSource { by_handle: HashMap::new() };
    let mut book = ProgressBook::new(100);
    let mut log = DailyLog::default();

    let err = track(&source, &settings(), &handles(), date("2024-01-01"), &mut book, &mut log, |_, _| {})
        .unwrap_err();
    assert!(matches!(err, TrackerError::OutsideWindow { .. }));
    assert!(book.is_empty());
}

#[test]
fn test_summary_renders_roster_order_with_zeros() {
    let source = FakeSource {
        by_handle: HashMap::from([("bob".to_string(), accepted_on("2025-09-03", &[1]))]),
    };
    let s = settings();
    let mut book = ProgressBook::new(100);
    let mut log = DailyLog::default();
    let roster = vec!["bob".to_string()];
    track(&source, &s, &roster, date("2025-09-03"), &mut book, &mut log, |_, _| {}).unwrap();

    let rows = summary::rows(&book, &handles(), date("2025-09-03"));
    let table = summary::render_table(&rows, &s.window, date("2025-09-03"));
    assert!(table.contains("Date: 2025-09-03 (Day 3/100)"));
    let lines: Vec<&str> = table.lines().skip(4).collect();
    assert!(lines[0].starts_with("alice") && lines[0].ends_with("❌"));
    assert!(lines[1].starts_with("bob") && lines[1].ends_with("✅"));

    let message = summary::render_message(&rows, &s.window, date("2025-09-03"));
    assert!(message.contains("✅ bob: 1 today, 1 total, streak 1"));
    assert!(message.ends_with("1/3 active today"));

    let next_day = summary::rows(&book, &handles(), date("2025-09-04"));
    assert_eq!(next_day[1].today, 0);
    assert_eq!(next_day[1].total, 1);
}

#[test]
fn test_track_reports_each_fetch_in_order() {
    let source = FakeSource { by_handle: HashMap::new() };
    let mut book = ProgressBook::new(100);
    let mut log = DailyLog::default();
    let mut seen = Vec::new();

    track(&source, &settings(), &handles(), date("2025-09-01"), &mut book, &mut log, |i, h| {
        seen.push(format!("{i}:{h}"));
    })
    .unwrap();

    assert_eq!(seen, ["1:alice", "2:bob", "3:carol"]);
}
