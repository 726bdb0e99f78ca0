use std::fmt::Write;

use chrono::NaiveDate;

use crate::challenge::ChallengeWindow;
use crate::progress::ProgressBook;
use crate::streak::StreakRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Idle,
    FetchFailed,
}

impl Status {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Active => "✅",
            Self::Idle => "❌",
            Self::FetchFailed => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub handle: String,
    pub today: u32,
    pub total: u32,
    pub streak: u32,
    pub status: Status,
}

/// One row per roster handle, read from `book` as of `date`. Handles with no state show zeros.
pub fn rows(book: &ProgressBook, handles: &[String], date: NaiveDate) -> Vec<SummaryRow> {
    handles
        .iter()
        .map(|h| match book.get(h) {
            Some(u) => {
                let today = if u.last_updated == Some(date) { u.today_solved } else { 0 };
                SummaryRow {
                    handle: h.clone(),
                    today,
                    total: u.total_solved,
                    streak: u.day_streak,
                    status: if today > 0 { Status::Active } else { Status::Idle },
                }
            }
            None => SummaryRow {
                handle: h.clone(),
                today: 0,
                total: 0,
                streak: 0,
                status: Status::Idle,
            },
        })
        .collect()
}

fn day_label(window: &ChallengeWindow, date: NaiveDate) -> String {
    match window.day_number(date) {
        Some(d) => format!("Day {d}/{}", window.total_days),
        None => "outside challenge".to_string(),
    }
}

pub fn render_table(rows: &[SummaryRow], window: &ChallengeWindow, date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== TODAY'S SUMMARY ===");
    let _ = writeln!(out, "Date: {date} ({})", day_label(window, date));
    let _ = writeln!(
        out,
        "{:<20} {:<12} {:<12} {:<10} {:<10}",
        "Handle", "Today Solved", "Total Solved", "Day Streak", "Status"
    );
    let _ = writeln!(out, "{}", "-".repeat(65));
    for r in rows {
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:<12} {:<10} {}",
            r.handle,
            r.today,
            r.total,
            r.streak,
            r.status.icon()
        );
    }
    out
}

/// Plain-text message for the notification channel.
pub fn render_message(rows: &[SummaryRow], window: &ChallengeWindow, date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Codeforces 100-day challenge — {date} ({})", day_label(window, date));
    for r in rows {
        let _ = match r.status {
            Status::FetchFailed => writeln!(out, "{} {}: could not fetch", r.status.icon(), r.handle),
            _ => writeln!(
                out,
                "{} {}: {} today, {} total, streak {}",
                r.status.icon(),
                r.handle,
                r.today,
                r.total,
                r.streak
            ),
        };
    }
    let active = rows.iter().filter(|r| r.status == Status::Active).count();
    let _ = write!(out, "{active}/{} active today", rows.len());
    out
}

pub fn render_streaks(rows: &[StreakRow], window: &ChallengeWindow, as_of: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== STREAKS as of {as_of} ({}) ===", day_label(window, as_of));
    let _ = writeln!(
        out,
        "{:<4} {:<20} {:>7} {:>7} {:>7}  Standing",
        "#", "Handle", "Current", "Longest", "Active"
    );
    let _ = writeln!(out, "{}", "-".repeat(65));
    for (i, r) in rows.iter().enumerate() {
        let standing = match r.standing.eliminated_on {
            None => "alive".to_string(),
            Some(day) => format!("eliminated day {day}"),
        };
        let _ = writeln!(
            out,
            "{:<4} {:<20} {:>7} {:>7} {:>7}  {standing}",
            i + 1,
            r.handle,
            r.current,
            r.longest,
            r.standing.active_days
        );
    }
    let alive = rows.iter().filter(|r| r.standing.alive).count();
    let _ = write!(out, "{alive}/{} still alive", rows.len());
    out
}
