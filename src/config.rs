use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::challenge::ChallengeWindow;
use crate::codeforces::{DEFAULT_API, DEFAULT_FETCH_COUNT};
use crate::error::TrackerError;
use crate::webhook::Webhook;

/// Resolved runtime settings, built from CLI flags and their env fallbacks.
#[derive(Debug, Clone)]
pub struct Settings {
    pub roster: PathBuf,
    pub progress: PathBuf,
    pub daily_log: PathBuf,
    pub window: ChallengeWindow,
    /// Offset used to decide which calendar day a submission belongs to.
    pub utc_offset: FixedOffset,
    pub api_base: String,
    pub fetch_count: u32,
    pub delay: Duration,
    pub webhook: Option<Webhook>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("handles.txt"),
            progress: PathBuf::from("progress.csv"),
            daily_log: PathBuf::from("daily_log.csv"),
            window: ChallengeWindow::default(),
            utc_offset: default_offset(),
            api_base: DEFAULT_API.to_string(),
            fetch_count: DEFAULT_FETCH_COUNT,
            delay: Duration::from_millis(500),
            webhook: None,
        }
    }
}

impl Settings {
    /// Today's date in the configured offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.utc_offset).date_naive()
    }

    pub fn require_webhook(&self) -> Result<&Webhook, TrackerError> {
        self.webhook.as_ref().ok_or(TrackerError::NoWebhook)
    }
}

pub fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(6 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Parse `+HH:MM`, `-HH:MM`, `+HH`, or `UTC`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("utc") || raw == "Z" {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(format!("offset '{raw}' must start with '+' or '-'")),
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || !digits(minutes) {
        return Err(format!("offset '{raw}' must be digits after the sign"));
    }
    let hours: i32 = hours.parse().map_err(|_| format!("bad hours in offset '{raw}'"))?;
    let minutes: i32 = minutes.parse().map_err(|_| format!("bad minutes in offset '{raw}'"))?;
    if hours > 14 || minutes >= 60 {
        return Err(format!("offset '{raw}' out of range"));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| format!("offset '{raw}' out of range"))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{raw}': {e}"))
}
