use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{date} is outside the challenge window ({start} .. {end})")]
    OutsideWindow { date: NaiveDate, start: NaiveDate, end: NaiveDate },

    #[error("roster file '{0}' not found — run `cf-hundred init` to create one")]
    MissingRoster(String),

    #[error("roster '{0}' has no handles")]
    EmptyRoster(String),

    #[error("Codeforces API error for {handle}: {comment}")]
    Api { handle: String, comment: String },

    #[error("Codeforces API returned HTTP {status} for {handle}")]
    Status { handle: String, status: u16 },

    #[error(transparent)]
    Http(#[from] ureq::Error),

    #[error("no webhook configured — set CF_HUNDRED_WEBHOOK_URL or pass --webhook-url")]
    NoWebhook,

    #[error("webhook rejected the message (HTTP {status}): {body}")]
    Webhook { status: u16, body: String },

    #[error("{file}: row {row}: {reason}")]
    Corrupt { file: String, row: usize, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
