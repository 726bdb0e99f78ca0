use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TrackerError};

pub const DEFAULT_API: &str = "https://codeforces.com/api";
pub const DEFAULT_FETCH_COUNT: u32 = 50;
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub contest_id: Option<u64>,
    pub creation_time_seconds: i64,
    pub verdict: Option<String>,
}

impl Submission {
    pub fn accepted(&self) -> bool {
        self.verdict.as_deref() == Some("OK")
    }

    /// Calendar day of the submission as seen from `offset`.
    pub fn local_date(&self, offset: FixedOffset) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.creation_time_seconds, 0)
            .map(|t| t.with_timezone(&offset).date_naive())
    }

    pub fn link(&self) -> String {
        self.contest_id
            .map(|c| format!("https://codeforces.com/contest/{c}/submission/{}", self.id))
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Envelope {
    status: String,
    comment: Option<String>,
    result: Option<Vec<Submission>>,
}

/// One user's accepted activity on a single calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyActivity {
    pub solved: u32,
    pub link: String,
}

impl DailyActivity {
    pub fn from_submissions(subs: &[Submission], date: NaiveDate, offset: FixedOffset) -> Self {
        let todays = subs.iter().filter(|s| s.accepted() && s.local_date(offset) == Some(date));

        let mut solved = 0;
        let mut latest: Option<&Submission> = None;
        for s in todays {
            solved += 1;
            if latest.is_none_or(|l| s.creation_time_seconds > l.creation_time_seconds) {
                latest = Some(s);
            }
        }

        Self { solved, link: latest.map(Submission::link).unwrap_or_default() }
    }

    pub fn active(&self) -> bool {
        self.solved > 0
    }
}

pub struct Client {
    agent: ureq::Agent,
    base_url: String,
    count: u32,
}

impl Client {
    pub fn new(base_url: &str, count: u32) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder()
                .http_status_as_error(false)
                .timeout_global(Some(TIMEOUT))
                .build(),
        );
        Self { agent, base_url: base_url.trim_end_matches('/').to_string(), count }
    }

    /// Most recent submissions of `handle`, newest first.
    pub fn user_status(&self, handle: &str) -> Result<Vec<Submission>> {
        let url = format!("{}/user.status", self.base_url);
        debug!(handle, url = %url, "fetching submissions");

        let mut response = self
            .agent
            .get(url.as_str())
            .query("handle", handle)
            .query("from", "1")
            .query("count", self.count.to_string())
            .call()?;

        let status = response.status().as_u16();
        // Failed lookups still come back as a JSON envelope with a comment.
        let envelope: Envelope = match response.body_mut().read_json() {
            Ok(e) => e,
            Err(_) if status != 200 => {
                return Err(TrackerError::Status { handle: handle.to_string(), status });
            }
            Err(e) => return Err(e.into()),
        };

        parse_envelope(handle, envelope)
    }
}

fn parse_envelope(handle: &str, envelope: Envelope) -> Result<Vec<Submission>> {
    if envelope.status == "OK" {
        return Ok(envelope.result.unwrap_or_default());
    }
    Err(TrackerError::Api {
        handle: handle.to_string(),
        comment: envelope.comment.unwrap_or(envelope.status),
    })
}

/// Parse a raw `user.status` response body.
pub fn parse_user_status(handle: &str, body: &str) -> Result<Vec<Submission>> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| TrackerError::Api {
        handle: handle.to_string(),
        comment: format!("malformed response: {e}"),
    })?;
    parse_envelope(handle, envelope)
}
