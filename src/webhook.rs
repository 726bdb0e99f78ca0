use serde::Serialize;
use tracing::info;

use crate::error::{Result, TrackerError};

#[derive(Serialize)]
struct Payload<'a> {
    content: &'a str,
}

#[derive(Debug, Clone)]
pub struct Webhook {
    pub url: String,
    pub token: Option<String>,
}

impl Webhook {
    pub fn new(url: &str, token: Option<&str>) -> Self {
        Self { url: url.to_string(), token: token.filter(|t| !t.is_empty()).map(String::from) }
    }

    pub fn post(&self, content: &str) -> Result<()> {
        let agent = ureq::Agent::new_with_config(
            ureq::config::Config::builder().http_status_as_error(false).build(),
        );

        let mut request = agent.post(self.url.as_str());
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let mut response = request.send_json(&Payload { content })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(TrackerError::Webhook { status, body });
        }

        info!(status, "summary posted to webhook");
        Ok(())
    }
}
