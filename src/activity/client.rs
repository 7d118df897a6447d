//! Activity Log Client
//!
//! HTTP source for `GET /api/analysis/{id}/activity`.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::Client;
use std::time::Duration;

use super::entry::{parse_activity_log, ActivityEntry};
use super::error::{FeedError, FeedResult};
use super::SubjectId;
use crate::config::ApiConfig;

/// Longest error body kept for diagnostics
const MAX_ERROR_BODY: usize = 256;

/// Anything that can produce an activity snapshot for a subject
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch the subject's complete log, in server order
    async fn fetch_log(&self, subject: &SubjectId) -> FeedResult<Vec<ActivityEntry>>;
}

/// Activity source backed by the dashboard API
pub struct HttpActivitySource {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpActivitySource {
    /// Build a source for the configured API.
    ///
    /// The client keeps a cookie store so session cookies set by the API are
    /// sent back on every poll.
    pub fn new(config: &ApiConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn activity_url(&self, subject: &SubjectId) -> String {
        format!(
            "{}/api/analysis/{}/activity",
            self.base_url,
            urlencoding::encode(subject.as_str())
        )
    }
}

#[async_trait]
impl ActivitySource for HttpActivitySource {
    async fn fetch_log(&self, subject: &SubjectId) -> FeedResult<Vec<ActivityEntry>> {
        if subject.is_empty() {
            return Err(FeedError::EmptySubject);
        }

        let mut request = self
            .client
            .get(self.activity_url(subject))
            .header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        parse_activity_log(&bytes)
    }
}
