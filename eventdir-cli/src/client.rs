//! HTTP client for communicating with eventdir-server.
//!
//! Requests are retried a fixed number of times with linear backoff; 4xx
//! responses are surfaced immediately since retrying them cannot help.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use eventdir_core::event::Event;
use eventdir_core::submission::EventSubmission;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001";

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// HTTP client for eventdir-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Client {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST a submission for review. Returns the stored event.
    pub async fn submit(&self, submission: &EventSubmission) -> Result<Event> {
        let url = format!("{}/events/submit", self.base_url);
        let response = self
            .send_with_retry(|| self.http.post(&url).json(submission))
            .await?;

        Ok(response.json().await?)
    }

    /// GET the submissions waiting for review.
    pub async fn pending(&self, token: &str) -> Result<Vec<Event>> {
        let url = format!("{}/events/submit/review", self.base_url);
        let response = self
            .send_with_retry(|| self.http.get(&url).bearer_auth(token))
            .await?;

        Ok(response.json().await?)
    }

    /// POST an approve/decline action for a submission.
    pub async fn manage(&self, token: &str, id: &str, action: &str) -> Result<MessageResponse> {
        let url = format!("{}/events/submit/{}", self.base_url, id);
        let body = serde_json::json!({ "action": action });
        let response = self
            .send_with_retry(|| self.http.post(&url).bearer_auth(token).json(&body))
            .await?;

        Ok(response.json().await?)
    }

    /// Send a request, retrying network errors and 5xx responses with a
    /// capped linear backoff (500ms, 1000ms, ...).
    async fn send_with_retry(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match build().send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) if response.status().is_client_error() => {
                    let status = response.status();
                    let message = response
                        .json::<ErrorResponse>()
                        .await
                        .map(|e| e.error)
                        .unwrap_or_else(|_| status.to_string());
                    bail!("Server rejected the request: {}", message);
                }
                Ok(response) if attempt > MAX_RETRIES => {
                    bail!("Server error after {} attempts: {}", attempt, response.status());
                }
                Err(e) if attempt > MAX_RETRIES => {
                    return Err(e).context(format!(
                        "Could not reach eventdir-server at {} after {} attempts",
                        self.base_url, attempt
                    ));
                }
                Ok(_) | Err(_) => {
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64))
                        .await;
                }
            }
        }
    }
}
