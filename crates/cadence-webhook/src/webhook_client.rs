//! Webhook client that posts the composed message to a chat endpoint.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

/// Converts literal `\n` two-character sequences into real newlines.
/// Configuration documents embed them inside single-line YAML strings.
pub fn normalize_message_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Chat webhook client with a bounded request timeout. A non-2xx response is
/// fatal; the next scheduled run is the retry.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: String, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("cadence-announcer"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create webhook client")?;

        Ok(Self {
            http,
            url: url.trim().to_string(),
        })
    }

    /// Posts `{"text": ..., "channel": ...}` to the webhook endpoint; the
    /// channel field is omitted when no channel is given.
    pub async fn post_message(&self, text: &str, channel: Option<&str>) -> Result<()> {
        let mut payload = json!({
            "text": normalize_message_newlines(text),
        });
        if let Some(channel) = channel.map(str::trim).filter(|value| !value.is_empty()) {
            payload["channel"] = Value::String(channel.to_string());
        }

        let response = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .context("webhook delivery request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "webhook delivery failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 320)
            );
        }
        Ok(())
    }
}

fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
