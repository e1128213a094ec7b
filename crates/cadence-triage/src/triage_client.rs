//! Tracker search seam and the GitHub search-API implementation.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One open review request, snapshotted for the run's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub repository: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

/// Ordered batch of review requests plus the tracker-reported total match
/// count, which may exceed the number of items actually fetched.
#[derive(Debug, Clone, Default)]
pub struct PullRequestBatch {
    pub items: Vec<PullRequestRef>,
    pub total_count: u64,
}

#[async_trait]
/// Narrow tracker seam so aggregation logic runs against substitute
/// implementations in tests.
pub trait PullRequestSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<PullRequestBatch>;
}

#[derive(Debug, Clone, Deserialize)]
struct GithubSearchResponse {
    total_count: u64,
    items: Vec<GithubSearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct GithubSearchItem {
    number: u64,
    title: String,
    html_url: String,
    updated_at: DateTime<Utc>,
    repository_url: String,
}

/// GitHub search-API client with a bounded request timeout.
#[derive(Clone)]
pub struct GithubSearchClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GithubSearchClient {
    pub fn new(api_base: String, token: Option<String>, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("cadence-announcer"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to create github search client")?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        })
    }
}

#[async_trait]
impl PullRequestSearch for GithubSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<PullRequestBatch> {
        // Oldest-updated first, so the fetched page holds the stalest items
        // when the tracker truncates the result set.
        let params: Vec<(&str, String)> = vec![
            ("q", query.to_string()),
            ("per_page", limit.max(1).to_string()),
            ("sort", "updated".to_string()),
            ("order", "asc".to_string()),
        ];

        let mut request = self
            .http
            .get(format!("{}/search/issues", self.api_base))
            .query(&params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("github search request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "github search failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 320)
            );
        }

        let decoded: GithubSearchResponse = response
            .json()
            .await
            .context("failed to decode github search response")?;
        Ok(PullRequestBatch {
            total_count: decoded.total_count,
            items: decoded
                .items
                .into_iter()
                .map(|item| PullRequestRef {
                    repository: repository_from_api_url(&item.repository_url),
                    number: item.number,
                    title: item.title,
                    url: item.html_url,
                    updated_at: item.updated_at,
                })
                .collect(),
        })
    }
}

/// Recovers the `owner/name` repository slug from an API repository URL.
fn repository_from_api_url(repository_url: &str) -> String {
    let mut segments = repository_url.trim_end_matches('/').rsplit('/');
    let name = segments.next().unwrap_or_default();
    let owner = segments.next().unwrap_or_default();
    if owner.is_empty() || owner == "repos" {
        name.to_string()
    } else {
        format!("{owner}/{name}")
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
