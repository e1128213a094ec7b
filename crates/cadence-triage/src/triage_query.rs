//! Tracker search-query construction for the triage groups.

use anyhow::{Context, Result};
use chrono::NaiveDate;

const GITHUB_SEARCH_BASE: &str = "https://github.com/search";

/// Filters shared by every triage query: open, non-draft pull requests in
/// live repositories, excluding automated dependency authors.
const BASE_FILTERS: &[&str] = &["is:open", "is:pr", "archived:false", "draft:false"];
const DEPENDENCY_AUTHOR_FILTER: &str = "-author:app/dependabot";

fn base_filters(github_org: &str) -> Vec<String> {
    let mut filters: Vec<String> = BASE_FILTERS.iter().map(|filter| filter.to_string()).collect();
    filters.push(format!("org:{github_org}"));
    filters.push(DEPENDENCY_AUTHOR_FILTER.to_string());
    filters
}

/// Renders a quoted `label:` filter; multiple labels combine as tracker-side
/// OR alternatives.
pub fn label_filter(labels: &[String]) -> String {
    let quoted: Vec<String> = labels.iter().map(|label| format!("\"{label}\"")).collect();
    format!("label:{}", quoted.join(","))
}

/// Query for sprint review requests carrying one of `labels`, last updated
/// inside the rolling `[window_start, window_end]` window.
pub fn sprint_query(
    github_org: &str,
    labels: &[String],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> String {
    let mut filters = base_filters(github_org);
    filters.push(label_filter(labels));
    filters.push(format!(
        "updated:{}..{}",
        window_start.format("%Y-%m-%d"),
        window_end.format("%Y-%m-%d")
    ));
    filters.join(" ")
}

/// Query for long-idle review requests (no upper age bound), excluding
/// explicitly blocked items.
pub fn idle_query(github_org: &str, blocked_label: &str, cutoff: NaiveDate) -> String {
    let mut filters = base_filters(github_org);
    filters.push(format!("-label:\"{blocked_label}\""));
    filters.push(format!("updated:<={}", cutoff.format("%Y-%m-%d")));
    filters.join(" ")
}

/// Browsable equivalent of a search query, URL-encoded as a single `q`
/// parameter for message deep links.
pub fn browse_url(query: &str) -> Result<String> {
    let mut url =
        reqwest::Url::parse(GITHUB_SEARCH_BASE).context("invalid github search base url")?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("type", "pullrequests");
    Ok(url.into())
}
