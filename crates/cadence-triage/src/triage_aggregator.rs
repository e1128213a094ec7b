//! Triage aggregation: concurrent tracker searches, merge, and ranking.

use std::collections::HashSet;

use anyhow::{Context, Result};
use cadence_core::age_cutoff;
use cadence_schedule::TriageConfig;
use chrono::NaiveDate;
use chrono_tz::Tz;
use futures_util::future::try_join_all;

use crate::{
    browse_url, idle_query, sprint_query, PullRequestBatch, PullRequestRef, PullRequestSearch,
};

/// One ranked triage group: the stalest fetched items (oldest-updated
/// first), the tracker-reported total, and a deep link to the live search.
#[derive(Debug, Clone)]
pub struct TriageGroup {
    pub items: Vec<PullRequestRef>,
    pub total_count: u64,
    pub browse_url: String,
}

/// Snapshot of both triage groups for one run.
#[derive(Debug, Clone)]
pub struct TriageReport {
    pub sprint: TriageGroup,
    pub idle: TriageGroup,
}

/// Runs the sprint label searches and the idle search concurrently and
/// reduces them to ranked groups. Any search failure aborts the whole
/// collection; results merge deterministically regardless of completion
/// order.
pub async fn collect_triage_report(
    search: &dyn PullRequestSearch,
    triage: &TriageConfig,
    zone: Tz,
    today: NaiveDate,
) -> Result<TriageReport> {
    let window_start = age_cutoff(today, triage.sprint_pr_threshold);
    let window_end = age_cutoff(today, triage.old_pr_threshold);

    let sprint_queries: Vec<String> = triage
        .sprint_labels
        .iter()
        .map(|label| {
            sprint_query(
                &triage.github_org,
                std::slice::from_ref(label),
                window_start,
                window_end,
            )
        })
        .collect();
    let idle_query_string = idle_query(&triage.github_org, &triage.blocked_label, window_end);

    let limit = triage.display_limit;
    let (sprint_batches, idle_batch) = tokio::join!(
        try_join_all(
            sprint_queries
                .iter()
                .map(|query| search.search(query, limit))
        ),
        search.search(&idle_query_string, limit)
    );
    let sprint_batches = sprint_batches.context("sprint triage search failed")?;
    let idle_batch = idle_batch.context("idle triage search failed")?;

    Ok(TriageReport {
        sprint: build_sprint_group(sprint_batches, triage, zone, window_start, window_end)?,
        idle: build_idle_group(idle_batch, triage, zone, window_end, &idle_query_string)?,
    })
}

fn build_sprint_group(
    batches: Vec<PullRequestBatch>,
    triage: &TriageConfig,
    zone: Tz,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<TriageGroup> {
    let mut total: u64 = batches.iter().map(|batch| batch.total_count).sum();
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for item in batches.into_iter().flat_map(|batch| batch.items) {
        if !seen.insert((item.repository.clone(), item.number)) {
            total = total.saturating_sub(1);
            continue;
        }
        merged.push(item);
    }
    merged.retain(|item| {
        let updated = item.updated_at.with_timezone(&zone).date_naive();
        (window_start..=window_end).contains(&updated)
    });
    sort_and_truncate(&mut merged, triage.display_limit);

    let combined_query = sprint_query(
        &triage.github_org,
        &triage.sprint_labels,
        window_start,
        window_end,
    );
    Ok(TriageGroup {
        total_count: total.max(merged.len() as u64),
        browse_url: browse_url(&combined_query)?,
        items: merged,
    })
}

fn build_idle_group(
    batch: PullRequestBatch,
    triage: &TriageConfig,
    zone: Tz,
    cutoff: NaiveDate,
    query: &str,
) -> Result<TriageGroup> {
    let mut items = batch.items;
    // Idle means age >= threshold: the cutoff day itself is included.
    items.retain(|item| item.updated_at.with_timezone(&zone).date_naive() <= cutoff);
    sort_and_truncate(&mut items, triage.display_limit);
    Ok(TriageGroup {
        total_count: batch.total_count.max(items.len() as u64),
        browse_url: browse_url(query)?,
        items,
    })
}

/// Ascending by last-updated time (staleness first), with repository and
/// number as tie-breakers so concurrent fetch order never shows through.
fn sort_and_truncate(items: &mut Vec<PullRequestRef>, limit: usize) {
    items.sort_by(|a, b| {
        a.updated_at
            .cmp(&b.updated_at)
            .then_with(|| a.repository.cmp(&b.repository))
            .then_with(|| a.number.cmp(&b.number))
    });
    items.truncate(limit);
}
