//! End-to-end announcement flow: configuration document to webhook delivery.

use anyhow::{bail, Result};
use async_trait::async_trait;
use cadence_schedule::{active_slot, compose_message, parse_schedule_config, triage_enabled};
use cadence_triage::{
    collect_triage_report, render_triage_lines, PullRequestBatch, PullRequestRef,
    PullRequestSearch,
};
use cadence_webhook::WebhookClient;
use chrono::NaiveDate;
use chrono_tz::Tz;
use httpmock::prelude::*;

const CONF: &str = "
period: 21
start: 2020-02-21
messages:
  0:
    text: \"- Planning\"
    offset: 3
recurring_messages:
  - text: \"Daily note on %Y-%m-%d\"
  - text: \"# %Y-%m-%d\"
    before: true
triage:
  github_org: acme
  old_pr_threshold: 4
  sprint_pr_threshold: 10
";

fn day(value: &str) -> NaiveDate {
    value.parse().expect("test date must parse")
}

struct ScriptedSearch;

#[async_trait]
impl PullRequestSearch for ScriptedSearch {
    async fn search(&self, query: &str, _limit: usize) -> Result<PullRequestBatch> {
        if query.contains("label:\"mergeit\"") {
            return Ok(PullRequestBatch {
                items: vec![PullRequestRef {
                    repository: "acme/widget".to_string(),
                    number: 42,
                    title: "Fix flaky retry".to_string(),
                    url: "https://github.com/acme/widget/pull/42".to_string(),
                    updated_at: "2020-02-12T08:30:00Z".parse().expect("timestamp"),
                }],
                total_count: 1,
            });
        }
        if query.contains("label:\"please review\"") {
            return Ok(PullRequestBatch::default());
        }
        Ok(PullRequestBatch {
            items: vec![PullRequestRef {
                repository: "acme/legacy".to_string(),
                number: 7,
                title: "Ancient refactor".to_string(),
                url: "https://github.com/acme/legacy/pull/7".to_string(),
                updated_at: "2020-01-02T00:00:00Z".parse().expect("timestamp"),
            }],
            total_count: 12,
        })
    }
}

struct FailingSearch;

#[async_trait]
impl PullRequestSearch for FailingSearch {
    async fn search(&self, _query: &str, _limit: usize) -> Result<PullRequestBatch> {
        bail!("tracker unavailable")
    }
}

#[tokio::test]
async fn integration_full_announcement_roundtrip_posts_triage_summary() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .body_includes("# 2020-02-24")
            .body_includes("- Planning")
            .body_includes("Daily note on 2020-02-24")
            .body_includes("Sprint PRs awaiting review")
            .body_includes("acme/widget#42 Fix flaky retry (9d)")
            .body_includes("12 Idle PRs needing attention")
            .body_includes("acme/legacy#7 Ancient refactor (50d)")
            .body_includes("town-square");
        then.status(200);
    });

    let config = parse_schedule_config(CONF).expect("document must parse");
    let zone = config.reference_timezone().expect("timezone must parse");
    let today = day("2020-02-21");

    let (slot, reference_date) = active_slot(&config, today).expect("slot 0 active");
    assert!(triage_enabled(&config, slot));
    let triage = config.triage.as_ref().expect("triage section present");
    let report = collect_triage_report(&ScriptedSearch, triage, zone, today)
        .await
        .expect("collection must succeed");
    let triage_lines = render_triage_lines(&report, zone, today);
    let message = compose_message(slot, &config.recurring_messages, reference_date, &triage_lines)
        .expect("message must compose");

    let webhook = WebhookClient::new(server.url("/hook"), 2_000).expect("client");
    webhook
        .post_message(&message, Some("town-square"))
        .await
        .expect("delivery must succeed");
    assert_eq!(hook.calls(), 1);
}

#[tokio::test]
async fn integration_tracker_failure_prevents_any_delivery() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200);
    });

    let config = parse_schedule_config(CONF).expect("document must parse");
    let zone = config.reference_timezone().expect("timezone must parse");
    let today = day("2020-02-21");
    let triage = config.triage.as_ref().expect("triage section present");

    let error = collect_triage_report(&FailingSearch, triage, zone, today)
        .await
        .expect_err("tracker failure must propagate");
    assert!(error.to_string().contains("triage search failed"));
    assert_eq!(hook.calls(), 0);
}
