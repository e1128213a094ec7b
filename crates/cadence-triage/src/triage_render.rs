//! Rendering of the triage summary section.

use cadence_core::age_in_days;
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::{TriageGroup, TriageReport};

const SPRINT_GROUP_LABEL: &str = "Sprint PRs awaiting review";
const IDLE_GROUP_LABEL: &str = "Idle PRs needing attention";

/// Renders both group sections as message lines. A group with no items
/// contributes nothing, not even its header.
pub fn render_triage_lines(report: &TriageReport, zone: Tz, today: NaiveDate) -> Vec<String> {
    let mut lines = Vec::new();
    render_group(&mut lines, &report.sprint, SPRINT_GROUP_LABEL, zone, today);
    render_group(&mut lines, &report.idle, IDLE_GROUP_LABEL, zone, today);
    lines
}

fn render_group(
    lines: &mut Vec<String>,
    group: &TriageGroup,
    label: &str,
    zone: Tz,
    today: NaiveDate,
) {
    if group.items.is_empty() {
        return;
    }
    // The tracker-reported total is authoritative; the local list is capped
    // at the display limit and the two can diverge.
    let header = if group.total_count > group.items.len() as u64 {
        format!("{} {} ({}):", group.total_count, label, group.browse_url)
    } else {
        format!("{} ({}):", label, group.browse_url)
    };
    lines.push(header);
    for item in &group.items {
        let age = age_in_days(today, item.updated_at.with_timezone(&zone).date_naive());
        lines.push(format!(
            "- {}#{} {} ({}d) {}",
            item.repository, item.number, item.title, age, item.url
        ));
    }
}
