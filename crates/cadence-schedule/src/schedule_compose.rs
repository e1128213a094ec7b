//! Recurring-line compilation and final message assembly.

use cadence_core::render_template;
use chrono::NaiveDate;

use crate::{RecurringLine, ScheduleConfig, Slot};

/// Effective triage switch for a run: the document-level `triage` section
/// enables it, a slot-level `triage: false` opts that slot out, and a slot
/// cannot opt in when the document carries no triage section to query with.
pub fn triage_enabled(config: &ScheduleConfig, slot: &Slot) -> bool {
    config.triage.is_some() && slot.triage.unwrap_or(true)
}

/// Compiles the message body for an active slot: recurring before-lines, the
/// slot's own line, recurring after-lines, then the triage section. Returns
/// `None` when no line was produced, so callers can skip delivery entirely.
pub fn compose_message(
    slot: &Slot,
    recurring: &[RecurringLine],
    reference_date: NaiveDate,
    triage_lines: &[String],
) -> Option<String> {
    let mut lines = Vec::new();
    for entry in recurring.iter().filter(|entry| entry.before) {
        lines.push(render_template(&entry.text, reference_date));
    }
    if let Some(text) = &slot.text {
        lines.push(render_template(text, reference_date));
    }
    for entry in recurring.iter().filter(|entry| !entry.before) {
        lines.push(render_template(&entry.text, reference_date));
    }
    lines.extend_from_slice(triage_lines);
    if lines.is_empty() {
        return None;
    }
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::{compose_message, triage_enabled};
    use crate::{parse_schedule_config, RecurringLine, Slot};
    use chrono::NaiveDate;

    fn day(value: &str) -> NaiveDate {
        value.parse().expect("test date must parse")
    }

    fn slot(text: Option<&str>) -> Slot {
        Slot {
            text: text.map(str::to_string),
            offset: 0,
            triage: None,
        }
    }

    fn line(text: &str, before: bool) -> RecurringLine {
        RecurringLine {
            text: text.to_string(),
            before,
        }
    }

    #[test]
    fn functional_compose_message_orders_before_slot_after_and_triage() {
        let recurring = vec![
            line("after one %Y", false),
            line("before one", true),
            line("after two", false),
            line("before two", true),
        ];
        let triage = vec!["5 idle PRs".to_string(), "- acme/widget#1".to_string()];
        let message = compose_message(&slot(Some("slot line")), &recurring, day("2020-02-24"), &triage)
            .expect("message must compose");
        assert_eq!(
            message,
            "before one\nbefore two\nslot line\nafter one 2020\nafter two\n5 idle PRs\n- acme/widget#1"
        );
    }

    #[test]
    fn unit_compose_message_without_any_line_is_absent() {
        assert!(compose_message(&slot(None), &[], day("2020-02-24"), &[]).is_none());
    }

    #[test]
    fn unit_compose_message_renders_recurring_lines_without_slot_text() {
        let recurring = vec![line("Daily note on %Y-%m-%d", false)];
        let message = compose_message(&slot(None), &recurring, day("2020-02-25"), &[])
            .expect("message must compose");
        assert_eq!(message, "Daily note on 2020-02-25");
    }

    #[test]
    fn integration_compose_message_matches_reference_schedule_examples() {
        let config = parse_schedule_config(
            "
period: 21
start: 2020-02-21
messages:
  0:
    text: \"- Planning\"
    offset: 3
  3:
    text: \"- Grooming\"
    offset: 1
recurring_messages:
  - text: \"Daily note on %Y-%m-%d\"
  - text: \"# %Y-%m-%d\"
    before: true
",
        )
        .expect("document must parse");

        let (slot, reference) =
            crate::active_slot(&config, day("2020-02-21")).expect("slot 0 active");
        let message = compose_message(slot, &config.recurring_messages, reference, &[])
            .expect("message must compose");
        assert_eq!(message, "# 2020-02-24\n- Planning\nDaily note on 2020-02-24");

        assert!(crate::active_slot(&config, day("2020-02-22")).is_none());

        let (slot, reference) =
            crate::active_slot(&config, day("2020-02-24")).expect("slot 3 active");
        let message = compose_message(slot, &config.recurring_messages, reference, &[])
            .expect("message must compose");
        assert_eq!(message, "# 2020-02-25\n- Grooming\nDaily note on 2020-02-25");
    }

    #[test]
    fn unit_triage_enabled_requires_document_section_and_honors_slot_opt_out() {
        let with_triage = parse_schedule_config(
            "
period: 7
start: 2020-02-21
triage:
  github_org: acme
  old_pr_threshold: 6
  sprint_pr_threshold: 10
",
        )
        .expect("document must parse");
        let without_triage = parse_schedule_config(
            "
period: 7
start: 2020-02-21
",
        )
        .expect("document must parse");

        let default_slot = slot(Some("x"));
        let opted_out = Slot {
            triage: Some(false),
            ..slot(Some("x"))
        };
        let opted_in = Slot {
            triage: Some(true),
            ..slot(Some("x"))
        };

        assert!(triage_enabled(&with_triage, &default_slot));
        assert!(!triage_enabled(&with_triage, &opted_out));
        assert!(triage_enabled(&with_triage, &opted_in));
        assert!(!triage_enabled(&without_triage, &default_slot));
        assert!(!triage_enabled(&without_triage, &opted_in));
    }
}
