//! Run wiring: load the configuration, compose the day's message, deliver.

use anyhow::Result;
use cadence_core::today_in_zone;
use cadence_schedule::{
    active_slot, compose_message, load_schedule_config, triage_enabled, ScheduleConfig,
};
use cadence_triage::{
    collect_triage_report, render_triage_lines, GithubSearchClient, PullRequestSearch,
};
use cadence_webhook::WebhookClient;
use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::info;

use crate::cli_args::Cli;

pub(crate) async fn run_cli(cli: Cli) -> Result<()> {
    let config = load_schedule_config(&cli.config)?;
    let zone = config.reference_timezone()?;
    let today = cli.today.unwrap_or_else(|| today_in_zone(zone));

    let search = GithubSearchClient::new(
        cli.github_api_base.clone(),
        cli.github_token.clone(),
        cli.request_timeout_ms,
    )?;
    let Some(message) = compose_for_day(&config, &search, zone, today).await? else {
        info!("no message today");
        return Ok(());
    };

    let webhook = WebhookClient::new(cli.webhook_url.clone(), cli.request_timeout_ms)?;
    for channel in &cli.channels {
        webhook.post_message(&message, Some(channel)).await?;
        info!(
            channel = channel.as_str(),
            message = message.as_str(),
            "sent cadence message"
        );
    }
    Ok(())
}

/// Composes the message for `today`: the active slot's lines plus the triage
/// section when the slot calls for it. `None` means nothing is due.
pub(crate) async fn compose_for_day(
    config: &ScheduleConfig,
    search: &dyn PullRequestSearch,
    zone: Tz,
    today: NaiveDate,
) -> Result<Option<String>> {
    let Some((slot, reference_date)) = active_slot(config, today) else {
        return Ok(None);
    };

    let triage_lines = match (&config.triage, triage_enabled(config, slot)) {
        (Some(triage), true) => {
            let report = collect_triage_report(search, triage, zone, today).await?;
            render_triage_lines(&report, zone, today)
        }
        _ => Vec::new(),
    };

    Ok(compose_message(
        slot,
        &config.recurring_messages,
        reference_date,
        &triage_lines,
    ))
}
