//! Schedule configuration document: serde types, loading, and fail-fast
//! validation performed before any network activity.

use std::{collections::BTreeMap, path::Path};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
/// Top-level schedule configuration document, read once per run.
pub struct ScheduleConfig {
    pub start: NaiveDate,
    pub period: i64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub messages: BTreeMap<i64, Slot>,
    #[serde(default)]
    pub recurring_messages: Vec<RecurringLine>,
    #[serde(default)]
    pub triage: Option<TriageConfig>,
}

#[derive(Debug, Clone, Deserialize)]
/// One configured entry in the schedule, keyed by cycle-offset.
pub struct Slot {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub triage: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
/// A message fragment applied to every activated slot.
pub struct RecurringLine {
    pub text: String,
    #[serde(default)]
    pub before: bool,
}

#[derive(Debug, Clone, Deserialize)]
/// Pull-request triage settings; triage runs only when this section exists.
pub struct TriageConfig {
    pub github_org: String,
    pub old_pr_threshold: i64,
    pub sprint_pr_threshold: i64,
    #[serde(default = "default_sprint_labels")]
    pub sprint_labels: Vec<String>,
    #[serde(default = "default_blocked_label")]
    pub blocked_label: String,
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_sprint_labels() -> Vec<String> {
    vec!["mergeit".to_string(), "please review".to_string()]
}

fn default_blocked_label() -> String {
    "blocked".to_string()
}

fn default_display_limit() -> usize {
    5
}

impl ScheduleConfig {
    /// The single reference timezone every age comparison uses.
    pub fn reference_timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .with_context(|| format!("invalid timezone '{}'", self.timezone))
    }
}

/// Parses and validates a schedule configuration document.
pub fn parse_schedule_config(raw: &str) -> Result<ScheduleConfig> {
    let config: ScheduleConfig =
        serde_yaml::from_str(raw).context("failed to parse schedule configuration document")?;
    validate_schedule_config(&config)?;
    Ok(config)
}

/// Reads and validates the schedule configuration document at `path`.
pub fn load_schedule_config(path: &Path) -> Result<ScheduleConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_schedule_config(&raw)
}

fn validate_schedule_config(config: &ScheduleConfig) -> Result<()> {
    if config.period <= 0 {
        bail!(
            "schedule period must be a positive number of days, got {}",
            config.period
        );
    }
    for key in config.messages.keys() {
        if !(0..config.period).contains(key) {
            bail!(
                "slot cycle-offset {} is outside [0, {})",
                key,
                config.period
            );
        }
    }
    config.reference_timezone()?;
    if let Some(triage) = &config.triage {
        validate_triage_config(triage)?;
    }
    Ok(())
}

fn validate_triage_config(triage: &TriageConfig) -> Result<()> {
    if triage.github_org.trim().is_empty() {
        bail!("triage github_org must not be empty");
    }
    if triage.old_pr_threshold <= 0 || triage.sprint_pr_threshold <= 0 {
        bail!("triage age thresholds must be positive day counts");
    }
    if triage.sprint_pr_threshold < triage.old_pr_threshold {
        bail!(
            "sprint_pr_threshold ({}) must not be below old_pr_threshold ({})",
            triage.sprint_pr_threshold,
            triage.old_pr_threshold
        );
    }
    if triage.sprint_labels.is_empty() {
        bail!("triage sprint_labels must name at least one label");
    }
    if triage.display_limit == 0 {
        bail!("triage display_limit must be greater than 0");
    }
    Ok(())
}
