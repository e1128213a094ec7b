//! Command-line arguments for the `cadence` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "cadence",
    about = "Posts the day's team-cadence announcement to chat channels",
    version
)]
pub struct Cli {
    #[arg(help = "Path to the YAML schedule configuration document")]
    pub config: PathBuf,

    #[arg(help = "Chat webhook URL that receives the composed message")]
    pub webhook_url: String,

    #[arg(
        required = true,
        help = "Target channel names, one delivery per channel"
    )]
    pub channels: Vec<String>,

    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub token for the triage search API (optional, raises rate limits)"
    )]
    pub github_token: Option<String>,

    #[arg(
        long = "github-api-base",
        env = "CADENCE_GITHUB_API_BASE",
        default_value = "https://api.github.com",
        help = "Base URL for the GitHub search API"
    )]
    pub github_api_base: String,

    #[arg(
        long = "request-timeout-ms",
        env = "CADENCE_REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        help = "Bound for every external HTTP call in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long,
        env = "CADENCE_TODAY",
        help = "Evaluate the schedule for this date (YYYY-MM-DD) instead of the current day"
    )]
    pub today: Option<NaiveDate>,
}
