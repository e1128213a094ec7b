//! Cadence announcer binary: evaluates the schedule once and posts the
//! day's message, if any, to the configured chat channels.

use anyhow::Result;
use clap::Parser;

mod bootstrap_helpers;
mod cli_args;
mod run;

use bootstrap_helpers::init_tracing;
use cli_args::Cli;
use run::run_cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run_cli(cli).await
}
