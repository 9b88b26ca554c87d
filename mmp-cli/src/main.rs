//! MMP CLI - Command line tool for marine migration and temperature anomaly predictions.

use clap::Parser;
use mmp_cmd::report::OutputFormat;
use mmp_cmd::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "mmp-cli",
    version,
    about = "Marine migration and ocean temperature anomaly predictions"
)]
struct Cli {
    /// Base URL of the prediction service
    #[arg(long, global = true, env = "MMP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Seconds to wait for each prediction call
    #[arg(long, global = true, env = "MMP_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// How to print the results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: mmp_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ClientConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    mmp_cmd::run(cli.command, &config, cli.format).await
}
