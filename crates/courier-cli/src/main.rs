//! Courier CLI
//!
//! Command-line administration for Courier access policy and configuration.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use courier_cli::cli::{Cli, Command};
use courier_cli::config::DEFAULT_LOG_LEVEL;
use courier_cli::config_handlers::handle_config_command;
use courier_cli::policy_handlers::handle_policy_command;
use courier_cli::CourierConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    // The log filter comes from RUST_LOG, then the config file
    let log_level = CourierConfig::load(config_path)
        .map(|config| config.log_level)
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .init();

    match cli.command {
        Command::Config { action } => handle_config_command(config_path, action)?,
        Command::Policy { action } => handle_policy_command(config_path, action)?,
    }

    tracing::debug!("courier command completed");
    Ok(())
}
