//! Dispatcher CLI
//!
//! Command-line interface for the per-check notification dispatch service.

use std::path::PathBuf;

use clap::Parser;
use dispatcher::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "dispatcher")]
#[command(about = "Per-check notification dispatch service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the notification store file (overrides config file)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, store={:?}, log_level={:?}",
        args.config,
        args.store,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(store) = args.store {
        config.store_path = store;
    }

    tracing::info!("Starting dispatcher service");
    tracing::debug!(
        "Checks: {}, Senders: {}, Change channel capacity: {}",
        config.checks.len(),
        config.senders.len(),
        config.change_channel_capacity
    );

    dispatcher::run(config).await?;

    Ok(())
}
