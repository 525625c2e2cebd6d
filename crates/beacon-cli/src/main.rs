//! Main entry point for the `beacon` binary.

use anyhow::{Context, Result};
use beacon_cli::{App, Args};
use beacon_common::{format_interval, format_timestamp, init_logging};
use beacon_config::{SettingsLoader, SettingsValidator};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = SettingsLoader::read(args.config.clone())
        .await
        .context("Failed to load settings")?;
    args.apply(&mut settings);
    SettingsValidator::validate(&settings)?;

    init_logging(settings.logging.to_logging_config())?;

    info!(
        beacon = %settings.beacon.name,
        source = %settings.beacon.source_path.display(),
        interval = %format_interval(settings.beacon.interval()),
        immediate = args.immediate,
        "Starting beacon"
    );

    let report = App::new(settings)
        .immediate(args.immediate)
        .max_requests(args.requests)
        .run(shutdown_signal())
        .await?;

    info!(
        served = report.served,
        cycles = report.stats.cycles,
        errors = report.stats.errors,
        last_refresh = %report
            .stats
            .last_completed_at
            .map_or_else(|| "never".to_string(), format_timestamp),
        "Beacon stopped"
    );
    Ok(())
}

/// Resolves on Ctrl+C. If the signal can't be listened for, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
