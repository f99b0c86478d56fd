//! Whisker CLI - Cat-care diary analytics
//!
//! Usage:
//!   whisker status --file diary.json     Health score and alert summary
//!   whisker trend --metric weight        Fit a trend to a diary metric
//!   whisker predict health               Health risk forecast
//!   whisker serve --port 3000            Start the REST API server

mod cli;
mod commands;


use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let now = cli.as_of.unwrap_or_else(Utc::now);
    let cat = cli.cat.as_deref();

    match cli.command {
        Commands::Status => commands::cmd_status(&cli.file, cat, now, cli.json),
        Commands::Score => commands::cmd_score(&cli.file, cat, now, cli.json),
        Commands::Alerts => commands::cmd_alerts(&cli.file, cat, now, cli.json),
        Commands::Trend { metric } => commands::cmd_trend(&cli.file, cat, metric, cli.json),
        Commands::Behavior { part } => commands::cmd_behavior(&cli.file, cat, part, cli.json),
        Commands::Predict { kind } => commands::cmd_predict(&cli.file, cat, kind, now, cli.json),
        Commands::Weather { lat, lon, days } => {
            commands::cmd_weather(&cli.file, cat, lat, lon, days, cli.json).await
        }
        Commands::Serve { port, host } => commands::cmd_serve(&host, port).await,
    }
}
