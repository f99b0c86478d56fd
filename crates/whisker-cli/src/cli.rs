//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

/// Whisker - Cat-care diary analytics
#[derive(Parser)]
#[command(name = "whisker")]
#[command(about = "Analytics and predictions for the Whisker cat diary", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Diary snapshot to analyze (JSON export from the diary app)
    #[arg(long, default_value = "diary.json", global = true)]
    pub file: PathBuf,

    /// Only analyze entries for this cat id (snapshots may interleave cats)
    #[arg(long, global = true)]
    pub cat: Option<String>,

    /// Evaluation instant for rolling windows (RFC 3339, defaults to now)
    ///
    /// Scores, alerts, and predictions anchor their 30/14-day windows at
    /// this instant, so results are reproducible for a fixed snapshot.
    #[arg(long, global = true)]
    pub as_of: Option<DateTime<Utc>>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as pretty JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the health score plus an alert summary
    Status,

    /// Compute the weighted 30-day health score
    Score,

    /// Generate rule-based health alerts
    Alerts,

    /// Fit a linear trend to a diary metric
    Trend {
        /// Metric to analyze
        #[arg(short, long, value_enum, default_value = "weight")]
        metric: Metric,
    },

    /// Analyze behavior patterns
    Behavior {
        /// One aspect, or everything when omitted
        #[arg(value_enum)]
        part: Option<BehaviorPart>,
    },

    /// Predict health, behavior, or weight development
    Predict {
        /// One prediction, or all three when omitted
        #[arg(value_enum)]
        kind: Option<PredictKind>,
    },

    /// Correlate diary data with local weather
    Weather {
        /// Latitude (falls back to the configured default location)
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude
        #[arg(long)]
        lon: Option<f64>,

        /// Days of weather history to correlate against
        #[arg(long)]
        days: Option<u32>,
    },

    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

/// Diary metrics the trend command can extract
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Metric {
    Weight,
    Activity,
    Appetite,
    Sleep,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BehaviorPart {
    Sleep,
    Play,
    Locations,
    Activity,
    Insights,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PredictKind {
    Health,
    Behavior,
    Weight,
}
