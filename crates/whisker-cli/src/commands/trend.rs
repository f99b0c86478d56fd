//! Metric trend command implementation

use std::path::Path;

use anyhow::Result;

use whisker_core::trend::{self, TrendPoint};
use whisker_core::DiaryEntry;

use crate::cli::Metric;

use super::{load_entries, print_json};

pub fn cmd_trend(file: &Path, cat: Option<&str>, metric: Metric, json: bool) -> Result<()> {
    let entries = load_entries(file, cat)?;
    let points = metric_points(&entries, metric);
    let analysis = trend::analyze(&points);

    if json {
        return print_json(&analysis);
    }

    println!();
    println!("📈 Trend: {:?}", metric);
    println!("   ─────────────────────────────────────────────");
    println!("   Points: {}", points.len());
    println!("   Trend: {} (strength {})", analysis.trend, analysis.strength);
    println!("   Duration: {} days", analysis.duration_days);
    println!("   Inflections: {}", analysis.inflection_points.len());
    println!(
        "   Prediction: {} (confidence {:.0}, expected change {:+.3}/step)",
        analysis.prediction.direction,
        analysis.prediction.confidence,
        analysis.prediction.expected_change
    );
    println!();
    Ok(())
}

/// Extract a (date, value) series for one metric from the diary entries
pub fn metric_points(entries: &[DiaryEntry], metric: Metric) -> Vec<TrendPoint> {
    entries
        .iter()
        .filter_map(|e| {
            let value = match metric {
                Metric::Weight => e.health().and_then(|h| h.weight),
                Metric::Activity => e.behavior().map(|b| b.activity_level.ordinal()),
                Metric::Appetite => e.food().map(|f| f.appetite.ordinal()),
                Metric::Sleep => e.behavior().and_then(|b| b.sleep_hours),
            }?;
            Some(TrendPoint {
                date: e.date,
                value,
            })
        })
        .collect()
}
