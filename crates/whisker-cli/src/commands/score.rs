//! Score/status/alerts command implementations

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use whisker_core::{generate_health_alerts, health_score, AlertKind, HealthAlert, HealthScore};

use super::{load_entries, print_json};

pub fn cmd_status(file: &Path, cat: Option<&str>, now: DateTime<Utc>, json: bool) -> Result<()> {
    let entries = load_entries(file, cat)?;
    let score = health_score(&entries, now);
    let alerts = generate_health_alerts(&entries, &score, now);

    if json {
        return print_json(&serde_json::json!({ "score": score, "alerts": alerts }));
    }

    println!();
    println!("🐱 Whisker Status");
    println!("   ─────────────────────────────────────────────");
    println!("   Snapshot: {}", file.display());
    println!("   Entries: {}", entries.len());
    println!();
    print_score_table(&score);
    println!();
    if alerts.is_empty() {
        println!("   ✅ No active alerts");
    } else {
        println!("   Alerts: {}", alerts.len());
        for alert in &alerts {
            print_alert(alert);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_score(file: &Path, cat: Option<&str>, now: DateTime<Utc>, json: bool) -> Result<()> {
    let entries = load_entries(file, cat)?;
    let score = health_score(&entries, now);

    if json {
        return print_json(&score);
    }

    println!();
    println!("📊 Health Score");
    println!("   ─────────────────────────────────────────────");
    print_score_table(&score);
    println!();
    Ok(())
}

pub fn cmd_alerts(file: &Path, cat: Option<&str>, now: DateTime<Utc>, json: bool) -> Result<()> {
    let entries = load_entries(file, cat)?;
    let score = health_score(&entries, now);
    let alerts = generate_health_alerts(&entries, &score, now);

    if json {
        return print_json(&alerts);
    }

    println!();
    if alerts.is_empty() {
        println!("✅ No active alerts");
    } else {
        println!("🔔 Health Alerts ({})", alerts.len());
        println!("   ─────────────────────────────────────────────");
        for alert in &alerts {
            print_alert(alert);
        }
    }
    println!();
    Ok(())
}

fn print_score_table(score: &HealthScore) {
    println!("   Overall: {} ({})", score.overall, score.trend);
    println!("   Weight: {}", score.categories.weight);
    println!("   Activity: {}", score.categories.activity);
    println!("   Appetite: {}", score.categories.appetite);
    println!("   Symptoms: {}", score.categories.symptoms);
}

fn print_alert(alert: &HealthAlert) {
    let icon = match alert.kind {
        AlertKind::Critical => "🚨",
        AlertKind::Warning => "⚠️ ",
        AlertKind::Info => "ℹ️ ",
    };
    println!(
        "   {} [{}/{}] {}",
        icon, alert.category, alert.severity, alert.message
    );
}
