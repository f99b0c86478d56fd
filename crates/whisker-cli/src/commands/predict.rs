//! Prediction command implementations

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use whisker_core::predict::{predict_behavior, predict_health, predict_weight};
use whisker_core::DiaryEntry;

use crate::cli::PredictKind;

use super::{load_entries, print_json};

pub fn cmd_predict(
    file: &Path,
    cat: Option<&str>,
    kind: Option<PredictKind>,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let entries = load_entries(file, cat)?;

    match kind {
        Some(PredictKind::Health) => health(&entries, now, json),
        Some(PredictKind::Behavior) => behavior(&entries, json),
        Some(PredictKind::Weight) => weight(&entries, json),
        None => {
            if json {
                return print_json(&serde_json::json!({
                    "health": predict_health(&entries, now),
                    "behavior": predict_behavior(&entries),
                    "weight": predict_weight(&entries),
                }));
            }
            health(&entries, now, false)?;
            behavior(&entries, false)?;
            weight(&entries, false)
        }
    }
}

fn health(entries: &[DiaryEntry], now: DateTime<Utc>, json: bool) -> Result<()> {
    let prediction = predict_health(entries, now);
    if json {
        return print_json(&prediction);
    }

    println!();
    println!("🩺 Health Prediction");
    println!("   ─────────────────────────────────────────────");
    if prediction.low_confidence {
        println!("   ⚠️  Low confidence: not enough diary entries");
    }
    println!("   Risk: {} ({}%)", prediction.risk, prediction.probability);
    println!(
        "   Vet visit within: {} days",
        prediction.vet_visit_within_days
    );
    for factor in &prediction.factors {
        println!("   • {}", factor);
    }
    Ok(())
}

fn behavior(entries: &[DiaryEntry], json: bool) -> Result<()> {
    let prediction = predict_behavior(entries);
    if json {
        return print_json(&prediction);
    }

    println!();
    println!("🐈 Behavior Prediction");
    println!("   ─────────────────────────────────────────────");
    if prediction.low_confidence {
        println!("   ⚠️  Low confidence: not enough diary entries");
    }
    println!("   Mood trend: {}", prediction.mood_trend);
    println!("   Activity forecast: {:.0}/100", prediction.activity_forecast);
    for indicator in &prediction.stress_indicators {
        println!("   • {}", indicator);
    }
    println!("   Social needs: {}", prediction.social_needs);
    Ok(())
}

fn weight(entries: &[DiaryEntry], json: bool) -> Result<()> {
    let prediction = predict_weight(entries);
    if json {
        return print_json(&prediction);
    }

    println!();
    println!("⚖️  Weight Prediction");
    println!("   ─────────────────────────────────────────────");
    if prediction.low_confidence {
        println!("   ⚠️  Low confidence: not enough weighings");
    }
    println!(
        "   Current: {:.2} kg → Target: {:.2} kg in ~{} days",
        prediction.current_weight, prediction.target_weight, prediction.days_to_target
    );
    for risk in &prediction.risk_factors {
        println!("   • {}", risk);
    }
    println!();
    Ok(())
}
