//! Behavior pattern command implementations

use std::path::Path;

use anyhow::Result;

use whisker_core::behavior::{
    analyze_activity_times, analyze_locations, analyze_play, analyze_sleep, behavior_insights,
};
use whisker_core::DiaryEntry;

use crate::cli::BehaviorPart;

use super::{load_entries, print_json};

pub fn cmd_behavior(
    file: &Path,
    cat: Option<&str>,
    part: Option<BehaviorPart>,
    json: bool,
) -> Result<()> {
    let entries = load_entries(file, cat)?;

    match part {
        Some(BehaviorPart::Sleep) => sleep(&entries, json),
        Some(BehaviorPart::Play) => play(&entries, json),
        Some(BehaviorPart::Locations) => locations(&entries, json),
        Some(BehaviorPart::Activity) => activity(&entries, json),
        Some(BehaviorPart::Insights) => insights(&entries, json),
        None => {
            if json {
                return print_json(&serde_json::json!({
                    "sleep": analyze_sleep(&entries),
                    "play": analyze_play(&entries),
                    "locations": analyze_locations(&entries),
                    "activity": analyze_activity_times(&entries),
                    "insights": behavior_insights(&entries),
                }));
            }
            sleep(&entries, false)?;
            play(&entries, false)?;
            locations(&entries, false)?;
            activity(&entries, false)?;
            insights(&entries, false)
        }
    }
}

fn sleep(entries: &[DiaryEntry], json: bool) -> Result<()> {
    let analysis = analyze_sleep(entries);
    if json {
        return print_json(&analysis);
    }

    println!();
    println!("😴 Sleep");
    println!("   ─────────────────────────────────────────────");
    println!("   Records: {}", analysis.sample_size);
    println!("   Average: {:.1} h ({:?})", analysis.average_hours, analysis.duration);
    println!("   Consistency: {:.0}/100", analysis.consistency);
    println!("   Recent trend: {}", analysis.trend);
    Ok(())
}

fn play(entries: &[DiaryEntry], json: bool) -> Result<()> {
    let analysis = analyze_play(entries);
    if json {
        return print_json(&analysis);
    }

    println!();
    println!("🧶 Play");
    println!("   ─────────────────────────────────────────────");
    println!("   Records: {}", analysis.sample_size);
    println!(
        "   Average session: {:.0} min ({:?})",
        analysis.average_minutes, analysis.duration
    );
    println!("   Frequency: {:?}", analysis.frequency);
    println!("   Engagement: {:.0}/100", analysis.engagement);
    Ok(())
}

fn locations(entries: &[DiaryEntry], json: bool) -> Result<()> {
    let analysis = analyze_locations(entries);
    if json {
        return print_json(&analysis);
    }

    println!();
    println!("🗺️  Locations");
    println!("   ─────────────────────────────────────────────");
    for spot in &analysis.spots {
        println!(
            "   {} - {} visits, {:.0}% (~{:.0} min)",
            spot.name, spot.count, spot.percentage, spot.time_spent_minutes
        );
    }
    println!("   Recent changes: {}", analysis.changes.len());
    Ok(())
}

fn activity(entries: &[DiaryEntry], json: bool) -> Result<()> {
    let analysis = analyze_activity_times(entries);
    if json {
        return print_json(&analysis);
    }

    println!();
    println!("⏰ Active Hours");
    println!("   ─────────────────────────────────────────────");
    let peaks: Vec<String> = analysis
        .peak_hours
        .iter()
        .map(|h| format!("{:02}:00", h))
        .collect();
    println!("   Peaks: {}", peaks.join(", "));
    println!(
        "   Periods: morning {:.1} / afternoon {:.1} / evening {:.1} / night {:.1}",
        analysis.periods.morning,
        analysis.periods.afternoon,
        analysis.periods.evening,
        analysis.periods.night
    );
    Ok(())
}

fn insights(entries: &[DiaryEntry], json: bool) -> Result<()> {
    let summary = behavior_insights(entries);
    if json {
        return print_json(&summary);
    }

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────");
    println!("   Activity: {:?}", summary.activity_level);
    println!("   Behavior health: {:?}", summary.behavior_health);
    println!("   Stress: {:?}", summary.stress_level);
    println!();
    Ok(())
}
