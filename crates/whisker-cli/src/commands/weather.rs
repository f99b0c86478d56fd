//! Weather impact command implementation

use std::path::Path;

use anyhow::{Context, Result};

use whisker_core::weather::{
    analyze_with_provider, outlook_with_provider, Location, OpenMeteo, WeatherImpactAnalysis,
    WeatherPrediction,
};
use whisker_core::Settings;

use super::{load_entries, print_json};

pub async fn cmd_weather(
    file: &Path,
    cat: Option<&str>,
    lat: Option<f64>,
    lon: Option<f64>,
    days: Option<u32>,
    json: bool,
) -> Result<()> {
    let entries = load_entries(file, cat)?;
    let settings = Settings::load()?;

    let location = match (lat, lon) {
        (Some(latitude), Some(longitude)) => Location {
            latitude,
            longitude,
        },
        _ => settings
            .default_location()
            .context("no location: pass --lat/--lon or configure [location] in whisker.toml")?,
    };

    let Some(provider) = OpenMeteo::from_env() else {
        println!();
        println!("🌦️  Weather provider disabled (WHISKER_WEATHER=off)");
        println!("   Unset WHISKER_WEATHER to enable Open-Meteo lookups");
        println!();
        return Ok(());
    };

    let history_days = days.unwrap_or(settings.weather.history_days);
    let impact = analyze_with_provider(&entries, &provider, &location, history_days).await;
    let outlook = outlook_with_provider(
        &entries,
        &provider,
        &location,
        settings.weather.forecast_days,
        history_days,
    )
    .await;

    if json {
        return print_json(&serde_json::json!({
            "impact": impact,
            "outlook": outlook,
        }));
    }

    print_impact(&impact);
    print_outlook(outlook.as_ref());
    Ok(())
}

fn print_impact(impact: &WeatherImpactAnalysis) {
    println!();
    println!("🌦️  Weather Impact");
    println!("   ─────────────────────────────────────────────");
    println!("   Matched days: {}", impact.matched_days);
    match &impact.correlations {
        Some(c) => {
            println!("   Temperature ↔ activity: {:+.2}", c.temperature_activity);
            println!("   Temperature ↔ sleep: {:+.2}", c.temperature_sleep);
            println!("   Pressure ↔ symptoms: {:+.2}", c.pressure_symptoms);
            println!(
                "   Preferred humidity: {:.0}-{:.0}%",
                c.preferred_humidity.low, c.preferred_humidity.high
            );
        }
        None => println!("   (no weather data matched; correlations unavailable)"),
    }
    println!();
    println!("   Seasonal patterns:");
    for pattern in &impact.seasonal_patterns {
        println!(
            "   {:?}: activity {:.1} ({} records) - {}",
            pattern.season, pattern.average_activity, pattern.samples, pattern.health_note
        );
    }
}

fn print_outlook(outlook: Option<&WeatherPrediction>) {
    println!();
    match outlook {
        Some(p) => {
            println!(
                "🔮 Outlook ({} days, avg {:.1} °C): mood {:?}, activity {}",
                p.outlook_days, p.average_temperature, p.mood, p.activity
            );
            for risk in &p.risks {
                println!("   ⚠️  {:?}", risk);
            }
        }
        None => println!("🔮 Outlook unavailable (forecast could not be fetched)"),
    }
    println!();
}
