//! Weather impact analysis and forecast-driven behavior outlook
//!
//! The numeric core ([`analyze_impact`], [`predict_outlook`]) is pure over
//! already-fetched samples. The `*_with_provider` wrappers own the call
//! boundary: a provider failure is logged and degrades the result instead
//! of propagating.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{DiaryEntry, Season};
use crate::stats;
use crate::trend::Direction;

use super::{Location, WeatherCondition, WeatherProvider, WeatherSample};

/// Correlation below this magnitude is treated as no signal
const CORRELATION_EPSILON: f64 = 0.1;

/// Forecast/history temperature delta below this is treated as no change (°C)
const TEMPERATURE_EPSILON: f64 = 0.5;

/// Humidity band the cat was active in
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumidityRange {
    pub low: f64,
    pub high: f64,
}

/// Correlations between weather series and behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCorrelations {
    /// Temperature vs ordinal activity
    pub temperature_activity: f64,
    /// Temperature vs sleep hours
    pub temperature_sleep: f64,
    /// Pressure vs daily special-behavior count (symptom proxy)
    pub pressure_symptoms: f64,
    /// Mean ± stddev of humidity on active/very-active days
    pub preferred_humidity: HumidityRange,
}

/// Behavior pattern for one season, derived from entries alone
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPattern {
    pub season: Season,
    pub average_activity: f64,
    /// Special behaviors recorded at least twice in this season
    pub recurring_behaviors: Vec<String>,
    /// Static per-season care note
    pub health_note: String,
    pub samples: usize,
}

/// Combined weather impact analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherImpactAnalysis {
    /// `None` when the weather capability failed or no days overlapped
    pub correlations: Option<WeatherCorrelations>,
    /// Always present; computed from entries without weather data
    pub seasonal_patterns: Vec<SeasonalPattern>,
    pub matched_days: usize,
}

/// Mood outlook under the forecast weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodOutlook {
    Calm,
    Restless,
    Stable,
}

/// Weather-driven health/behavior risks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherRisk {
    UnderExercise,
    Stress,
    Heatstroke,
    Hypothermia,
}

/// Forecast-driven behavior prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPrediction {
    pub outlook_days: u32,
    pub mood: MoodOutlook,
    /// Expected activity direction vs the historical baseline
    pub activity: Direction,
    pub risks: Vec<WeatherRisk>,
    /// Mean forecast temperature, °C
    pub average_temperature: f64,
}

/// Correlate behavior entries with same-calendar-day weather samples
pub fn analyze_impact(entries: &[DiaryEntry], samples: &[WeatherSample]) -> WeatherImpactAnalysis {
    let seasonal = seasonal_patterns(entries);

    let by_date: HashMap<NaiveDate, &WeatherSample> =
        samples.iter().map(|s| (s.date, s)).collect();

    // Per-entry matches for activity/sleep/humidity
    let mut temp_activity: (Vec<f64>, Vec<f64>) = (vec![], vec![]);
    let mut temp_sleep: (Vec<f64>, Vec<f64>) = (vec![], vec![]);
    let mut active_day_humidity: Vec<f64> = vec![];
    let mut all_humidity: Vec<f64> = vec![];
    // Per-day special-behavior counts for the pressure proxy
    let mut daily_specials: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    let mut matched_days: std::collections::HashSet<NaiveDate> = Default::default();

    for entry in entries {
        let Some(behavior) = entry.behavior() else { continue };
        let day = entry.date.date_naive();
        let Some(sample) = by_date.get(&day) else { continue };
        matched_days.insert(day);

        let ordinal = behavior.activity_level.ordinal();
        temp_activity.0.push(sample.temperature);
        temp_activity.1.push(ordinal);

        if let Some(sleep) = behavior.sleep_hours {
            temp_sleep.0.push(sample.temperature);
            temp_sleep.1.push(sleep);
        }

        all_humidity.push(sample.humidity);
        if ordinal >= 4.0 {
            active_day_humidity.push(sample.humidity);
        }

        let slot = daily_specials.entry(day).or_insert((sample.pressure, 0));
        slot.1 += behavior.special_behaviors.len();
    }

    let correlations = if matched_days.is_empty() {
        None
    } else {
        let (pressures, special_counts): (Vec<f64>, Vec<f64>) = daily_specials
            .values()
            .map(|&(pressure, count)| (pressure, count as f64))
            .unzip();

        // Prefer humidity on active days; fall back to all matched days
        // when the cat was never active in the overlap.
        let humidity_basis = if active_day_humidity.is_empty() {
            &all_humidity
        } else {
            &active_day_humidity
        };
        let humidity_mean = stats::mean(humidity_basis);
        let humidity_sd = stats::std_dev(humidity_basis);

        Some(WeatherCorrelations {
            temperature_activity: stats::pearson(&temp_activity.0, &temp_activity.1),
            temperature_sleep: stats::pearson(&temp_sleep.0, &temp_sleep.1),
            pressure_symptoms: stats::pearson(&pressures, &special_counts),
            preferred_humidity: HumidityRange {
                low: humidity_mean - humidity_sd,
                high: humidity_mean + humidity_sd,
            },
        })
    };

    debug!(matched = matched_days.len(), "analyzed weather impact");

    WeatherImpactAnalysis {
        correlations,
        seasonal_patterns: seasonal,
        matched_days: matched_days.len(),
    }
}

/// Fetch history from the provider and analyze, degrading on failure
pub async fn analyze_with_provider(
    entries: &[DiaryEntry],
    provider: &dyn WeatherProvider,
    location: &Location,
    history_days: u32,
) -> WeatherImpactAnalysis {
    match provider.historical(location, history_days).await {
        Ok(samples) => analyze_impact(entries, &samples),
        Err(err) => {
            warn!(error = %err, "weather history unavailable, returning partial analysis");
            WeatherImpactAnalysis {
                correlations: None,
                seasonal_patterns: seasonal_patterns(entries),
                matched_days: 0,
            }
        }
    }
}

/// Seasonal behavior buckets, computed from entries alone
pub fn seasonal_patterns(entries: &[DiaryEntry]) -> Vec<SeasonalPattern> {
    Season::all()
        .iter()
        .map(|&season| {
            let in_season: Vec<&DiaryEntry> = entries
                .iter()
                .filter(|e| e.behavior().is_some())
                .filter(|e| Season::for_month(e.date.month()) == season)
                .collect();

            let ordinals: Vec<f64> = in_season
                .iter()
                .map(|e| e.behavior().unwrap().activity_level.ordinal())
                .collect();

            let mut behavior_counts: BTreeMap<&str, usize> = BTreeMap::new();
            for entry in &in_season {
                for b in &entry.behavior().unwrap().special_behaviors {
                    *behavior_counts.entry(b.as_str()).or_insert(0) += 1;
                }
            }
            let recurring_behaviors: Vec<String> = behavior_counts
                .into_iter()
                .filter(|&(_, count)| count >= 2)
                .map(|(name, _)| name.to_string())
                .collect();

            SeasonalPattern {
                season,
                average_activity: stats::mean(&ordinals),
                recurring_behaviors,
                health_note: season_health_note(season).to_string(),
                samples: in_season.len(),
            }
        })
        .collect()
}

/// Static per-season care note
fn season_health_note(season: Season) -> &'static str {
    match season {
        Season::Spring => "Shedding season: brush more often and watch for hairballs",
        Season::Summer => "Heat risk: keep water fresh and shaded rest spots available",
        Season::Autumn => "Appetite often rises as temperatures fall; watch portions",
        Season::Winter => "Less movement and dry indoor air: watch weight and joints",
    }
}

/// Combine forecast samples with historical correlations into an outlook
pub fn predict_outlook(
    correlations: Option<&WeatherCorrelations>,
    historical: &[WeatherSample],
    forecast: &[WeatherSample],
) -> WeatherPrediction {
    let forecast_temps: Vec<f64> = forecast.iter().map(|s| s.temperature).collect();
    let average_temperature = stats::mean(&forecast_temps);

    let rainy_days = forecast
        .iter()
        .filter(|s| s.condition == WeatherCondition::Rainy)
        .count();
    let stormy = forecast
        .iter()
        .any(|s| s.condition == WeatherCondition::Stormy);
    let hot_days = forecast.iter().filter(|s| s.temperature > 30.0).count();
    let cold_days = forecast.iter().filter(|s| s.temperature < 5.0).count();

    let mut mood = MoodOutlook::Stable;
    let mut risks = Vec::new();

    if rainy_days >= 3 {
        mood = MoodOutlook::Calm;
        risks.push(WeatherRisk::UnderExercise);
    }
    if stormy {
        mood = MoodOutlook::Restless;
        risks.push(WeatherRisk::Stress);
    }
    if hot_days >= 2 {
        risks.push(WeatherRisk::Heatstroke);
    }
    if cold_days >= 2 {
        risks.push(WeatherRisk::Hypothermia);
    }

    // Activity direction: sign of (temperature↔activity correlation) times
    // the forecast-vs-historical temperature delta
    let historical_temps: Vec<f64> = historical.iter().map(|s| s.temperature).collect();
    let temp_delta = average_temperature - stats::mean(&historical_temps);
    let temp_activity = correlations.map(|c| c.temperature_activity).unwrap_or(0.0);

    let activity = if historical.is_empty()
        || temp_activity.abs() < CORRELATION_EPSILON
        || temp_delta.abs() < TEMPERATURE_EPSILON
    {
        Direction::Stable
    } else if temp_activity * temp_delta > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    WeatherPrediction {
        outlook_days: forecast.len() as u32,
        mood,
        activity,
        risks,
        average_temperature,
    }
}

/// Fetch forecast and history from the provider and build the outlook
///
/// Returns `None` when the forecast cannot be fetched; a missing history
/// only degrades the activity direction to stable.
pub async fn outlook_with_provider(
    entries: &[DiaryEntry],
    provider: &dyn WeatherProvider,
    location: &Location,
    forecast_days: u32,
    history_days: u32,
) -> Option<WeatherPrediction> {
    let forecast = match provider.forecast(location, forecast_days).await {
        Ok(samples) => samples,
        Err(err) => {
            warn!(error = %err, "weather forecast unavailable, skipping outlook");
            return None;
        }
    };

    let historical = match provider.historical(location, history_days).await {
        Ok(samples) => samples,
        Err(err) => {
            warn!(error = %err, "weather history unavailable, outlook uses forecast only");
            vec![]
        }
    };

    let impact = analyze_impact(entries, &historical);
    Some(predict_outlook(
        impact.correlations.as_ref(),
        &historical,
        &forecast,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, BehaviorData};
    use crate::test_utils::{behavior_entry, custom_behavior, sleep_entry};
    use crate::weather::MockWeather;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    const LOCATION: Location = Location {
        latitude: 47.6,
        longitude: -122.3,
    };

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap() + Duration::days(offset)
    }

    fn sample(offset: i64, temperature: f64, condition: WeatherCondition) -> WeatherSample {
        WeatherSample {
            date: day(offset).date_naive(),
            temperature,
            humidity: 55.0,
            pressure: 1012.0,
            condition,
            wind_speed: 8.0,
            uv_index: 3.0,
        }
    }

    #[test]
    fn test_no_overlap_yields_no_correlations() {
        let entries = vec![behavior_entry(day(0), ActivityLevel::Active)];
        let samples = vec![sample(30, 20.0, WeatherCondition::Clear)];
        let analysis = analyze_impact(&entries, &samples);

        assert!(analysis.correlations.is_none());
        assert_eq!(analysis.matched_days, 0);
        assert_eq!(analysis.seasonal_patterns.len(), 4);
    }

    #[test]
    fn test_temperature_activity_correlation() {
        // Warmer days, more active cat
        let mut entries = Vec::new();
        let mut samples = Vec::new();
        let levels = [
            ActivityLevel::Lethargic,
            ActivityLevel::Calm,
            ActivityLevel::Normal,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ];
        for (i, level) in levels.iter().enumerate() {
            entries.push(behavior_entry(day(i as i64), *level));
            samples.push(sample(i as i64, 10.0 + 4.0 * i as f64, WeatherCondition::Clear));
        }

        let analysis = analyze_impact(&entries, &samples);
        let correlations = analysis.correlations.unwrap();
        assert!(correlations.temperature_activity > 0.95);
        assert_eq!(analysis.matched_days, 5);
    }

    #[test]
    fn test_temperature_sleep_correlation() {
        let mut entries = Vec::new();
        let mut samples = Vec::new();
        for i in 0..6 {
            // Hotter days, longer sleep
            entries.push(sleep_entry(day(i), 10.0 + i as f64));
            samples.push(sample(i, 15.0 + 2.0 * i as f64, WeatherCondition::Clear));
        }

        let correlations = analyze_impact(&entries, &samples).correlations.unwrap();
        assert!(correlations.temperature_sleep > 0.95);
    }

    #[test]
    fn test_preferred_humidity_uses_active_days() {
        let mut entries = Vec::new();
        let mut samples = Vec::new();
        for i in 0..4 {
            let level = if i < 2 {
                ActivityLevel::VeryActive
            } else {
                ActivityLevel::Lethargic
            };
            entries.push(behavior_entry(day(i), level));
            let mut s = sample(i, 20.0, WeatherCondition::Clear);
            s.humidity = if i < 2 { 40.0 } else { 80.0 };
            samples.push(s);
        }

        let correlations = analyze_impact(&entries, &samples).correlations.unwrap();
        // Only the two 40% humidity days were active
        assert_eq!(correlations.preferred_humidity.low, 40.0);
        assert_eq!(correlations.preferred_humidity.high, 40.0);
    }

    #[test]
    fn test_seasonal_recurring_behaviors() {
        let mut entries = Vec::new();
        for i in 0..3 {
            entries.push(custom_behavior(
                day(i),
                BehaviorData {
                    activity_level: ActivityLevel::Normal,
                    sleep_hours: None,
                    play_time: None,
                    litter_box_uses: None,
                    special_behaviors: vec!["hiding".to_string()],
                    location: vec![],
                },
            ));
        }
        entries.push(custom_behavior(
            day(3),
            BehaviorData {
                activity_level: ActivityLevel::Normal,
                sleep_hours: None,
                play_time: None,
                litter_box_uses: None,
                special_behaviors: vec!["yowling".to_string()],
                location: vec![],
            },
        ));

        let patterns = seasonal_patterns(&entries);
        let summer = patterns
            .iter()
            .find(|p| p.season == Season::Summer)
            .unwrap();
        // hiding ×3 recurs, yowling ×1 does not
        assert_eq!(summer.recurring_behaviors, vec!["hiding"]);
        assert_eq!(summer.samples, 4);
        assert!(!summer.health_note.is_empty());
    }

    #[test]
    fn test_outlook_rainy_week() {
        let forecast: Vec<_> = (0..5)
            .map(|i| sample(i, 12.0, WeatherCondition::Rainy))
            .collect();
        let prediction = predict_outlook(None, &[], &forecast);

        assert_eq!(prediction.mood, MoodOutlook::Calm);
        assert_eq!(prediction.risks, vec![WeatherRisk::UnderExercise]);
        assert_eq!(prediction.activity, Direction::Stable);
        assert_eq!(prediction.outlook_days, 5);
    }

    #[test]
    fn test_outlook_storm_overrides_mood() {
        let mut forecast: Vec<_> = (0..4)
            .map(|i| sample(i, 12.0, WeatherCondition::Rainy))
            .collect();
        forecast.push(sample(4, 12.0, WeatherCondition::Stormy));
        let prediction = predict_outlook(None, &[], &forecast);

        assert_eq!(prediction.mood, MoodOutlook::Restless);
        assert_eq!(
            prediction.risks,
            vec![WeatherRisk::UnderExercise, WeatherRisk::Stress]
        );
    }

    #[test]
    fn test_outlook_temperature_risks() {
        let mut forecast = vec![
            sample(0, 32.0, WeatherCondition::Clear),
            sample(1, 33.0, WeatherCondition::Clear),
        ];
        assert_eq!(
            predict_outlook(None, &[], &forecast).risks,
            vec![WeatherRisk::Heatstroke]
        );

        forecast = vec![
            sample(0, 2.0, WeatherCondition::Snowy),
            sample(1, 1.0, WeatherCondition::Snowy),
        ];
        assert_eq!(
            predict_outlook(None, &[], &forecast).risks,
            vec![WeatherRisk::Hypothermia]
        );
    }

    #[test]
    fn test_outlook_activity_direction() {
        let correlations = WeatherCorrelations {
            temperature_activity: 0.8,
            temperature_sleep: 0.0,
            pressure_symptoms: 0.0,
            preferred_humidity: HumidityRange { low: 40.0, high: 60.0 },
        };
        let historical: Vec<_> = (0..5)
            .map(|i| sample(i, 10.0, WeatherCondition::Clear))
            .collect();
        let warm_forecast: Vec<_> = (5..10)
            .map(|i| sample(i, 20.0, WeatherCondition::Clear))
            .collect();

        let prediction = predict_outlook(Some(&correlations), &historical, &warm_forecast);
        assert_eq!(prediction.activity, Direction::Up);

        let cold_forecast: Vec<_> = (5..10)
            .map(|i| sample(i, 2.0, WeatherCondition::Clear))
            .collect();
        let prediction = predict_outlook(Some(&correlations), &historical, &cold_forecast);
        assert_eq!(prediction.activity, Direction::Down);
    }

    #[tokio::test]
    async fn test_failing_provider_degrades_to_partial_result() {
        let entries = vec![behavior_entry(day(0), ActivityLevel::Active)];
        let provider = MockWeather::unhealthy();

        let analysis = analyze_with_provider(&entries, &provider, &LOCATION, 30).await;
        assert!(analysis.correlations.is_none());
        // Entry-derived sections still populated
        assert_eq!(analysis.seasonal_patterns.len(), 4);

        let outlook = outlook_with_provider(&entries, &provider, &LOCATION, 7, 30).await;
        assert!(outlook.is_none());
    }

    #[tokio::test]
    async fn test_healthy_provider_produces_outlook() {
        let entries = vec![behavior_entry(day(0), ActivityLevel::Active)];
        let provider = MockWeather::new();

        let outlook = outlook_with_provider(&entries, &provider, &LOCATION, 7, 30)
            .await
            .expect("healthy provider should yield an outlook");
        assert_eq!(outlook.outlook_days, 7);
    }
}
