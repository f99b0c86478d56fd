//! Short-horizon predictions
//!
//! Rule-driven forecasts built on top of the trend analyzer. Every
//! prediction has a minimum data threshold; below it the function returns
//! an explicit low-confidence default instead of erroring.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::DiaryEntry;
use crate::stats;
use crate::trend::{self, Trend, TrendPoint};

/// Entries of the relevant type required for a confident prediction
const MIN_ENTRIES: usize = 10;

/// Weighings required for a weight prediction
const MIN_WEIGHINGS: usize = 3;

/// Base probability every health prediction starts from
const BASE_PROBABILITY: u8 = 10;

/// Ordered risk classification driving follow-up cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// One step up the ladder (saturating at critical)
    pub fn escalate(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Critical,
            Self::Critical => Self::Critical,
        }
    }

    /// Recommended maximum days until the next vet visit
    pub fn vet_window_days(&self) -> i64 {
        match self {
            Self::Critical => 7,
            Self::High => 30,
            Self::Medium => 90,
            Self::Low => 365,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health risk forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPrediction {
    pub risk: RiskLevel,
    /// 0-100
    pub probability: u8,
    /// Recommended days until the next vet visit
    pub vet_visit_within_days: i64,
    /// Human-readable contributing factors
    pub factors: Vec<String>,
    pub low_confidence: bool,
}

/// Behavior forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorPrediction {
    pub mood_trend: Trend,
    /// Mean of the last ≤7 ordinal activity levels, scaled to 0-100
    pub activity_forecast: f64,
    pub stress_indicators: Vec<String>,
    /// Never empty; a fallback suggestion is produced below threshold
    pub social_needs: String,
    pub low_confidence: bool,
}

/// Weight forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightPrediction {
    pub current_weight: f64,
    pub target_weight: f64,
    pub days_to_target: i64,
    pub risk_factors: Vec<String>,
    pub low_confidence: bool,
}

/// Predict health risk from recent symptoms, weight trend, and medication
pub fn predict_health(entries: &[DiaryEntry], now: DateTime<Utc>) -> HealthPrediction {
    let health_entries: Vec<&DiaryEntry> = entries.iter().filter(|e| e.health().is_some()).collect();

    if health_entries.len() < MIN_ENTRIES {
        return HealthPrediction {
            risk: RiskLevel::Low,
            probability: BASE_PROBABILITY,
            vet_visit_within_days: RiskLevel::Low.vet_window_days(),
            factors: vec!["Not enough health entries for a confident prediction".to_string()],
            low_confidence: true,
        };
    }

    let mut risk = RiskLevel::Low;
    let mut probability = BASE_PROBABILITY as u32;
    let mut factors = Vec::new();

    // Symptom load over the trailing 30 days
    let window_start = now - Duration::days(30);
    let symptom_count: usize = health_entries
        .iter()
        .filter(|e| e.date > window_start && e.date <= now)
        .map(|e| e.health().unwrap().symptoms.len())
        .sum();
    if symptom_count > 5 {
        probability += 30;
        risk = RiskLevel::High;
        factors.push(format!("{} symptoms recorded in the last 30 days", symptom_count));
    }

    // Declining weight with a strong fit
    let weight_points: Vec<TrendPoint> = health_entries
        .iter()
        .filter_map(|e| {
            e.health().unwrap().weight.map(|w| TrendPoint {
                date: e.date,
                value: w,
            })
        })
        .collect();
    let weight_trend = trend::analyze(&weight_points);
    if weight_trend.trend == Trend::Declining && weight_trend.strength > 70.0 {
        probability += 25;
        risk = risk.escalate();
        factors.push("Weight has been declining steadily".to_string());
    }

    // Active medication
    let medicated = health_entries
        .iter()
        .filter(|e| e.date > window_start && e.date <= now)
        .any(|e| !e.health().unwrap().medication.is_empty());
    if medicated {
        probability += 15;
        factors.push("Active medication recorded".to_string());
    }

    let probability = probability.min(100) as u8;

    // Vet window: risk bucket minus days since the last recorded visit,
    // floored at a week. No recorded visit leaves the full bucket.
    let last_visit = health_entries
        .iter()
        .filter(|e| e.health().unwrap().vet_visit.is_some())
        .map(|e| e.date)
        .max();
    let vet_visit_within_days = match last_visit {
        Some(date) => (risk.vet_window_days() - (now - date).num_days()).max(7),
        None => risk.vet_window_days(),
    };

    debug!(%risk, probability, vet_visit_within_days, "predicted health");

    HealthPrediction {
        risk,
        probability,
        vet_visit_within_days,
        factors,
        low_confidence: false,
    }
}

/// Predict near-term behavior from recent activity
pub fn predict_behavior(entries: &[DiaryEntry]) -> BehaviorPrediction {
    let mut behavior_entries: Vec<&DiaryEntry> =
        entries.iter().filter(|e| e.behavior().is_some()).collect();
    behavior_entries.sort_by_key(|e| e.date);

    if behavior_entries.len() < MIN_ENTRIES {
        return BehaviorPrediction {
            mood_trend: Trend::Stable,
            activity_forecast: 50.0,
            stress_indicators: vec![],
            social_needs: "Keep a regular daily play routine while more observations accumulate"
                .to_string(),
            low_confidence: true,
        };
    }

    let points: Vec<TrendPoint> = behavior_entries
        .iter()
        .map(|e| TrendPoint {
            date: e.date,
            value: e.behavior().unwrap().activity_level.ordinal(),
        })
        .collect();
    let mood_trend = trend::analyze(&points).trend;

    let recent: Vec<&&DiaryEntry> = behavior_entries.iter().rev().take(7).collect();
    let recent_ordinals: Vec<f64> = recent
        .iter()
        .map(|e| e.behavior().unwrap().activity_level.ordinal())
        .collect();
    let activity_forecast = stats::mean(&recent_ordinals) * 20.0;

    let mut stress_indicators = Vec::new();
    let low_days = recent
        .iter()
        .filter(|e| e.behavior().unwrap().activity_level.is_low())
        .count();
    if low_days >= 4 {
        stress_indicators.push(format!(
            "Low activity on {} of the last {} days",
            low_days,
            recent.len()
        ));
    }
    let special_days = recent
        .iter()
        .filter(|e| !e.behavior().unwrap().special_behaviors.is_empty())
        .count();
    if special_days >= 3 {
        stress_indicators.push(format!(
            "Unusual behaviors on {} of the last {} days",
            special_days,
            recent.len()
        ));
    }

    // Social needs from average recorded play time. The thresholds (0.5/3)
    // are carried verbatim from the diary app even though play_time is
    // logged in minutes; see the unit note in DESIGN.md.
    let play_times: Vec<f64> = behavior_entries
        .iter()
        .filter_map(|e| e.behavior().unwrap().play_time)
        .collect();
    let avg_play = stats::mean(&play_times);
    let social_needs = if avg_play < 0.5 {
        "Needs significantly more interactive play".to_string()
    } else if avg_play < 3.0 {
        "Would benefit from more play sessions".to_string()
    } else {
        "Social and play needs look well covered".to_string()
    };

    debug!(%mood_trend, activity_forecast, "predicted behavior");

    BehaviorPrediction {
        mood_trend,
        activity_forecast,
        stress_indicators,
        social_needs,
        low_confidence: false,
    }
}

/// Predict weight development from the feeding pattern
pub fn predict_weight(entries: &[DiaryEntry]) -> WeightPrediction {
    let mut weighings: Vec<(DateTime<Utc>, f64)> = entries
        .iter()
        .filter_map(|e| e.health().and_then(|h| h.weight).map(|w| (e.date, w)))
        .collect();
    weighings.sort_by_key(|(date, _)| *date);

    if weighings.len() < MIN_WEIGHINGS {
        let current = weighings.last().map(|(_, w)| *w).unwrap_or(0.0);
        return WeightPrediction {
            current_weight: current,
            target_weight: current,
            days_to_target: 0,
            risk_factors: vec!["Not enough weighings for a confident prediction".to_string()],
            low_confidence: true,
        };
    }

    let current_weight = weighings[weighings.len() - 1].1;

    // Daily calorie proxy: grams offered × 4, averaged over the trailing
    // 30 food entries
    let mut food: Vec<&DiaryEntry> = entries.iter().filter(|e| e.food().is_some()).collect();
    food.sort_by_key(|e| e.date);
    let amounts: Vec<f64> = food
        .iter()
        .rev()
        .take(30)
        .map(|e| e.food().unwrap().amount)
        .collect();
    let calorie_proxy = stats::mean(&amounts.iter().map(|a| a * 4.0).collect::<Vec<_>>());

    let target_weight = if calorie_proxy > 300.0 {
        current_weight * 0.95
    } else if calorie_proxy < 200.0 {
        current_weight * 1.05
    } else {
        current_weight
    };

    // 30 days per 0.1 kg of change
    let delta = (target_weight - current_weight).abs();
    let days_to_target = (delta / 0.1 * 30.0).round() as i64;

    let mut risk_factors = Vec::new();
    let last_three: Vec<f64> = weighings.iter().rev().take(3).map(|(_, w)| *w).collect();
    let swing = last_three.iter().cloned().fold(f64::MIN, f64::max)
        - last_three.iter().cloned().fold(f64::MAX, f64::min);
    if swing > 0.5 {
        risk_factors.push(format!("Rapid weight change ({:.1} kg across recent weighings)", swing));
    }
    if stats::coefficient_of_variation(&amounts) > 0.5 {
        risk_factors.push("Inconsistent feeding amounts".to_string());
    }

    debug!(current_weight, target_weight, days_to_target, "predicted weight");

    WeightPrediction {
        current_weight,
        target_weight,
        days_to_target,
        risk_factors,
        low_confidence: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, AppetiteLevel, BehaviorData};
    use crate::test_utils::{
        behavior_entry, custom_behavior, food_entry, health_entry, medication_entry,
        vet_visit_entry, weight_entry,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn day(offset: i64) -> DateTime<Utc> {
        now() - Duration::days(offset)
    }

    #[test]
    fn test_health_below_threshold() {
        let entries = vec![health_entry(day(1), vec![])];
        let prediction = predict_health(&entries, now());
        assert!(prediction.low_confidence);
        assert_eq!(prediction.risk, RiskLevel::Low);
        assert_eq!(prediction.probability, 10);
        assert_eq!(prediction.vet_visit_within_days, 365);
    }

    #[test]
    fn test_health_symptom_load_escalates_to_high() {
        let mut entries: Vec<_> = (1..=7)
            .map(|i| health_entry(day(i), vec!["sneezing".to_string()]))
            .collect();
        entries.extend((8..=12).map(|i| health_entry(day(i), vec![])));

        let prediction = predict_health(&entries, now());
        assert!(!prediction.low_confidence);
        assert_eq!(prediction.risk, RiskLevel::High);
        // 10 base + 30 symptoms
        assert_eq!(prediction.probability, 40);
        assert_eq!(prediction.vet_visit_within_days, 30);
    }

    #[test]
    fn test_health_declining_weight_escalates() {
        // 12 weighings, steady decline: strong fit
        let entries: Vec<_> = (0..12)
            .map(|i| weight_entry(day(12 - i), 5.0 - 0.1 * i as f64))
            .collect();

        let prediction = predict_health(&entries, now());
        assert_eq!(prediction.risk, RiskLevel::Medium);
        assert_eq!(prediction.probability, 35);
        assert!(prediction
            .factors
            .iter()
            .any(|f| f.contains("declining")));
    }

    #[test]
    fn test_health_medication_adds_probability_without_escalation() {
        let mut entries: Vec<_> = (1..=10).map(|i| health_entry(day(i), vec![])).collect();
        entries.push(medication_entry(day(2), &["antibiotics"]));

        let prediction = predict_health(&entries, now());
        assert_eq!(prediction.risk, RiskLevel::Low);
        assert_eq!(prediction.probability, 25);
    }

    #[test]
    fn test_health_vet_window_subtracts_last_visit() {
        let mut entries: Vec<_> = (1..=10).map(|i| health_entry(day(i), vec![])).collect();
        entries.push(vet_visit_entry(day(100), "checkup"));

        let prediction = predict_health(&entries, now());
        assert_eq!(prediction.risk, RiskLevel::Low);
        assert_eq!(prediction.vet_visit_within_days, 365 - 100);
    }

    #[test]
    fn test_health_vet_window_floors_at_seven() {
        let mut entries: Vec<_> = (1..=7)
            .map(|i| health_entry(day(i), vec!["sneezing".to_string()]))
            .collect();
        entries.extend((8..=12).map(|i| health_entry(day(i), vec![])));
        entries.push(vet_visit_entry(day(29), "checkup"));

        // High risk bucket (30) minus 29 days since visit → floored to 7
        let prediction = predict_health(&entries, now());
        assert_eq!(prediction.vet_visit_within_days, 7);
    }

    #[test]
    fn test_behavior_below_threshold() {
        let entries: Vec<_> = (1..=5)
            .map(|i| behavior_entry(day(i), ActivityLevel::Normal))
            .collect();
        let prediction = predict_behavior(&entries);

        assert!(prediction.low_confidence);
        assert_eq!(prediction.mood_trend, Trend::Stable);
        assert_eq!(prediction.activity_forecast, 50.0);
        assert!(!prediction.social_needs.is_empty());
    }

    #[test]
    fn test_behavior_forecast_scales_recent_activity() {
        let entries: Vec<_> = (1..=12)
            .map(|i| behavior_entry(day(i), ActivityLevel::Active))
            .collect();
        let prediction = predict_behavior(&entries);

        assert!(!prediction.low_confidence);
        // avg ordinal 4 × 20
        assert_eq!(prediction.activity_forecast, 80.0);
        assert!(prediction.stress_indicators.is_empty());
    }

    #[test]
    fn test_behavior_stress_indicators() {
        let mut entries: Vec<_> = (8..=14)
            .map(|i| behavior_entry(day(i), ActivityLevel::Normal))
            .collect();
        // Last 7: 5 low-activity days, 3 with special behaviors
        for i in 1..=7 {
            let special = if i <= 3 {
                vec!["hiding".to_string()]
            } else {
                vec![]
            };
            entries.push(custom_behavior(
                day(i),
                BehaviorData {
                    activity_level: if i <= 5 {
                        ActivityLevel::Lethargic
                    } else {
                        ActivityLevel::Normal
                    },
                    sleep_hours: None,
                    play_time: None,
                    litter_box_uses: None,
                    special_behaviors: special,
                    location: vec![],
                },
            ));
        }

        let prediction = predict_behavior(&entries);
        assert_eq!(prediction.stress_indicators.len(), 2);
    }

    #[test]
    fn test_behavior_social_needs_thresholds() {
        // Average play 30 minutes clears the (hour-scale) 3.0 threshold
        let entries: Vec<_> = (1..=12)
            .map(|i| {
                custom_behavior(
                    day(i),
                    BehaviorData {
                        activity_level: ActivityLevel::Normal,
                        sleep_hours: None,
                        play_time: Some(30.0),
                        litter_box_uses: None,
                        special_behaviors: vec![],
                        location: vec![],
                    },
                )
            })
            .collect();
        let prediction = predict_behavior(&entries);
        assert!(prediction.social_needs.contains("well covered"));

        // No recorded play at all → mean 0 → strongest suggestion
        let entries: Vec<_> = (1..=12)
            .map(|i| behavior_entry(day(i), ActivityLevel::Normal))
            .collect();
        let prediction = predict_behavior(&entries);
        assert!(prediction.social_needs.contains("significantly more"));
    }

    #[test]
    fn test_weight_below_threshold() {
        let entries = vec![weight_entry(day(1), 4.0), weight_entry(day(2), 4.1)];
        let prediction = predict_weight(&entries);
        assert!(prediction.low_confidence);
        assert_eq!(prediction.current_weight, 4.0);
        assert_eq!(prediction.target_weight, 4.0);
        assert_eq!(prediction.days_to_target, 0);
    }

    #[test]
    fn test_weight_overfeeding_targets_reduction() {
        let mut entries = vec![
            weight_entry(day(10), 5.0),
            weight_entry(day(5), 5.0),
            weight_entry(day(1), 5.0),
        ];
        // 100 g meals → proxy 400 > 300
        for i in 1..=10 {
            entries.push(food_entry(day(i), AppetiteLevel::Good, 100.0, true));
        }

        let prediction = predict_weight(&entries);
        assert!(!prediction.low_confidence);
        assert!((prediction.target_weight - 4.75).abs() < 1e-9);
        // |Δ| = 0.25 kg → 0.25/0.1·30 = 75 days
        assert_eq!(prediction.days_to_target, 75);
    }

    #[test]
    fn test_weight_underfeeding_targets_gain() {
        let mut entries = vec![
            weight_entry(day(10), 4.0),
            weight_entry(day(5), 4.0),
            weight_entry(day(1), 4.0),
        ];
        // 40 g meals → proxy 160 < 200
        for i in 1..=10 {
            entries.push(food_entry(day(i), AppetiteLevel::Fair, 40.0, true));
        }

        let prediction = predict_weight(&entries);
        assert!((prediction.target_weight - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_weight_risk_factors() {
        let mut entries = vec![
            weight_entry(day(10), 4.0),
            weight_entry(day(5), 4.8),
            weight_entry(day(1), 4.1),
        ];
        // Wildly varying meal sizes: CV > 0.5
        for i in 1..=6 {
            let amount = if i % 2 == 0 { 10.0 } else { 120.0 };
            entries.push(food_entry(day(i), AppetiteLevel::Good, amount, true));
        }

        let prediction = predict_weight(&entries);
        assert_eq!(prediction.risk_factors.len(), 2);
        assert!(prediction.risk_factors[0].contains("Rapid weight change"));
        assert!(prediction.risk_factors[1].contains("Inconsistent feeding"));
    }
}
