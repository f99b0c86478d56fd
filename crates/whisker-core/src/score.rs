//! Weighted health scoring
//!
//! Produces a 0-100 score per category (weight, activity, appetite,
//! symptoms) plus an equal-weighted overall score, from entries in the
//! trailing 30 days.
//!
//! `now` is an explicit parameter: the rolling windows anchor to the
//! evaluation instant, not to anything in the entry data, so identical
//! entries scored at two different instants can legitimately yield
//! different results. Callers that need determinism inject a fixed `now`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::DiaryEntry;

/// Rolling window for scoring
const SCORE_WINDOW_DAYS: i64 = 30;

/// Window size for the score trend comparison
const TREND_WINDOW_DAYS: i64 = 14;

/// Neutral score used when a category has no relevant entries
const NEUTRAL_SCORE: f64 = 75.0;

/// Ideal adult cat weight range in kg
const IDEAL_WEIGHT_KG: (f64, f64) = (3.0, 5.0);

/// Direction of the overall score between two 14-day windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTrend {
    Improving,
    Stable,
    Declining,
}

impl ScoreTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }
}

impl std::fmt::Display for ScoreTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category scores, each 0-100
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub weight: u8,
    pub activity: u8,
    pub appetite: u8,
    pub symptoms: u8,
}

/// Overall weighted health score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub overall: u8,
    pub categories: CategoryScores,
    pub trend: ScoreTrend,
    pub last_updated: DateTime<Utc>,
}

/// Compute the health score over the trailing 30 days before `now`
pub fn health_score(entries: &[DiaryEntry], now: DateTime<Utc>) -> HealthScore {
    let (weight, activity, appetite, symptoms) =
        category_scores(entries, now - Duration::days(SCORE_WINDOW_DAYS), now);
    let overall = overall_of(weight, activity, appetite, symptoms);

    debug!(weight, activity, appetite, symptoms, overall, "scored health");

    HealthScore {
        overall: overall.round() as u8,
        categories: CategoryScores {
            weight: weight.round() as u8,
            activity: activity.round() as u8,
            appetite: appetite.round() as u8,
            symptoms: symptoms.round() as u8,
        },
        trend: score_trend(entries, now),
        last_updated: now,
    }
}

fn overall_of(weight: f64, activity: f64, appetite: f64, symptoms: f64) -> f64 {
    (0.25 * weight + 0.25 * activity + 0.25 * appetite + 0.25 * symptoms).round()
}

/// Raw category scores for entries dated within (from, to]
fn category_scores(
    entries: &[DiaryEntry],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> (f64, f64, f64, f64) {
    let windowed: Vec<&DiaryEntry> = entries
        .iter()
        .filter(|e| e.date > from && e.date <= to)
        .collect();

    (
        weight_score(&windowed),
        activity_score(&windowed),
        appetite_score(&windowed),
        symptom_score(&windowed),
    )
}

/// Latest recorded weight vs the ideal range. Neutral 75 with no weighings.
fn weight_score(entries: &[&DiaryEntry]) -> f64 {
    let mut weighed: Vec<(&DateTime<Utc>, f64)> = entries
        .iter()
        .filter_map(|e| e.health().and_then(|h| h.weight).map(|w| (&e.date, w)))
        .collect();

    weighed.sort_by_key(|(date, _)| **date);
    let Some(&(_, latest)) = weighed.last() else {
        return NEUTRAL_SCORE;
    };

    let (low, high) = IDEAL_WEIGHT_KG;
    if latest < low {
        (100.0 - (low - latest) * 25.0).max(50.0)
    } else if latest > high {
        (100.0 - (latest - high) * 15.0).max(50.0)
    } else {
        100.0
    }
}

/// Mean ordinal activity of behavior entries. Neutral 75 with no entries.
fn activity_score(entries: &[&DiaryEntry]) -> f64 {
    let ordinals: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.behavior().map(|b| b.activity_level.ordinal()))
        .collect();

    if ordinals.is_empty() {
        return NEUTRAL_SCORE;
    }

    let avg = crate::stats::mean(&ordinals);
    if avg >= 4.0 {
        (80.0 + (avg - 3.0) * 10.0).min(100.0)
    } else if avg >= 3.0 {
        80.0
    } else {
        (40.0 + (avg - 1.0) * 15.0).max(40.0)
    }
}

/// Mean ordinal appetite of food entries. Neutral 75 with no entries.
fn appetite_score(entries: &[&DiaryEntry]) -> f64 {
    let ordinals: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.food().map(|f| f.appetite.ordinal()))
        .collect();

    if ordinals.is_empty() {
        return NEUTRAL_SCORE;
    }

    let avg = crate::stats::mean(&ordinals);
    if avg >= 4.0 {
        (80.0 + (avg - 3.0) * 10.0).min(100.0)
    } else if avg >= 3.0 {
        80.0
    } else {
        (30.0 + (avg - 1.0) * 25.0).max(30.0)
    }
}

/// Share of health entries carrying symptoms. 100 with no health entries.
fn symptom_score(entries: &[&DiaryEntry]) -> f64 {
    let health: Vec<_> = entries.iter().filter_map(|e| e.health()).collect();
    if health.is_empty() {
        return 100.0;
    }

    let with_symptoms = health.iter().filter(|h| !h.symptoms.is_empty()).count();
    let rate = with_symptoms as f64 / health.len() as f64;

    if rate == 0.0 {
        100.0
    } else if rate <= 0.1 {
        90.0
    } else if rate <= 0.2 {
        75.0
    } else if rate <= 0.4 {
        60.0
    } else {
        (60.0 - (rate - 0.4) * 100.0).max(20.0)
    }
}

/// Compare the overall score of the last 14 days against the 14 days
/// before that. Forced stable with under 14 days of history.
fn score_trend(entries: &[DiaryEntry], now: DateTime<Utc>) -> ScoreTrend {
    let Some(earliest) = entries.iter().map(|e| e.date).min() else {
        return ScoreTrend::Stable;
    };
    if now - earliest < Duration::days(TREND_WINDOW_DAYS) {
        return ScoreTrend::Stable;
    }

    let recent = window_overall(entries, now - Duration::days(TREND_WINDOW_DAYS), now);
    let previous = window_overall(
        entries,
        now - Duration::days(TREND_WINDOW_DAYS * 2),
        now - Duration::days(TREND_WINDOW_DAYS),
    );

    let diff = recent - previous;
    if diff >= 5.0 {
        ScoreTrend::Improving
    } else if diff <= -5.0 {
        ScoreTrend::Declining
    } else {
        ScoreTrend::Stable
    }
}

fn window_overall(entries: &[DiaryEntry], from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let (weight, activity, appetite, symptoms) = category_scores(entries, from, to);
    overall_of(weight, activity, appetite, symptoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{behavior_entry, food_entry, health_entry, weight_entry};
    use crate::models::{ActivityLevel, AppetiteLevel};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_entries_yield_neutral_defaults() {
        let score = health_score(&[], now());
        assert_eq!(score.categories.weight, 75);
        assert_eq!(score.categories.activity, 75);
        assert_eq!(score.categories.appetite, 75);
        assert_eq!(score.categories.symptoms, 100);
        // round(0.25·75 + 0.25·75 + 0.25·75 + 0.25·100) = 81
        assert_eq!(score.overall, 81);
        assert_eq!(score.trend, ScoreTrend::Stable);
        assert_eq!(score.last_updated, now());
    }

    #[test]
    fn test_ideal_weight_scores_100() {
        let entries = vec![weight_entry(now() - Duration::days(2), 4.0)];
        let score = health_score(&entries, now());
        assert_eq!(score.categories.weight, 100);
    }

    #[test]
    fn test_underweight_penalty() {
        // 2.0 kg: deficit 1.0 → 100 − 25 = 75
        let entries = vec![weight_entry(now() - Duration::days(2), 2.0)];
        assert_eq!(health_score(&entries, now()).categories.weight, 75);

        // Severe deficit floors at 50
        let entries = vec![weight_entry(now() - Duration::days(2), 0.2)];
        assert_eq!(health_score(&entries, now()).categories.weight, 50);
    }

    #[test]
    fn test_overweight_penalty() {
        // 7.0 kg: excess 2.0 → 100 − 30 = 70
        let entries = vec![weight_entry(now() - Duration::days(2), 7.0)];
        assert_eq!(health_score(&entries, now()).categories.weight, 70);
    }

    #[test]
    fn test_latest_weighing_wins() {
        let entries = vec![
            weight_entry(now() - Duration::days(10), 7.0),
            weight_entry(now() - Duration::days(1), 4.0),
        ];
        assert_eq!(health_score(&entries, now()).categories.weight, 100);
    }

    #[test]
    fn test_old_entries_fall_outside_window() {
        let entries = vec![weight_entry(now() - Duration::days(45), 7.0)];
        // Outside 30 days → neutral default
        assert_eq!(health_score(&entries, now()).categories.weight, 75);
    }

    #[test]
    fn test_activity_score_bands() {
        // All very_active: avg 5 → min(100, 80 + 20) = 100
        let entries = vec![
            behavior_entry(now() - Duration::days(1), ActivityLevel::VeryActive),
            behavior_entry(now() - Duration::days(2), ActivityLevel::VeryActive),
        ];
        assert_eq!(health_score(&entries, now()).categories.activity, 100);

        // All normal: avg 3 → 80
        let entries = vec![behavior_entry(now() - Duration::days(1), ActivityLevel::Normal)];
        assert_eq!(health_score(&entries, now()).categories.activity, 80);

        // All lethargic: avg 1 → max(40, 40 + 0) = 40
        let entries = vec![behavior_entry(now() - Duration::days(1), ActivityLevel::Lethargic)];
        assert_eq!(health_score(&entries, now()).categories.activity, 40);
    }

    #[test]
    fn test_appetite_score_bands() {
        let entries = vec![food_entry(now() - Duration::days(1), AppetiteLevel::Excellent, 50.0, true)];
        assert_eq!(health_score(&entries, now()).categories.appetite, 100);

        let entries = vec![food_entry(now() - Duration::days(1), AppetiteLevel::None, 50.0, false)];
        assert_eq!(health_score(&entries, now()).categories.appetite, 30);
    }

    #[test]
    fn test_symptom_rate_ladder() {
        // 1 of 10 entries with symptoms → rate 0.1 → 90
        let mut entries: Vec<_> = (1..10)
            .map(|i| health_entry(now() - Duration::days(i), vec![]))
            .collect();
        entries.push(health_entry(now() - Duration::days(10), vec!["sneezing".to_string()]));
        assert_eq!(health_score(&entries, now()).categories.symptoms, 90);

        // All symptomatic → rate 1.0 → max(20, 60 − 60) = 20
        let entries: Vec<_> = (1..5)
            .map(|i| health_entry(now() - Duration::days(i), vec!["vomiting".to_string()]))
            .collect();
        assert_eq!(health_score(&entries, now()).categories.symptoms, 20);
    }

    #[test]
    fn test_trend_improving() {
        let mut entries = Vec::new();
        // Previous window: lethargic days
        for i in 15..28 {
            entries.push(behavior_entry(now() - Duration::days(i), ActivityLevel::Lethargic));
        }
        // Recent window: very active days
        for i in 1..14 {
            entries.push(behavior_entry(now() - Duration::days(i), ActivityLevel::VeryActive));
        }
        let score = health_score(&entries, now());
        assert_eq!(score.trend, ScoreTrend::Improving);
    }

    #[test]
    fn test_trend_forced_stable_with_short_history() {
        let entries = vec![
            behavior_entry(now() - Duration::days(1), ActivityLevel::Lethargic),
            behavior_entry(now() - Duration::days(5), ActivityLevel::Lethargic),
        ];
        assert_eq!(health_score(&entries, now()).trend, ScoreTrend::Stable);
    }

    #[test]
    fn test_same_now_is_idempotent_but_now_matters() {
        let entries = vec![weight_entry(now() - Duration::days(25), 4.0)];

        let a = health_score(&entries, now());
        let b = health_score(&entries, now());
        assert_eq!(a.overall, b.overall);
        assert_eq!(a.categories.weight, b.categories.weight);

        // Same entries, evaluated 10 days later: the weighing has left the
        // 30-day window and the category falls back to neutral.
        let later = health_score(&entries, now() + Duration::days(10));
        assert_eq!(later.categories.weight, 75);
        assert_ne!(later.categories.weight, a.categories.weight);
    }
}
