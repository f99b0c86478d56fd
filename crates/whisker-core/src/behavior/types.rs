//! Result DTOs for behavior analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Season;
use crate::trend::Direction;

/// Sleep duration classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepDurationClass {
    TooShort,
    Optimal,
    TooLong,
}

/// Sleep pattern analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepAnalysis {
    pub average_hours: f64,
    /// Share of recorded nights asleep during each clock hour (24 buckets).
    /// Synthetic: assumes sleep starts at 22:00 for the recorded duration.
    pub hourly_distribution: Vec<f64>,
    /// Average hours per weekday, Monday first
    pub weekday_averages: Vec<f64>,
    /// 0-100, higher when nightly hours vary less
    pub consistency: f64,
    pub duration: SleepDurationClass,
    /// Last 7 records vs the 7 before, 0.5 h threshold
    pub trend: Direction,
    pub sample_size: usize,
}

/// Play frequency classification (share of elapsed days with play)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyClass {
    Low,
    Moderate,
    High,
}

/// Play session duration classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayDurationClass {
    Short,
    Moderate,
    Long,
}

/// Total play minutes in one ISO week
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlay {
    pub year: i32,
    pub week: u32,
    pub total_minutes: f64,
}

/// Average play minutes per season
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalMinutes {
    pub season: Season,
    pub average_minutes: f64,
    pub samples: usize,
}

/// Play pattern analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAnalysis {
    pub average_minutes: f64,
    /// Synthetic split: 30%/20% at hours 7/8, 30%/20% at hours 18/19,
    /// regardless of when play was actually logged.
    pub hourly_distribution: Vec<f64>,
    pub weekly_totals: Vec<WeeklyPlay>,
    pub seasonal: Vec<SeasonalMinutes>,
    pub frequency: FrequencyClass,
    pub duration: PlayDurationClass,
    /// 0-100, average of frequency and duration sub-scores
    pub engagement: f64,
    pub sample_size: usize,
}

/// One observed location tag with usage stats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSpot {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
    /// Synthetic: 60 minutes per recorded occurrence
    pub time_spent_minutes: f64,
}

/// Primary/secondary territory split
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Territory {
    /// Top 2 spots by frequency
    pub primary: Vec<String>,
    /// Next 3 spots
    pub secondary: Vec<String>,
}

/// A change in observed locations between consecutive entries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationChange {
    pub date: DateTime<Utc>,
    pub entered: Vec<String>,
    pub left: Vec<String>,
}

/// Location/territory analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAnalysis {
    /// All spots, most frequent first
    pub spots: Vec<LocationSpot>,
    pub territory: Territory,
    /// Last 10 change events, newest last
    pub changes: Vec<LocationChange>,
    pub sample_size: usize,
}

/// Average ordinal activity for one clock hour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyActivity {
    pub hour: u32,
    pub average: f64,
    pub samples: usize,
}

/// Average ordinal activity per day period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAverages {
    /// 06:00-12:00
    pub morning: f64,
    /// 12:00-18:00
    pub afternoon: f64,
    /// 18:00-22:00
    pub evening: f64,
    /// 22:00-06:00 (wraps midnight)
    pub night: f64,
}

/// Weekly activity rhythm
///
/// The hours here are static placeholders ([7, 19] peaks, [2, 14] lows),
/// not derived from the data. Known limitation carried from the diary
/// app's original heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPattern {
    pub peak_hours: Vec<u32>,
    pub low_hours: Vec<u32>,
}

/// Activity-by-time-of-day analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTimeAnalysis {
    /// Only hours with at least one observation, ascending by hour
    pub hourly_averages: Vec<HourlyActivity>,
    /// Top 3 observed hours by average activity
    pub peak_hours: Vec<u32>,
    /// Bottom 3 observed hours by average activity
    pub resting_hours: Vec<u32>,
    pub periods: PeriodAverages,
    pub weekly_pattern: WeeklyPattern,
    pub sample_size: usize,
}

/// Overall activity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityClass {
    High,
    Normal,
    Low,
}

/// Overall behavior health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorHealth {
    Excellent,
    Good,
    Concerning,
    Poor,
}

/// Estimated stress level (inversely related to activity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

/// Composite behavior insight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorInsights {
    pub activity_level: ActivityClass,
    pub behavior_health: BehaviorHealth,
    pub stress_level: StressLevel,
    /// Always stable: per-metric trend wiring is an unfinished feature in
    /// the diary app, carried here as-is.
    pub sleep_trend: Direction,
    /// Always stable (see `sleep_trend`)
    pub play_trend: Direction,
    pub sample_size: usize,
}
