//! Whisker Core Library
//!
//! Analytics and prediction engine for the Whisker cat-care diary:
//! - Linear trend analysis over diary time series
//! - Weighted health scoring with rule-based alerts
//! - Sleep/play/location/time-of-day behavior analysis
//! - Health, behavior, and weight predictions
//! - Weather impact analysis via a pluggable provider (Open-Meteo)
//!
//! Everything is a pure function of an entry snapshot plus explicit
//! parameters: no caching, no persistence, no hidden clock reads. The
//! rolling-window functions take `now` as an argument because their
//! results depend on the evaluation instant, by design.

pub mod alerts;
pub mod behavior;
pub mod config;
pub mod error;
pub mod models;
pub mod predict;
pub mod score;
pub mod snapshot;
pub mod stats;
pub mod trend;
pub mod weather;

/// Test utilities (entry builders)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use alerts::{generate_health_alerts, AlertCategory, AlertKind, HealthAlert};
pub use behavior::{
    analyze_activity_times, analyze_locations, analyze_play, analyze_sleep, behavior_insights,
    ActivityTimeAnalysis, BehaviorInsights, LocationAnalysis, PlayAnalysis, SleepAnalysis,
};
pub use config::Settings;
pub use error::{Error, Result};
pub use models::{
    ActivityLevel, AppetiteLevel, BehaviorData, DiaryEntry, EntryData, FoodData, HealthData, Mood,
    Season, VetVisit,
};
pub use predict::{
    predict_behavior, predict_health, predict_weight, BehaviorPrediction, HealthPrediction,
    RiskLevel, WeightPrediction,
};
pub use score::{health_score, CategoryScores, HealthScore, ScoreTrend};
pub use snapshot::DiarySnapshot;
pub use trend::{analyze, Direction, Trend, TrendAnalysis, TrendPoint};
pub use weather::{
    analyze_impact, analyze_with_provider, outlook_with_provider, predict_outlook, Location,
    MockWeather, OpenMeteo, WeatherImpactAnalysis, WeatherPrediction, WeatherProvider,
    WeatherSample,
};
