//! Weather capability and weather impact analysis
//!
//! The engine consumes weather through the [`WeatherProvider`] trait; the
//! analysis itself is pure over fetched samples. Provider failures are
//! caught at the call boundary and produce partial results (entry-derived
//! sections stay populated, weather-derived fields become `None`) rather
//! than propagating.
//!
//! # Configuration
//!
//! Environment variables:
//! - `WHISKER_WEATHER`: Provider to use (openmeteo, off). Default: openmeteo
//! - `WHISKER_FORECAST_URL`: Override the Open-Meteo forecast endpoint
//! - `WHISKER_ARCHIVE_URL`: Override the Open-Meteo archive endpoint

mod impact;
mod mock;
mod open_meteo;

pub use impact::{
    analyze_impact, analyze_with_provider, outlook_with_provider, predict_outlook,
    seasonal_patterns, HumidityRange, MoodOutlook, SeasonalPattern, WeatherCorrelations,
    WeatherImpactAnalysis, WeatherPrediction, WeatherRisk,
};
pub use mock::MockWeather;
pub use open_meteo::OpenMeteo;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A geographic point for weather lookups
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Daily weather observation or forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub date: NaiveDate,
    /// °C
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    pub condition: WeatherCondition,
    pub wind_speed: f64,
    pub uv_index: f64,
}

/// Coarse weather condition buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Stormy => "stormy",
            Self::Snowy => "snowy",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Async source of daily weather series
///
/// Implementations may fail (network, quota); callers inside the engine
/// catch those failures and degrade to partial results.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Daily observations for the trailing `days` days
    async fn historical(&self, location: &Location, days: u32) -> Result<Vec<WeatherSample>>;

    /// Daily forecast for the next `days` days
    async fn forecast(&self, location: &Location, days: u32) -> Result<Vec<WeatherSample>>;
}
