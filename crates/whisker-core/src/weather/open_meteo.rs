//! Open-Meteo weather provider
//!
//! Uses the free Open-Meteo daily APIs: the forecast endpoint for the
//! outlook and the archive endpoint for history. No API key required.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;

use super::{Location, WeatherCondition, WeatherProvider, WeatherSample};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

const DAILY_FIELDS: &str = "temperature_2m_mean,relative_humidity_2m_mean,surface_pressure_mean,weather_code,wind_speed_10m_max,uv_index_max";

/// Weather provider backed by api.open-meteo.com
pub struct OpenMeteo {
    client: Client,
    forecast_url: String,
    archive_url: String,
}

impl OpenMeteo {
    pub fn new() -> Self {
        Self::with_urls(FORECAST_URL.to_string(), ARCHIVE_URL.to_string())
    }

    /// Custom endpoints, for tests and self-hosted mirrors
    pub fn with_urls(forecast_url: String, archive_url: String) -> Self {
        Self {
            client: Client::new(),
            forecast_url,
            archive_url,
        }
    }

    /// Create from environment
    ///
    /// Returns `None` when `WHISKER_WEATHER=off`; otherwise honors the
    /// endpoint override variables.
    pub fn from_env() -> Option<Self> {
        match std::env::var("WHISKER_WEATHER").as_deref() {
            Ok("off") | Ok("none") => None,
            Ok("openmeteo") | Err(_) => {
                let forecast_url = std::env::var("WHISKER_FORECAST_URL")
                    .unwrap_or_else(|_| FORECAST_URL.to_string());
                let archive_url = std::env::var("WHISKER_ARCHIVE_URL")
                    .unwrap_or_else(|_| ARCHIVE_URL.to_string());
                Some(Self::with_urls(forecast_url, archive_url))
            }
            Ok(other) => {
                warn!(provider = other, "unknown WHISKER_WEATHER value, weather disabled");
                None
            }
        }
    }

    async fn fetch_daily(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<WeatherSample>> {
        debug!(url, "fetching weather");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body: DailyResponse = response.json().await?;
        Ok(body.into_samples())
    }
}

impl Default for OpenMeteo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteo {
    async fn historical(&self, location: &Location, days: u32) -> Result<Vec<WeatherSample>> {
        let end = Utc::now().date_naive() - Duration::days(1);
        let start = end - Duration::days(days.max(1) as i64 - 1);
        self.fetch_daily(
            &self.archive_url,
            &[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "UTC".to_string()),
                ("start_date", start.format("%Y-%m-%d").to_string()),
                ("end_date", end.format("%Y-%m-%d").to_string()),
            ],
        )
        .await
    }

    async fn forecast(&self, location: &Location, days: u32) -> Result<Vec<WeatherSample>> {
        self.fetch_daily(
            &self.forecast_url,
            &[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "UTC".to_string()),
                ("forecast_days", days.clamp(1, 16).to_string()),
            ],
        )
        .await
    }
}

/// Open-Meteo daily response shape (columnar arrays keyed by date)
#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_mean: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m_mean: Vec<Option<f64>>,
    #[serde(default)]
    surface_pressure_mean: Vec<Option<f64>>,
    #[serde(default)]
    weather_code: Vec<Option<u32>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    uv_index_max: Vec<Option<f64>>,
}

impl DailyResponse {
    fn into_samples(self) -> Vec<WeatherSample> {
        let daily = self.daily;
        let at = |column: &[Option<f64>], i: usize, default: f64| {
            column.get(i).copied().flatten().unwrap_or(default)
        };

        daily
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, &date)| {
                // A row without a temperature is unusable for correlation
                let temperature = daily.temperature_2m_mean.get(i).copied().flatten()?;
                Some(WeatherSample {
                    date,
                    temperature,
                    humidity: at(&daily.relative_humidity_2m_mean, i, 50.0),
                    pressure: at(&daily.surface_pressure_mean, i, 1013.25),
                    condition: condition_from_wmo(
                        daily.weather_code.get(i).copied().flatten().unwrap_or(3),
                    ),
                    wind_speed: at(&daily.wind_speed_10m_max, i, 0.0),
                    uv_index: at(&daily.uv_index_max, i, 0.0),
                })
            })
            .collect()
    }
}

/// Map WMO weather interpretation codes onto the coarse condition buckets
fn condition_from_wmo(code: u32) -> WeatherCondition {
    match code {
        0 => WeatherCondition::Clear,
        1..=3 | 45 | 48 => WeatherCondition::Cloudy,
        51..=67 | 80..=82 => WeatherCondition::Rainy,
        71..=77 | 85 | 86 => WeatherCondition::Snowy,
        95..=99 => WeatherCondition::Stormy,
        _ => WeatherCondition::Cloudy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmo_code_mapping() {
        assert_eq!(condition_from_wmo(0), WeatherCondition::Clear);
        assert_eq!(condition_from_wmo(2), WeatherCondition::Cloudy);
        assert_eq!(condition_from_wmo(61), WeatherCondition::Rainy);
        assert_eq!(condition_from_wmo(75), WeatherCondition::Snowy);
        assert_eq!(condition_from_wmo(95), WeatherCondition::Stormy);
        assert_eq!(condition_from_wmo(42), WeatherCondition::Cloudy);
    }

    #[test]
    fn test_daily_response_parsing() {
        let json = serde_json::json!({
            "daily": {
                "time": ["2026-03-01", "2026-03-02", "2026-03-03"],
                "temperature_2m_mean": [10.5, null, 12.0],
                "relative_humidity_2m_mean": [60.0, 55.0, null],
                "surface_pressure_mean": [1010.0, 1012.0, 1015.0],
                "weather_code": [0, 61, 95],
                "wind_speed_10m_max": [12.0, 20.0, 35.0],
                "uv_index_max": [3.0, 1.0, 0.5]
            }
        });

        let response: DailyResponse = serde_json::from_value(json).unwrap();
        let samples = response.into_samples();

        // The null-temperature row is dropped
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].condition, WeatherCondition::Clear);
        assert_eq!(samples[0].humidity, 60.0);
        // Missing humidity falls back to a neutral default
        assert_eq!(samples[1].humidity, 50.0);
        assert_eq!(samples[1].condition, WeatherCondition::Stormy);
    }
}
