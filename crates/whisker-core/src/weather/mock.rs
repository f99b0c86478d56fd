//! Mock weather provider for testing
//!
//! Deterministic synthetic samples plus an unhealthy variant for
//! exercising the degraded (partial-result) path.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::error::{Error, Result};

use super::{Location, WeatherCondition, WeatherProvider, WeatherSample};

/// Mock weather provider
///
/// Returns predictable samples for all lookups. The unhealthy variant
/// fails every call, which callers must absorb into partial results.
#[derive(Clone)]
pub struct MockWeather {
    /// Whether calls succeed
    pub healthy: bool,
    /// Base temperature the synthetic series oscillates around
    pub base_temperature: f64,
}

impl MockWeather {
    /// Create a healthy mock around a mild 15 °C
    pub fn new() -> Self {
        Self {
            healthy: true,
            base_temperature: 15.0,
        }
    }

    /// Create a mock whose every call fails
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            base_temperature: 15.0,
        }
    }

    /// Healthy mock around a given base temperature
    pub fn with_base_temperature(base_temperature: f64) -> Self {
        Self {
            healthy: true,
            base_temperature,
        }
    }

    fn sample(&self, day_index: u32, offset_days: i64) -> WeatherSample {
        let cycle = day_index % 5;
        WeatherSample {
            date: Utc::now().date_naive() + Duration::days(offset_days),
            temperature: self.base_temperature + cycle as f64,
            humidity: 50.0 + (day_index % 20) as f64,
            pressure: 1008.0 + cycle as f64 * 2.0,
            condition: match cycle {
                0 => WeatherCondition::Clear,
                1 => WeatherCondition::Cloudy,
                2 => WeatherCondition::Rainy,
                3 => WeatherCondition::Cloudy,
                _ => WeatherCondition::Clear,
            },
            wind_speed: 5.0 + cycle as f64,
            uv_index: 2.0 + (cycle % 3) as f64,
        }
    }
}

impl Default for MockWeather {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn historical(&self, _location: &Location, days: u32) -> Result<Vec<WeatherSample>> {
        if !self.healthy {
            return Err(Error::Weather("mock weather provider is unhealthy".to_string()));
        }
        // Trailing days ending yesterday
        Ok((0..days)
            .map(|i| self.sample(i, -(days as i64) + i as i64))
            .collect())
    }

    async fn forecast(&self, _location: &Location, days: u32) -> Result<Vec<WeatherSample>> {
        if !self.healthy {
            return Err(Error::Weather("mock weather provider is unhealthy".to_string()));
        }
        Ok((0..days).map(|i| self.sample(i, i as i64)).collect())
    }
}
