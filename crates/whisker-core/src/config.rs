//! Whisker configuration
//!
//! Config is loaded with a three-layer resolution:
//! 1. Environment variables (WHISKER_LATITUDE, WHISKER_LONGITUDE, ...)
//! 2. Override file in the data dir (~/.local/share/whisker/config/whisker.toml)
//! 3. Embedded defaults (compiled into the binary)

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::weather::Location;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/whisker.toml");

/// Resolved Whisker settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub weather: WeatherSettings,
    /// Default location for weather lookups; `None` means callers must
    /// supply one explicitly
    #[serde(default)]
    pub location: Option<LocationSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSettings {
    /// Days of weather history to fetch for impact analysis
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    /// Days of forecast to fetch for the behavior outlook
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    pub latitude: f64,
    pub longitude: f64,
}

fn default_history_days() -> u32 {
    90
}

fn default_forecast_days() -> u32 {
    7
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            history_days: default_history_days(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Settings {
    /// Load settings with the documented resolution order
    pub fn load() -> Result<Self> {
        let mut settings = match override_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading config override");
                let text = fs::read_to_string(&path)?;
                parse(&text).map_err(|e| {
                    Error::Config(format!("invalid config at {}: {}", path.display(), e))
                })?
            }
            _ => parse(DEFAULT_CONFIG)
                .map_err(|e| Error::Config(format!("invalid embedded config: {}", e)))?,
        };

        settings.apply_env();
        Ok(settings)
    }

    /// Parse from a TOML string (used by tests)
    pub fn from_toml(text: &str) -> Result<Self> {
        parse(text).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    /// Default location as a weather [`Location`], if configured
    pub fn default_location(&self) -> Option<Location> {
        self.location.as_ref().map(|l| Location {
            latitude: l.latitude,
            longitude: l.longitude,
        })
    }

    fn apply_env(&mut self) {
        let latitude = env_f64("WHISKER_LATITUDE");
        let longitude = env_f64("WHISKER_LONGITUDE");
        if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
            self.location = Some(LocationSettings {
                latitude,
                longitude,
            });
        }
    }
}

fn parse(text: &str) -> std::result::Result<Settings, toml::de::Error> {
    toml::from_str(text)
}

fn env_f64(name: &str) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = raw, "ignoring unparseable coordinate");
            None
        }
    }
}

/// Platform override path: ~/.local/share/whisker/config/whisker.toml
fn override_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("whisker").join("config").join("whisker.toml"))
}
