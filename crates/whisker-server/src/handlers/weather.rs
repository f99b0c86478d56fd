//! Weather impact and outlook handlers
//!
//! Provider failures degrade to partial results per the engine contract;
//! a missing provider is the caller's problem and answers 400.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use whisker_core::weather::{
    analyze_with_provider, outlook_with_provider, Location, WeatherImpactAnalysis,
    WeatherPrediction, WeatherProvider,
};
use whisker_core::DiaryEntry;

use crate::{AppError, AppState};

/// Request body for the weather endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRequest {
    pub entries: Vec<DiaryEntry>,
    /// Where the cat lives; falls back to the configured default location
    #[serde(default)]
    pub location: Option<Location>,
    /// Days of weather history to correlate against
    #[serde(default)]
    pub history_days: Option<u32>,
    /// Days of forecast for the outlook
    #[serde(default)]
    pub forecast_days: Option<u32>,
}

fn resolve(
    state: &AppState,
    req: &WeatherRequest,
) -> Result<(Location, u32, u32), AppError> {
    let location = req
        .location
        .or_else(|| state.settings.default_location())
        .ok_or_else(|| {
            AppError::bad_request("no location given and no default location configured")
        })?;
    let history = req.history_days.unwrap_or(state.settings.weather.history_days);
    let forecast = req.forecast_days.unwrap_or(state.settings.weather.forecast_days);
    Ok((location, history, forecast))
}

fn provider(state: &AppState) -> Result<&dyn WeatherProvider, AppError> {
    state.weather.as_deref().ok_or_else(|| {
        AppError::bad_request("no weather provider configured (WHISKER_WEATHER is off)")
    })
}

/// POST /api/weather/impact - Correlate weather history with diary entries
pub async fn weather_impact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WeatherRequest>,
) -> Result<Json<WeatherImpactAnalysis>, AppError> {
    let provider = provider(&state)?;
    let (location, history_days, _) = resolve(&state, &req)?;
    let analysis = analyze_with_provider(&req.entries, provider, &location, history_days).await;
    Ok(Json(analysis))
}

/// POST /api/weather/outlook - Behavior outlook for the forecast window
///
/// Returns `null` when the forecast itself cannot be fetched.
pub async fn weather_outlook(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WeatherRequest>,
) -> Result<Json<Option<WeatherPrediction>>, AppError> {
    let provider = provider(&state)?;
    let (location, history_days, forecast_days) = resolve(&state, &req)?;
    let outlook =
        outlook_with_provider(&req.entries, provider, &location, forecast_days, history_days)
            .await;
    Ok(Json(outlook))
}
