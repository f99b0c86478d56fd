//! Trend analysis handler

use axum::Json;
use serde::Deserialize;

use whisker_core::trend::{self, TrendAnalysis, TrendPoint};

use crate::AppError;

/// Request body for trend analysis over an arbitrary time series
#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub points: Vec<TrendPoint>,
}

/// POST /api/trend - Linear trend analysis over a time series
pub async fn analyze_trend(
    Json(req): Json<TrendRequest>,
) -> Result<Json<TrendAnalysis>, AppError> {
    Ok(Json(trend::analyze(&req.points)))
}
