//! Prediction handlers

use axum::Json;

use whisker_core::predict::{self, BehaviorPrediction, HealthPrediction, WeightPrediction};

use crate::AppError;

use super::EntriesRequest;

/// POST /api/predictions/health - Health issue probability and vet window
pub async fn predict_health(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<HealthPrediction>, AppError> {
    let now = req.as_of_or_now();
    Ok(Json(predict::predict_health(&req.entries, now)))
}

/// POST /api/predictions/behavior - Mood trend and activity forecast
pub async fn predict_behavior(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<BehaviorPrediction>, AppError> {
    Ok(Json(predict::predict_behavior(&req.entries)))
}

/// POST /api/predictions/weight - Target weight and time to reach it
pub async fn predict_weight(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<WeightPrediction>, AppError> {
    Ok(Json(predict::predict_weight(&req.entries)))
}
