//! Health score and alert handlers

use axum::Json;

use whisker_core::{generate_health_alerts, health_score, HealthAlert, HealthScore};

use crate::AppError;

use super::EntriesRequest;

/// POST /api/score - Weighted health score over the last 30 days
pub async fn score(Json(req): Json<EntriesRequest>) -> Result<Json<HealthScore>, AppError> {
    let now = req.as_of_or_now();
    Ok(Json(health_score(&req.entries, now)))
}

/// POST /api/alerts - Rule-based health alerts
pub async fn alerts(Json(req): Json<EntriesRequest>) -> Result<Json<Vec<HealthAlert>>, AppError> {
    let now = req.as_of_or_now();
    let score = health_score(&req.entries, now);
    Ok(Json(generate_health_alerts(&req.entries, &score, now)))
}
