//! Behavior analysis handlers
//!
//! These are pure functions of the submitted entries (no rolling window),
//! so `asOf` is accepted but unused here.

use axum::Json;

use whisker_core::behavior::{
    analyze_activity_times, analyze_locations, analyze_play, analyze_sleep,
    behavior_insights as insights, ActivityTimeAnalysis, BehaviorInsights, LocationAnalysis,
    PlayAnalysis, SleepAnalysis,
};

use crate::AppError;

use super::EntriesRequest;

/// POST /api/behavior/sleep - Sleep duration, distribution, and consistency
pub async fn behavior_sleep(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<SleepAnalysis>, AppError> {
    Ok(Json(analyze_sleep(&req.entries)))
}

/// POST /api/behavior/play - Play frequency, weekly totals, and engagement
pub async fn behavior_play(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<PlayAnalysis>, AppError> {
    Ok(Json(analyze_play(&req.entries)))
}

/// POST /api/behavior/locations - Favorite spots and territory changes
pub async fn behavior_locations(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<LocationAnalysis>, AppError> {
    Ok(Json(analyze_locations(&req.entries)))
}

/// POST /api/behavior/activity - Active hours and period averages
pub async fn behavior_activity(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<ActivityTimeAnalysis>, AppError> {
    Ok(Json(analyze_activity_times(&req.entries)))
}

/// POST /api/behavior/insights - Combined activity/health/stress summary
pub async fn behavior_insights(
    Json(req): Json<EntriesRequest>,
) -> Result<Json<BehaviorInsights>, AppError> {
    Ok(Json(insights(&req.entries)))
}
