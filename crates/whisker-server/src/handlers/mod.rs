//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area. All analysis
//! endpoints accept the diary entries in the request body; rolling-window
//! computations honor an optional `asOf` timestamp so results are
//! reproducible.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use whisker_core::DiaryEntry;

pub mod behavior;
pub mod predictions;
pub mod score;
pub mod trend;
pub mod weather;

// Re-export all handlers for use in router
pub use behavior::*;
pub use predictions::*;
pub use score::*;
pub use trend::*;
pub use weather::*;

/// Common request body for entry-driven analysis endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesRequest {
    pub entries: Vec<DiaryEntry>,
    /// Evaluation instant for rolling windows; defaults to the server clock
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

impl EntriesRequest {
    pub fn as_of_or_now(&self) -> DateTime<Utc> {
        self.as_of.unwrap_or_else(Utc::now)
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /api/health - liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
