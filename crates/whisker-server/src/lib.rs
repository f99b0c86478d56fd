//! Whisker Web Server
//!
//! Axum-based stateless REST API over the Whisker analytics engine. Every
//! endpoint takes the diary entries in the request body and computes its
//! answer from scratch; nothing is persisted between requests.
//!
//! - Restrictive CORS policy (same-origin unless origins are configured)
//! - Request bodies capped at 2 MB
//! - Sanitized error responses (internal errors are logged, not leaked)

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};

use whisker_core::config::Settings;
use whisker_core::weather::WeatherProvider;

mod handlers;

/// Maximum request body size (2 MB)
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// Weather provider, if one is configured. Absent means the weather
    /// endpoints answer 400 rather than guessing.
    pub weather: Option<Arc<dyn WeatherProvider>>,
    /// Resolved settings (default weather window sizes, optional location)
    pub settings: Settings,
}

/// Create the application router
pub fn create_router(
    weather: Option<Arc<dyn WeatherProvider>>,
    settings: Settings,
    config: ServerConfig,
) -> Router {
    if weather.is_some() {
        info!("weather provider configured");
    } else {
        info!("ℹ️  weather provider not configured (weather endpoints will answer 400)");
    }

    let state = Arc::new(AppState { weather, settings });

    let api_routes = Router::new()
        // Liveness
        .route("/health", get(handlers::health_check))
        // Trend analysis over an arbitrary time series
        .route("/trend", post(handlers::analyze_trend))
        // Scoring and alerts
        .route("/score", post(handlers::score))
        .route("/alerts", post(handlers::alerts))
        // Behavior analysis
        .route("/behavior/sleep", post(handlers::behavior_sleep))
        .route("/behavior/play", post(handlers::behavior_play))
        .route("/behavior/locations", post(handlers::behavior_locations))
        .route("/behavior/activity", post(handlers::behavior_activity))
        .route("/behavior/insights", post(handlers::behavior_insights))
        // Predictions
        .route("/predictions/health", post(handlers::predict_health))
        .route("/predictions/behavior", post(handlers::predict_behavior))
        .route("/predictions/weight", post(handlers::predict_weight))
        // Weather impact and outlook
        .route("/weather/impact", post(handlers::weather_impact))
        .route("/weather/outlook", post(handlers::weather_outlook));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    weather: Option<Arc<dyn WeatherProvider>>,
    settings: Settings,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(weather, settings, config);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("listening on http://{}:{}", host, port);
    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
