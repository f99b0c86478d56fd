//! Server command implementation

use std::sync::Arc;

use anyhow::Result;

use whisker_core::weather::{OpenMeteo, WeatherProvider};
use whisker_core::Settings;
use whisker_server::ServerConfig;

pub async fn cmd_serve(host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting Whisker API server...");
    println!("   Listening: http://{}:{}", host, port);

    let settings = Settings::load()?;

    let weather: Option<Arc<dyn WeatherProvider>> = OpenMeteo::from_env()
        .map(|provider| Arc::new(provider) as Arc<dyn WeatherProvider>);
    if weather.is_none() {
        println!("   ⚠️  Weather endpoints disabled (WHISKER_WEATHER=off)");
    }

    // Parse allowed CORS origins from environment (comma-separated)
    let allowed_origins: Vec<String> = std::env::var("WHISKER_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }

    let config = ServerConfig { allowed_origins };
    whisker_server::serve(host, port, weather, settings, config).await
}
