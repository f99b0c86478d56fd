//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `score` - Score/status/alerts commands
//! - `trend` - Metric trend command
//! - `behavior` - Behavior pattern commands
//! - `predict` - Prediction commands
//! - `weather` - Weather impact command
//! - `serve` - Web server command

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use whisker_core::{DiaryEntry, DiarySnapshot};

pub mod behavior;
pub mod predict;
pub mod score;
pub mod serve;
pub mod trend;
pub mod weather;

// Re-export command functions for main.rs
pub use behavior::*;
pub use predict::*;
pub use score::*;
pub use serve::*;
pub use trend::*;
pub use weather::*;

/// Load a snapshot and optionally narrow it to one cat
pub fn load_entries(file: &Path, cat: Option<&str>) -> Result<Vec<DiaryEntry>> {
    let snapshot = DiarySnapshot::load(file)
        .with_context(|| format!("failed to load snapshot {}", file.display()))?;
    let entries = match cat {
        Some(id) => snapshot.entries_for(id),
        None => snapshot.entries,
    };
    debug!(
        entries = entries.len(),
        cat = cat.unwrap_or("*"),
        "loaded diary entries"
    );
    Ok(entries)
}

/// Pretty-print any DTO as JSON (the --json output path)
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
