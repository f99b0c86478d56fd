//! Diary snapshot loading
//!
//! The diary app exports its entries as a single JSON document; this is
//! the engine-facing face of the otherwise external entry repository. The
//! CLI feeds files through [`DiarySnapshot::load`]; the server receives
//! the same shape in request bodies.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::DiaryEntry;

/// An immutable snapshot of diary entries, as exported by the diary app
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiarySnapshot {
    pub exported_at: DateTime<Utc>,
    pub entries: Vec<DiaryEntry>,
}

impl DiarySnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let snapshot = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), entries = snapshot.entries.len(), "loaded snapshot");
        Ok(snapshot)
    }

    /// Parse a snapshot from any reader
    ///
    /// Unknown entry `type` values are a data error, not a panic.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Entries for one cat (snapshots may interleave several)
    pub fn entries_for(&self, cat_id: &str) -> Vec<DiaryEntry> {
        self.entries
            .iter()
            .filter(|e| e.cat_id == cat_id)
            .cloned()
            .collect()
    }
}
