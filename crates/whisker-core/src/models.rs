//! Domain models for Whisker
//!
//! These mirror the diary app's JSON export format (camelCase fields,
//! entries tagged by `type` with the payload under `data`). Entries are
//! immutable once handed to the engine; every analysis receives a full
//! snapshot and returns freshly allocated results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single diary entry for one cat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: String,
    pub cat_id: String,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub data: EntryData,
    #[serde(default)]
    pub mood: Option<Mood>,
    /// References to photos/videos stored by the diary app
    #[serde(default)]
    pub media: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Health payload, if this is a health entry
    pub fn health(&self) -> Option<&HealthData> {
        match &self.data {
            EntryData::Health(h) => Some(h),
            _ => None,
        }
    }

    /// Behavior payload, if this is a behavior entry
    pub fn behavior(&self) -> Option<&BehaviorData> {
        match &self.data {
            EntryData::Behavior(b) => Some(b),
            _ => None,
        }
    }

    /// Food payload, if this is a food entry
    pub fn food(&self) -> Option<&FoodData> {
        match &self.data {
            EntryData::Food(f) => Some(f),
            _ => None,
        }
    }
}

/// Entry payload, discriminated by the `type` field
///
/// Adjacently tagged so the JSON reads `{"type": "health", "data": {...}}`.
/// Unknown `type` values fail deserialization rather than being coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum EntryData {
    Food(FoodData),
    Health(HealthData),
    Behavior(BehaviorData),
    Free(FreeData),
}

/// Health observations (all fields optional - sparse records are normal)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// Body temperature in °C
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Free-text symptom tags
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Medications currently administered
    #[serde(default)]
    pub medication: Vec<String>,
    /// Vet visit on this entry's date, if any
    #[serde(default)]
    pub vet_visit: Option<VetVisit>,
}

/// A recorded vet visit (the date is the entry date)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetVisit {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Behavior observations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorData {
    pub activity_level: ActivityLevel,
    /// Hours slept in the last day
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    /// Play time in minutes
    #[serde(default)]
    pub play_time: Option<f64>,
    #[serde(default)]
    pub litter_box_uses: Option<u32>,
    /// Notable behaviors (hiding, excessive grooming, ...)
    #[serde(default)]
    pub special_behaviors: Vec<String>,
    /// Locations the cat was observed in
    #[serde(default)]
    pub location: Vec<String>,
}

/// Food/feeding observations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodData {
    pub appetite: AppetiteLevel,
    /// Amount offered in grams
    pub amount: f64,
    /// Whether the meal was finished
    pub finished: bool,
}

/// Free-form note entry (carried through, never analyzed)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeData {
    #[serde(default)]
    pub text: Option<String>,
}

/// Activity level on a fixed 1-5 ordinal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Lethargic,
    Calm,
    Normal,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Fixed ordinal mapping used for all arithmetic (never inferred)
    pub fn ordinal(&self) -> f64 {
        match self {
            Self::Lethargic => 1.0,
            Self::Calm => 2.0,
            Self::Normal => 3.0,
            Self::Active => 4.0,
            Self::VeryActive => 5.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lethargic => "lethargic",
            Self::Calm => "calm",
            Self::Normal => "normal",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }

    /// Whether this level counts as low activity for alerting
    pub fn is_low(&self) -> bool {
        matches!(self, Self::Lethargic | Self::Calm)
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lethargic" => Ok(Self::Lethargic),
            "calm" => Ok(Self::Calm),
            "normal" => Ok(Self::Normal),
            "active" => Ok(Self::Active),
            "very_active" | "veryactive" => Ok(Self::VeryActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Appetite on a fixed 1-5 ordinal scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppetiteLevel {
    None,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl AppetiteLevel {
    /// Fixed ordinal mapping used for all arithmetic (never inferred)
    pub fn ordinal(&self) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Poor => 2.0,
            Self::Fair => 3.0,
            Self::Good => 4.0,
            Self::Excellent => 5.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    /// Whether this level counts as poor appetite for alerting
    pub fn is_poor(&self) -> bool {
        matches!(self, Self::None | Self::Poor)
    }
}

impl std::str::FromStr for AppetiteLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "poor" => Ok(Self::Poor),
            "fair" => Ok(Self::Fair),
            "good" => Ok(Self::Good),
            "excellent" => Ok(Self::Excellent),
            _ => Err(format!("Unknown appetite level: {}", s)),
        }
    }
}

impl std::fmt::Display for AppetiteLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Season bucket, by calendar month range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Bucket a 1-12 month into its season
    pub fn for_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub fn all() -> &'static [Season] {
        &[Self::Spring, Self::Summer, Self::Autumn, Self::Winter]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mood recorded alongside an entry (diary metadata, not an analytics input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Content,
    Neutral,
    Grumpy,
    Stressed,
}
