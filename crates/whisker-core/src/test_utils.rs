//! Test utilities: quick builders for diary entries
//!
//! Analyses only read the entry date and the typed payload, so the builders
//! fill the bookkeeping fields (ids, timestamps) mechanically.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::models::{
    ActivityLevel, AppetiteLevel, BehaviorData, DiaryEntry, EntryData, FoodData, HealthData,
    VetVisit,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Wrap a payload into a full entry dated `date`
pub fn entry(date: DateTime<Utc>, data: EntryData) -> DiaryEntry {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    DiaryEntry {
        id: format!("test-{}", id),
        cat_id: "test-cat".to_string(),
        date,
        data,
        mood: None,
        media: vec![],
        created_at: date,
        updated_at: date,
    }
}

/// Behavior entry with only an activity level
pub fn behavior_entry(date: DateTime<Utc>, activity: ActivityLevel) -> DiaryEntry {
    custom_behavior(
        date,
        BehaviorData {
            activity_level: activity,
            sleep_hours: None,
            play_time: None,
            litter_box_uses: None,
            special_behaviors: vec![],
            location: vec![],
        },
    )
}

/// Behavior entry with an arbitrary payload
pub fn custom_behavior(date: DateTime<Utc>, data: BehaviorData) -> DiaryEntry {
    entry(date, EntryData::Behavior(data))
}

/// Behavior entry recording sleep hours (normal activity)
pub fn sleep_entry(date: DateTime<Utc>, hours: f64) -> DiaryEntry {
    custom_behavior(
        date,
        BehaviorData {
            activity_level: ActivityLevel::Normal,
            sleep_hours: Some(hours),
            play_time: None,
            litter_box_uses: None,
            special_behaviors: vec![],
            location: vec![],
        },
    )
}

/// Behavior entry recording play minutes (normal activity)
pub fn play_entry(date: DateTime<Utc>, minutes: f64) -> DiaryEntry {
    custom_behavior(
        date,
        BehaviorData {
            activity_level: ActivityLevel::Normal,
            sleep_hours: None,
            play_time: Some(minutes),
            litter_box_uses: None,
            special_behaviors: vec![],
            location: vec![],
        },
    )
}

/// Behavior entry recording locations (normal activity)
pub fn location_entry(date: DateTime<Utc>, locations: &[&str]) -> DiaryEntry {
    custom_behavior(
        date,
        BehaviorData {
            activity_level: ActivityLevel::Normal,
            sleep_hours: None,
            play_time: None,
            litter_box_uses: None,
            special_behaviors: vec![],
            location: locations.iter().map(|s| s.to_string()).collect(),
        },
    )
}

/// Food entry
pub fn food_entry(
    date: DateTime<Utc>,
    appetite: AppetiteLevel,
    amount: f64,
    finished: bool,
) -> DiaryEntry {
    entry(
        date,
        EntryData::Food(FoodData {
            appetite,
            amount,
            finished,
        }),
    )
}

/// Health entry with symptoms only
pub fn health_entry(date: DateTime<Utc>, symptoms: Vec<String>) -> DiaryEntry {
    entry(
        date,
        EntryData::Health(HealthData {
            weight: None,
            temperature: None,
            symptoms,
            medication: vec![],
            vet_visit: None,
        }),
    )
}

/// Health entry recording a weighing
pub fn weight_entry(date: DateTime<Utc>, kg: f64) -> DiaryEntry {
    entry(
        date,
        EntryData::Health(HealthData {
            weight: Some(kg),
            temperature: None,
            symptoms: vec![],
            medication: vec![],
            vet_visit: None,
        }),
    )
}

/// Health entry recording active medication
pub fn medication_entry(date: DateTime<Utc>, medication: &[&str]) -> DiaryEntry {
    entry(
        date,
        EntryData::Health(HealthData {
            weight: None,
            temperature: None,
            symptoms: vec![],
            medication: medication.iter().map(|s| s.to_string()).collect(),
            vet_visit: None,
        }),
    )
}

/// Health entry recording a vet visit
pub fn vet_visit_entry(date: DateTime<Utc>, reason: &str) -> DiaryEntry {
    entry(
        date,
        EntryData::Health(HealthData {
            weight: None,
            temperature: None,
            symptoms: vec![],
            medication: vec![],
            vet_visit: Some(VetVisit {
                reason: Some(reason.to_string()),
            }),
        }),
    )
}
