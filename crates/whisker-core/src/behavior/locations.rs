//! Location and territory analysis

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::models::DiaryEntry;

use super::types::{LocationAnalysis, LocationChange, LocationSpot, Territory};

/// Synthetic minutes credited per recorded occurrence of a location.
/// The diary has no dwell times, so this is a declared approximation.
const MINUTES_PER_OCCURRENCE: f64 = 60.0;

/// How many change events to retain (newest last)
const MAX_CHANGE_EVENTS: usize = 10;

/// Analyze location tags on behavior entries
pub fn analyze_locations(entries: &[DiaryEntry]) -> LocationAnalysis {
    let mut tagged: Vec<&DiaryEntry> = entries
        .iter()
        .filter(|e| e.behavior().map(|b| !b.location.is_empty()).unwrap_or(false))
        .collect();
    tagged.sort_by_key(|e| e.date);

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &tagged {
        for tag in &entry.behavior().unwrap().location {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    let total: usize = counts.values().sum();

    let mut spots: Vec<LocationSpot> = counts
        .into_iter()
        .map(|(name, count)| LocationSpot {
            name: name.to_string(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
            time_spent_minutes: count as f64 * MINUTES_PER_OCCURRENCE,
        })
        .collect();
    // Most frequent first; BTreeMap gives a stable alphabetical tiebreak
    spots.sort_by(|a, b| b.count.cmp(&a.count));

    let territory = Territory {
        primary: spots.iter().take(2).map(|s| s.name.clone()).collect(),
        secondary: spots.iter().skip(2).take(3).map(|s| s.name.clone()).collect(),
    };

    // Change events from set differences between consecutive entries
    let mut changes: Vec<LocationChange> = Vec::new();
    for pair in tagged.windows(2) {
        let previous: HashSet<&str> = pair[0]
            .behavior()
            .unwrap()
            .location
            .iter()
            .map(String::as_str)
            .collect();
        let current: HashSet<&str> = pair[1]
            .behavior()
            .unwrap()
            .location
            .iter()
            .map(String::as_str)
            .collect();

        let mut entered: Vec<String> =
            current.difference(&previous).map(|s| s.to_string()).collect();
        let mut left: Vec<String> =
            previous.difference(&current).map(|s| s.to_string()).collect();
        entered.sort();
        left.sort();

        if !entered.is_empty() || !left.is_empty() {
            changes.push(LocationChange {
                date: pair[1].date,
                entered,
                left,
            });
        }
    }
    if changes.len() > MAX_CHANGE_EVENTS {
        changes.drain(..changes.len() - MAX_CHANGE_EVENTS);
    }

    debug!(spots = spots.len(), changes = changes.len(), "analyzed locations");

    LocationAnalysis {
        spots,
        territory,
        changes,
        sample_size: tagged.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::location_entry;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_empty_input_default() {
        let analysis = analyze_locations(&[]);
        assert!(analysis.spots.is_empty());
        assert!(analysis.territory.primary.is_empty());
        assert!(analysis.changes.is_empty());
        assert_eq!(analysis.sample_size, 0);
    }

    #[test]
    fn test_frequency_and_percentage() {
        let entries = vec![
            location_entry(day(0), &["sofa", "window"]),
            location_entry(day(1), &["sofa"]),
            location_entry(day(2), &["sofa", "kitchen"]),
        ];
        let analysis = analyze_locations(&entries);

        assert_eq!(analysis.spots[0].name, "sofa");
        assert_eq!(analysis.spots[0].count, 3);
        assert!((analysis.spots[0].percentage - 60.0).abs() < 1e-9);
        assert_eq!(analysis.spots[0].time_spent_minutes, 180.0);
        assert_eq!(analysis.sample_size, 3);
    }

    #[test]
    fn test_territory_split() {
        let entries = vec![
            location_entry(day(0), &["sofa", "window", "kitchen", "bed", "shelf", "hall"]),
            location_entry(day(1), &["sofa", "window"]),
            location_entry(day(2), &["sofa"]),
        ];
        let analysis = analyze_locations(&entries);

        assert_eq!(analysis.territory.primary, vec!["sofa", "window"]);
        assert_eq!(analysis.territory.secondary.len(), 3);
    }

    #[test]
    fn test_change_events() {
        let entries = vec![
            location_entry(day(0), &["sofa"]),
            location_entry(day(1), &["sofa", "window"]),
            location_entry(day(2), &["kitchen"]),
        ];
        let analysis = analyze_locations(&entries);

        assert_eq!(analysis.changes.len(), 2);
        assert_eq!(analysis.changes[0].entered, vec!["window"]);
        assert!(analysis.changes[0].left.is_empty());
        assert_eq!(analysis.changes[1].entered, vec!["kitchen"]);
        assert_eq!(analysis.changes[1].left, vec!["sofa", "window"]);
    }

    #[test]
    fn test_change_events_capped_at_10() {
        let mut entries = Vec::new();
        for i in 0..15 {
            let tag = if i % 2 == 0 { "sofa" } else { "window" };
            entries.push(location_entry(day(i), &[tag]));
        }
        let analysis = analyze_locations(&entries);
        assert_eq!(analysis.changes.len(), 10);
        // Newest last
        assert_eq!(analysis.changes[9].date, day(14));
    }
}
