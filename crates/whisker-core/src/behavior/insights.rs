//! Composite behavior insight

use tracing::debug;

use crate::models::DiaryEntry;
use crate::stats;
use crate::trend::Direction;

use super::types::{ActivityClass, BehaviorHealth, BehaviorInsights, StressLevel};

/// Build the composite insight from ordinal activity averages
///
/// With no behavior entries, returns a neutral reading (normal/good/
/// moderate) rather than the worst class; sparse diaries are normal.
pub fn behavior_insights(entries: &[DiaryEntry]) -> BehaviorInsights {
    let ordinals: Vec<f64> = entries
        .iter()
        .filter_map(|e| e.behavior().map(|b| b.activity_level.ordinal()))
        .collect();

    if ordinals.is_empty() {
        return BehaviorInsights {
            activity_level: ActivityClass::Normal,
            behavior_health: BehaviorHealth::Good,
            stress_level: StressLevel::Moderate,
            sleep_trend: Direction::Stable,
            play_trend: Direction::Stable,
            sample_size: 0,
        };
    }

    let avg = stats::mean(&ordinals);

    let activity_level = if avg >= 4.0 {
        ActivityClass::High
    } else if avg >= 2.5 {
        ActivityClass::Normal
    } else {
        ActivityClass::Low
    };

    let behavior_health = if avg >= 3.5 {
        BehaviorHealth::Excellent
    } else if avg >= 2.5 {
        BehaviorHealth::Good
    } else if avg >= 1.5 {
        BehaviorHealth::Concerning
    } else {
        BehaviorHealth::Poor
    };

    // Stress reads inversely from activity
    let stress_level = if avg >= 3.0 {
        StressLevel::Low
    } else if avg >= 2.0 {
        StressLevel::Moderate
    } else {
        StressLevel::High
    };

    debug!(avg, samples = ordinals.len(), "built behavior insights");

    BehaviorInsights {
        activity_level,
        behavior_health,
        stress_level,
        // Per-metric trend wiring is an unfinished diary-app feature;
        // these stay stable until it lands.
        sleep_trend: Direction::Stable,
        play_trend: Direction::Stable,
        sample_size: ordinals.len(),
    }
}
