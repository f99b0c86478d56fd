//! Activity-by-time-of-day analysis
//!
//! Unlike sleep and play, this one uses the entry's actual clock hour
//! (UTC, matching the snapshot timestamps).

use std::collections::BTreeMap;

use chrono::Timelike;
use tracing::debug;

use crate::models::DiaryEntry;
use crate::stats;

use super::types::{ActivityTimeAnalysis, HourlyActivity, PeriodAverages, WeeklyPattern};

/// Static weekly rhythm placeholder carried from the diary app's original
/// heuristics (peaks at 07:00/19:00, lows at 02:00/14:00). Not data-derived.
const WEEKLY_PEAK_HOURS: [u32; 2] = [7, 19];
const WEEKLY_LOW_HOURS: [u32; 2] = [2, 14];

/// Analyze ordinal activity bucketed by clock hour
pub fn analyze_activity_times(entries: &[DiaryEntry]) -> ActivityTimeAnalysis {
    let observations: Vec<(u32, f64)> = entries
        .iter()
        .filter_map(|e| {
            e.behavior()
                .map(|b| (e.date.hour(), b.activity_level.ordinal()))
        })
        .collect();

    let mut by_hour: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for (hour, ordinal) in &observations {
        by_hour.entry(*hour).or_default().push(*ordinal);
    }

    let hourly_averages: Vec<HourlyActivity> = by_hour
        .iter()
        .map(|(&hour, ordinals)| HourlyActivity {
            hour,
            average: stats::mean(ordinals),
            samples: ordinals.len(),
        })
        .collect();

    // Top/bottom 3 among observed hours; ties break toward the earlier hour
    let mut ranked: Vec<&HourlyActivity> = hourly_averages.iter().collect();
    ranked.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.hour.cmp(&b.hour))
    });
    let peak_hours: Vec<u32> = ranked.iter().take(3).map(|h| h.hour).collect();
    let resting_hours: Vec<u32> = ranked.iter().rev().take(3).map(|h| h.hour).collect();

    let period_average = |matches: &dyn Fn(u32) -> bool| {
        let values: Vec<f64> = observations
            .iter()
            .filter(|(hour, _)| matches(*hour))
            .map(|(_, ordinal)| *ordinal)
            .collect();
        stats::mean(&values)
    };

    let periods = PeriodAverages {
        morning: period_average(&|h| (6..12).contains(&h)),
        afternoon: period_average(&|h| (12..18).contains(&h)),
        evening: period_average(&|h| (18..22).contains(&h)),
        // Night wraps midnight
        night: period_average(&|h| h >= 22 || h < 6),
    };

    debug!(hours = hourly_averages.len(), samples = observations.len(), "analyzed activity times");

    ActivityTimeAnalysis {
        hourly_averages,
        peak_hours,
        resting_hours,
        periods,
        weekly_pattern: WeeklyPattern {
            peak_hours: WEEKLY_PEAK_HOURS.to_vec(),
            low_hours: WEEKLY_LOW_HOURS.to_vec(),
        },
        sample_size: observations.len(),
    }
}
