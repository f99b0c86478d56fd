//! Sleep pattern analysis

use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::models::DiaryEntry;
use crate::stats;
use crate::trend::Direction;

use super::types::{SleepAnalysis, SleepDurationClass};

/// Hour the synthetic hourly distribution assumes sleep begins
const SLEEP_START_HOUR: usize = 22;

/// Change in average hours that counts as a trend
const TREND_THRESHOLD_HOURS: f64 = 0.5;

/// Analyze sleep records (behavior entries carrying `sleep_hours`)
pub fn analyze_sleep(entries: &[DiaryEntry]) -> SleepAnalysis {
    let mut records: Vec<(DateTime<Utc>, f64)> = entries
        .iter()
        .filter_map(|e| e.behavior().and_then(|b| b.sleep_hours).map(|h| (e.date, h)))
        .collect();
    records.sort_by_key(|(date, _)| *date);

    if records.is_empty() {
        return SleepAnalysis {
            average_hours: 0.0,
            hourly_distribution: vec![0.0; 24],
            weekday_averages: vec![0.0; 7],
            consistency: 0.0,
            duration: SleepDurationClass::Optimal,
            trend: Direction::Stable,
            sample_size: 0,
        };
    }

    let hours: Vec<f64> = records.iter().map(|(_, h)| *h).collect();
    let average_hours = stats::mean(&hours);

    // Synthetic distribution: the diary records a nightly total, not sleep
    // times, so assume sleep runs from 22:00 for the recorded duration.
    let mut asleep_counts = [0usize; 24];
    for &h in &hours {
        let whole_hours = (h.floor() as usize).min(24);
        for offset in 0..whole_hours {
            asleep_counts[(SLEEP_START_HOUR + offset) % 24] += 1;
        }
    }
    let hourly_distribution: Vec<f64> = asleep_counts
        .iter()
        .map(|&c| c as f64 / records.len() as f64)
        .collect();

    // Average per weekday, Monday first
    let mut weekday_sums = [0.0f64; 7];
    let mut weekday_counts = [0usize; 7];
    for (date, h) in &records {
        let idx = date.weekday().num_days_from_monday() as usize;
        weekday_sums[idx] += h;
        weekday_counts[idx] += 1;
    }
    let weekday_averages: Vec<f64> = weekday_sums
        .iter()
        .zip(&weekday_counts)
        .map(|(&sum, &count)| if count == 0 { 0.0 } else { sum / count as f64 })
        .collect();

    let consistency = (100.0 - 10.0 * stats::std_dev(&hours)).clamp(0.0, 100.0);

    let duration = if average_hours < 10.0 {
        SleepDurationClass::TooShort
    } else if average_hours > 16.0 {
        SleepDurationClass::TooLong
    } else {
        SleepDurationClass::Optimal
    };

    debug!(average_hours, consistency, samples = records.len(), "analyzed sleep");

    SleepAnalysis {
        average_hours,
        hourly_distribution,
        weekday_averages,
        consistency,
        duration,
        trend: recent_trend(&hours),
        sample_size: records.len(),
    }
}

/// Compare the last 7 records against the 7 before them
fn recent_trend(hours: &[f64]) -> Direction {
    if hours.len() < 2 {
        return Direction::Stable;
    }
    let recent_start = hours.len().saturating_sub(7);
    let prior_start = recent_start.saturating_sub(7);
    let recent = &hours[recent_start..];
    let prior = &hours[prior_start..recent_start];
    if prior.is_empty() {
        return Direction::Stable;
    }

    let diff = stats::mean(recent) - stats::mean(prior);
    if diff > TREND_THRESHOLD_HOURS {
        Direction::Up
    } else if diff < -TREND_THRESHOLD_HOURS {
        Direction::Down
    } else {
        Direction::Stable
    }
}
