//! Play pattern analysis

use std::collections::BTreeMap;
use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::models::{DiaryEntry, Season};
use crate::stats;

use super::types::{FrequencyClass, PlayAnalysis, PlayDurationClass, SeasonalMinutes, WeeklyPlay};

/// Static morning/evening split used for the hourly distribution: the
/// diary logs daily play totals without times, so the breakdown is a
/// fixed assumption, not derived from the log timestamps.
const HOURLY_SPLIT: [(usize, f64); 4] = [(7, 0.3), (8, 0.2), (18, 0.3), (19, 0.2)];

/// Analyze play records (behavior entries carrying `play_time`)
pub fn analyze_play(entries: &[DiaryEntry]) -> PlayAnalysis {
    let mut records: Vec<(DateTime<Utc>, f64)> = entries
        .iter()
        .filter_map(|e| e.behavior().and_then(|b| b.play_time).map(|m| (e.date, m)))
        .collect();
    records.sort_by_key(|(date, _)| *date);

    if records.is_empty() {
        return PlayAnalysis {
            average_minutes: 0.0,
            hourly_distribution: vec![0.0; 24],
            weekly_totals: vec![],
            seasonal: Season::all()
                .iter()
                .map(|&season| SeasonalMinutes {
                    season,
                    average_minutes: 0.0,
                    samples: 0,
                })
                .collect(),
            frequency: FrequencyClass::Low,
            duration: PlayDurationClass::Short,
            engagement: 0.0,
            sample_size: 0,
        };
    }

    let minutes: Vec<f64> = records.iter().map(|(_, m)| *m).collect();
    let average_minutes = stats::mean(&minutes);

    let mut hourly_distribution = vec![0.0; 24];
    for (hour, share) in HOURLY_SPLIT {
        hourly_distribution[hour] = share;
    }

    // Weekly totals keyed by ISO year+week
    let mut weekly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (date, m) in &records {
        let week = date.iso_week();
        *weekly.entry((week.year(), week.week())).or_insert(0.0) += m;
    }
    let weekly_totals: Vec<WeeklyPlay> = weekly
        .into_iter()
        .map(|((year, week), total_minutes)| WeeklyPlay {
            year,
            week,
            total_minutes,
        })
        .collect();

    // Seasonal averages
    let seasonal = Season::all()
        .iter()
        .map(|&season| {
            let in_season: Vec<f64> = records
                .iter()
                .filter(|(date, _)| Season::for_month(date.month()) == season)
                .map(|(_, m)| *m)
                .collect();
            SeasonalMinutes {
                season,
                average_minutes: stats::mean(&in_season),
                samples: in_season.len(),
            }
        })
        .collect();

    // Frequency: distinct play days over elapsed days
    let play_days: HashSet<_> = records.iter().map(|(date, _)| date.date_naive()).collect();
    let elapsed_days = (records[records.len() - 1].0.date_naive() - records[0].0.date_naive())
        .num_days()
        .max(0) as f64
        + 1.0;
    let frequency_ratio = play_days.len() as f64 / elapsed_days;
    let frequency = if frequency_ratio < 0.3 {
        FrequencyClass::Low
    } else if frequency_ratio > 0.7 {
        FrequencyClass::High
    } else {
        FrequencyClass::Moderate
    };

    let duration = if average_minutes < 15.0 {
        PlayDurationClass::Short
    } else if average_minutes > 45.0 {
        PlayDurationClass::Long
    } else {
        PlayDurationClass::Moderate
    };

    // Engagement: how often the cat plays and how long the sessions run
    let consistency_score = frequency_ratio.min(1.0) * 100.0;
    let duration_score = (average_minutes / 30.0 * 100.0).min(100.0);
    let engagement = (consistency_score + duration_score) / 2.0;

    debug!(average_minutes, frequency_ratio, engagement, samples = records.len(), "analyzed play");

    PlayAnalysis {
        average_minutes,
        hourly_distribution,
        weekly_totals,
        seasonal,
        frequency,
        duration,
        engagement,
        sample_size: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::play_entry;
    use chrono::{Duration, TimeZone};

    fn day(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 15, 0, 0).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_empty_input_default() {
        let analysis = analyze_play(&[]);
        assert_eq!(analysis.sample_size, 0);
        assert_eq!(analysis.engagement, 0.0);
        assert_eq!(analysis.frequency, FrequencyClass::Low);
        assert_eq!(analysis.duration, PlayDurationClass::Short);
        assert!(analysis.weekly_totals.is_empty());
        assert_eq!(analysis.seasonal.len(), 4);
    }

    #[test]
    fn test_static_hourly_split() {
        // Logged at 15:00, but the split is fixed at morning/evening hours
        let entries = vec![play_entry(day(0), 30.0)];
        let analysis = analyze_play(&entries);
        assert_eq!(analysis.hourly_distribution[7], 0.3);
        assert_eq!(analysis.hourly_distribution[8], 0.2);
        assert_eq!(analysis.hourly_distribution[18], 0.3);
        assert_eq!(analysis.hourly_distribution[19], 0.2);
        assert_eq!(analysis.hourly_distribution[15], 0.0);
    }

    #[test]
    fn test_daily_play_is_high_frequency() {
        let entries: Vec<_> = (0..10).map(|i| play_entry(day(i), 20.0)).collect();
        let analysis = analyze_play(&entries);
        assert_eq!(analysis.frequency, FrequencyClass::High);
        assert_eq!(analysis.duration, PlayDurationClass::Moderate);
    }

    #[test]
    fn test_sparse_play_is_low_frequency() {
        let entries = vec![play_entry(day(0), 20.0), play_entry(day(20), 20.0)];
        assert_eq!(analyze_play(&entries).frequency, FrequencyClass::Low);
    }

    #[test]
    fn test_duration_classes() {
        let short: Vec<_> = (0..3).map(|i| play_entry(day(i), 5.0)).collect();
        assert_eq!(analyze_play(&short).duration, PlayDurationClass::Short);

        let long: Vec<_> = (0..3).map(|i| play_entry(day(i), 60.0)).collect();
        assert_eq!(analyze_play(&long).duration, PlayDurationClass::Long);
    }

    #[test]
    fn test_engagement_full_marks() {
        // Daily play at 30+ minutes maxes both sub-scores
        let entries: Vec<_> = (0..14).map(|i| play_entry(day(i), 40.0)).collect();
        let analysis = analyze_play(&entries);
        assert_eq!(analysis.engagement, 100.0);
    }

    #[test]
    fn test_weekly_totals_grouped_by_iso_week() {
        // 2026-06-01 is a Monday: 7 daily entries = exactly one ISO week
        let entries: Vec<_> = (0..7).map(|i| play_entry(day(i), 10.0)).collect();
        let analysis = analyze_play(&entries);
        assert_eq!(analysis.weekly_totals.len(), 1);
        assert_eq!(analysis.weekly_totals[0].total_minutes, 70.0);

        let entries: Vec<_> = (0..14).map(|i| play_entry(day(i), 10.0)).collect();
        assert_eq!(analyze_play(&entries).weekly_totals.len(), 2);
    }

    #[test]
    fn test_seasonal_buckets() {
        let summer = play_entry(day(0), 40.0); // June
        let winter = play_entry(
            Utc.with_ymd_and_hms(2026, 1, 10, 15, 0, 0).unwrap(),
            10.0,
        );
        let analysis = analyze_play(&[summer, winter]);

        let by_season: std::collections::HashMap<_, _> = analysis
            .seasonal
            .iter()
            .map(|s| (s.season, s.average_minutes))
            .collect();
        assert_eq!(by_season[&Season::Summer], 40.0);
        assert_eq!(by_season[&Season::Winter], 10.0);
        assert_eq!(by_season[&Season::Spring], 0.0);
    }
}
