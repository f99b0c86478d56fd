//! Trend analysis over time series
//!
//! Ordinary least squares over a (date, value) series. The regression runs
//! against the index sequence 0..n-1, not elapsed time, so irregular gaps
//! between entries are ignored. That is a deliberate simplification: diary
//! entries are roughly daily and the direction/strength classification is
//! what callers consume, not the raw slope units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Slopes within ±STABLE_SLOPE are classified as stable
const STABLE_SLOPE: f64 = 0.01;

/// Prediction confidence is capped below trend strength
const MAX_CONFIDENCE: f64 = 90.0;

/// A single (date, value) observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// Direction of a fitted trend
///
/// This is a raw numeric direction. Whether "improving" is good or bad for
/// a given metric (weight vs. activity) is the caller's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    Unknown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Predicted short-term direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stable,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short-horizon prediction attached to a trend analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPrediction {
    pub direction: Direction,
    /// min(strength, 90)
    pub confidence: f64,
    /// Slope in value units per index step (not per day)
    pub expected_change: f64,
}

/// Result of fitting a linear trend to a series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub trend: Trend,
    /// round(|R²| · 100). Not clamped: pathological fits where R² < -1
    /// legitimately report a strength above 100.
    pub strength: f64,
    /// Whole days between the first and last point
    pub duration_days: i64,
    /// Dates where the sign of the value delta flips
    pub inflection_points: Vec<DateTime<Utc>>,
    pub prediction: TrendPrediction,
}

impl TrendAnalysis {
    /// Sentinel for series too short to analyze (fewer than 3 points)
    fn unknown() -> Self {
        Self {
            trend: Trend::Unknown,
            strength: 0.0,
            duration_days: 0,
            inflection_points: vec![],
            prediction: TrendPrediction {
                direction: Direction::Stable,
                confidence: 0.0,
                expected_change: 0.0,
            },
        }
    }
}

/// Fit a linear trend to a series of observations
///
/// The input need not be sorted; points are ordered by date ascending
/// before fitting. Fewer than 3 points returns the unknown sentinel.
pub fn analyze(points: &[TrendPoint]) -> TrendAnalysis {
    if points.len() < 3 {
        return TrendAnalysis::unknown();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);

    let n = sorted.len() as f64;
    let values: Vec<f64> = sorted.iter().map(|p| p.value).collect();

    // OLS against index 0..n-1
    let sum_x: f64 = (0..sorted.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, v)| i as f64 * v).sum();
    let sum_x2: f64 = (0..sorted.len()).map(|i| (i as f64) * (i as f64)).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let ss_tot: f64 = values.iter().map(|v| (v - mean_y).powi(2)).sum();
    let ss_res: f64 = values
        .iter()
        .enumerate()
        .map(|(i, v)| (v - (slope * i as f64 + intercept)).powi(2))
        .sum();

    let r_squared = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };
    let strength = (r_squared.abs() * 100.0).round();

    let trend = if slope.abs() <= STABLE_SLOPE {
        Trend::Stable
    } else if slope > 0.0 {
        Trend::Improving
    } else {
        Trend::Declining
    };

    let direction = if slope.abs() <= STABLE_SLOPE {
        Direction::Stable
    } else if slope > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    // Sign flips of the delta between consecutive triples
    let mut inflection_points = Vec::new();
    for i in 1..sorted.len() - 1 {
        let before = values[i] - values[i - 1];
        let after = values[i + 1] - values[i];
        if before * after < 0.0 {
            inflection_points.push(sorted[i].date);
        }
    }

    let duration_days = (sorted[sorted.len() - 1].date - sorted[0].date).num_days();

    debug!(slope, r_squared, strength, trend = %trend, "fitted trend");

    TrendAnalysis {
        trend,
        strength,
        duration_days,
        inflection_points,
        prediction: TrendPrediction {
            direction,
            confidence: strength.min(MAX_CONFIDENCE),
            expected_change: slope,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(day: u32, value: f64) -> TrendPoint {
        TrendPoint {
            date: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
            value,
        }
    }

    #[test]
    fn test_too_few_points() {
        for points in [
            vec![],
            vec![point(1, 1.0)],
            vec![point(1, 1.0), point(2, 2.0)],
        ] {
            let analysis = analyze(&points);
            assert_eq!(analysis.trend, Trend::Unknown);
            assert_eq!(analysis.strength, 0.0);
            assert_eq!(analysis.duration_days, 0);
            assert!(analysis.inflection_points.is_empty());
            assert_eq!(analysis.prediction.direction, Direction::Stable);
            assert_eq!(analysis.prediction.confidence, 0.0);
            assert_eq!(analysis.prediction.expected_change, 0.0);
        }
    }

    #[test]
    fn test_monotonic_increase() {
        let points = vec![point(1, 1.0), point(2, 2.0), point(3, 3.0), point(4, 4.0)];
        let analysis = analyze(&points);

        assert_eq!(analysis.trend, Trend::Improving);
        assert!((analysis.prediction.expected_change - 1.0).abs() < 1e-9);
        assert!(analysis.strength >= 99.0);
        assert_eq!(analysis.prediction.direction, Direction::Up);
        assert_eq!(analysis.duration_days, 3);
        assert!(analysis.inflection_points.is_empty());
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let points = vec![point(4, 4.0), point(1, 1.0), point(3, 3.0), point(2, 2.0)];
        let analysis = analyze(&points);
        assert_eq!(analysis.trend, Trend::Improving);
        assert_eq!(analysis.duration_days, 3);
    }

    #[test]
    fn test_flat_series_is_stable_with_zero_strength() {
        let points = vec![point(1, 5.0), point(2, 5.0), point(3, 5.0)];
        let analysis = analyze(&points);
        // SStot == 0 is guarded to R² = 0
        assert_eq!(analysis.trend, Trend::Stable);
        assert_eq!(analysis.strength, 0.0);
    }

    #[test]
    fn test_declining_series() {
        let points = vec![point(1, 5.0), point(2, 4.0), point(3, 3.0), point(4, 2.0)];
        let analysis = analyze(&points);
        assert_eq!(analysis.trend, Trend::Declining);
        assert_eq!(analysis.prediction.direction, Direction::Down);
        assert!(analysis.prediction.expected_change < 0.0);
    }

    #[test]
    fn test_inflection_points() {
        // Up, down, up: flips at days 2 and 3
        let points = vec![point(1, 1.0), point(2, 3.0), point(3, 2.0), point(4, 4.0)];
        let analysis = analyze(&points);
        assert_eq!(analysis.inflection_points.len(), 2);
        assert_eq!(analysis.inflection_points[0], points[1].date);
        assert_eq!(analysis.inflection_points[1], points[2].date);
    }

    #[test]
    fn test_confidence_capped_at_90() {
        let points = vec![point(1, 1.0), point(2, 2.0), point(3, 3.0), point(4, 4.0)];
        let analysis = analyze(&points);
        assert!(analysis.prediction.confidence <= 90.0);
        assert!(analysis.strength > analysis.prediction.confidence);
    }
}
