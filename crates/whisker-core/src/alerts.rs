//! Rule-based health alerts
//!
//! Turns a computed [`HealthScore`] plus the raw entries into actionable
//! alerts. Category thresholds read the 30-day score; the weight-change,
//! appetite, and activity rules look at their own short rolling windows of
//! recent entries so a sudden change fires before the score moves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::DiaryEntry;
use crate::score::{HealthScore, ScoreTrend};

/// Alert urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Critical,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which health aspect an alert concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Weight,
    Activity,
    Appetite,
    Symptoms,
    Overall,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Activity => "activity",
            Self::Appetite => "appetite",
            Self::Symptoms => "symptoms",
            Self::Overall => "overall",
        }
    }
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single generated alert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAlert {
    /// Time-seeded id (`<millis>-<seq>`). Not collision-proof under rapid
    /// successive calls; the diary app treats alerts as transient.
    pub id: String,
    pub kind: AlertKind,
    pub category: AlertCategory,
    pub message: String,
    /// 1 (informational) to 5 (urgent)
    pub severity: u8,
    pub created: DateTime<Utc>,
}

/// Builder that hands out time-seeded ids within one generation pass
struct AlertSink {
    now: DateTime<Utc>,
    seq: u32,
    alerts: Vec<HealthAlert>,
}

impl AlertSink {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            seq: 0,
            alerts: Vec::new(),
        }
    }

    fn push(&mut self, kind: AlertKind, category: AlertCategory, severity: u8, message: String) {
        self.alerts.push(HealthAlert {
            id: format!("{}-{}", self.now.timestamp_millis(), self.seq),
            kind,
            category,
            message,
            severity,
            created: self.now,
        });
        self.seq += 1;
    }
}

/// Generate all health alerts for a scored entry snapshot
pub fn generate_health_alerts(
    entries: &[DiaryEntry],
    score: &HealthScore,
    now: DateTime<Utc>,
) -> Vec<HealthAlert> {
    let mut sink = AlertSink::new(now);

    category_alerts(score, &mut sink);
    if score.trend == ScoreTrend::Declining {
        sink.push(
            AlertKind::Warning,
            AlertCategory::Overall,
            3,
            "Overall health score has been declining over the last two weeks".to_string(),
        );
    }
    weight_change_alerts(entries, &mut sink);
    appetite_alerts(entries, &mut sink);
    activity_alerts(entries, &mut sink);

    debug!(count = sink.alerts.len(), "generated health alerts");
    sink.alerts
}

/// Category score thresholds: (warning, critical, warning sev, critical sev)
fn category_alerts(score: &HealthScore, sink: &mut AlertSink) {
    let rules: [(AlertCategory, u8, u8, u8, u8, u8); 4] = [
        (AlertCategory::Weight, score.categories.weight, 60, 40, 3, 5),
        (AlertCategory::Activity, score.categories.activity, 50, 30, 2, 4),
        (AlertCategory::Appetite, score.categories.appetite, 50, 30, 2, 4),
        (AlertCategory::Symptoms, score.categories.symptoms, 70, 40, 3, 5),
    ];

    for (category, value, warn_below, crit_below, warn_sev, crit_sev) in rules {
        if value < crit_below {
            sink.push(
                AlertKind::Critical,
                category,
                crit_sev,
                format!("{} score is critically low ({})", category, value),
            );
        } else if value < warn_below {
            sink.push(
                AlertKind::Warning,
                category,
                warn_sev,
                format!("{} score is low ({})", category, value),
            );
        }
    }
}

/// Percent change across the last 10 weighings
fn weight_change_alerts(entries: &[DiaryEntry], sink: &mut AlertSink) {
    let mut weighings: Vec<(DateTime<Utc>, f64)> = entries
        .iter()
        .filter_map(|e| e.health().and_then(|h| h.weight).map(|w| (e.date, w)))
        .collect();
    weighings.sort_by_key(|(date, _)| *date);

    let recent: Vec<f64> = weighings
        .iter()
        .rev()
        .take(10)
        .rev()
        .map(|(_, w)| *w)
        .collect();

    let (Some(&first), Some(&last)) = (recent.first(), recent.last()) else {
        return;
    };
    if recent.len() < 2 || first == 0.0 {
        return;
    }

    let change_pct = (last - first) / first * 100.0;
    if change_pct.abs() > 20.0 {
        sink.push(
            AlertKind::Critical,
            AlertCategory::Weight,
            5,
            format!("Weight changed {:.1}% over the last weighings", change_pct),
        );
    } else if change_pct.abs() > 10.0 {
        sink.push(
            AlertKind::Warning,
            AlertCategory::Weight,
            3,
            format!("Weight changed {:.1}% over the last weighings", change_pct),
        );
    }
}

/// Poor-appetite and unfinished-meal rules over the last 7 food entries
fn appetite_alerts(entries: &[DiaryEntry], sink: &mut AlertSink) {
    let mut food: Vec<&DiaryEntry> = entries.iter().filter(|e| e.food().is_some()).collect();
    food.sort_by_key(|e| e.date);
    let recent: Vec<_> = food.iter().rev().take(7).collect();

    let poor = recent
        .iter()
        .filter(|e| e.food().map(|f| f.appetite.is_poor()).unwrap_or(false))
        .count();
    if poor >= 3 {
        sink.push(
            AlertKind::Warning,
            AlertCategory::Appetite,
            3,
            format!("Appetite was poor or absent in {} of the last {} meals", poor, recent.len()),
        );
    }

    let unfinished = recent
        .iter()
        .filter(|e| e.food().map(|f| !f.finished).unwrap_or(false))
        .count();
    if unfinished >= 4 {
        sink.push(
            AlertKind::Warning,
            AlertCategory::Appetite,
            2,
            format!("{} of the last {} meals were left unfinished", unfinished, recent.len()),
        );
    }
}

/// Low-activity rule over the last 5 behavior entries
fn activity_alerts(entries: &[DiaryEntry], sink: &mut AlertSink) {
    let mut behavior: Vec<&DiaryEntry> = entries.iter().filter(|e| e.behavior().is_some()).collect();
    behavior.sort_by_key(|e| e.date);

    let low = behavior
        .iter()
        .rev()
        .take(5)
        .filter(|e| e.behavior().map(|b| b.activity_level.is_low()).unwrap_or(false))
        .count();

    if low > 3 {
        sink.push(
            AlertKind::Warning,
            AlertCategory::Activity,
            2,
            format!("Activity was low in {} of the last 5 observations", low),
        );
    } else if low == 3 {
        sink.push(
            AlertKind::Info,
            AlertCategory::Activity,
            1,
            "Activity was low in 3 of the last 5 observations".to_string(),
        );
    }
}
