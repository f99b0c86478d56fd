//! Behavior pattern analysis
//!
//! Four independent sub-analyses (sleep, play, locations, activity timing)
//! plus a composite insight. Each tolerates missing optional fields by
//! filtering out entries that lack the relevant field, and each defines an
//! explicit default for empty input instead of erroring.
//!
//! Several distributions here are synthetic by design: the diary records
//! daily totals (sleep hours, play minutes) without timestamps, so the
//! hourly breakdowns assume a fixed schedule (sleep from 22:00, play split
//! across morning and evening). See the individual modules.

mod activity;
mod insights;
mod locations;
mod play;
mod sleep;
pub mod types;

pub use activity::analyze_activity_times;
pub use insights::behavior_insights;
pub use locations::analyze_locations;
pub use play::analyze_play;
pub use sleep::analyze_sleep;
pub use types::*;
