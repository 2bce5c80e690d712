//! Statistics view types rendered by the stats dashboard.
//!
//! These are projections of the record list; they are recomputed on every
//! load and never stored.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Record;

/// One bar of the weather distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherStat {
    pub weather: String,
    pub icon: String,
    pub count: u32,
    /// Bar width relative to the most frequent weather (0-100)
    pub percentage: f64,
}

/// Hikes, distance and time for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    /// "YYYY-MM" grouping key
    pub month: String,
    pub count: u32,
    /// Kilometers with one decimal ("8.5")
    pub total_distance: String,
    /// Formatted duration ("2小时15分钟")
    pub total_duration: String,
    /// "2024年6月"
    pub display_month: String,
}

/// A mountain and how often it was climbed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MountainStat {
    pub name: String,
    pub count: u32,
    /// CSS gradient assigned by rank
    pub gradient: String,
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_count: u32,
    pub total_photos: u32,
    /// The first few records of the list, newest first as served
    pub recent_records: Vec<Record>,
    pub motivation: String,
}

/// Everything the stats dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    #[serde(flatten)]
    pub summary: StatsSummary,
    pub weather_stats: Vec<WeatherStat>,
    pub monthly_stats: Vec<MonthlyStat>,
    pub mountain_list: Vec<MountainStat>,
}
