// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics aggregation over a record list.
//!
//! Every function here is a pure projection of its input: no I/O, no
//! shared state, and no failure mode. Records with missing or malformed
//! fields are left out of the affected group or contribute zero.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::record::weather_icon;
use crate::models::{MonthlyStat, MountainStat, Record, StatsReport, StatsSummary, WeatherStat};
use crate::services::duration::{format_minutes, parse_opt_to_minutes};

/// Number of records shown in the "recent hikes" list.
pub const RECENT_RECORDS_LIMIT: usize = 5;

/// Card backgrounds for the mountain list, assigned by rank.
pub const MOUNTAIN_GRADIENTS: [&str; 10] = [
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)",
    "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)",
    "linear-gradient(135deg, #fa709a 0%, #fee140 100%)",
    "linear-gradient(135deg, #30cfd0 0%, #330867 100%)",
    "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
    "linear-gradient(135deg, #ff9a9e 0%, #fecfef 100%)",
    "linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)",
    "linear-gradient(135deg, #ff6e7f 0%, #bfe9ff 100%)",
];

const MOTIVATION_FIRST_HIKE: &str = "开始你们的第一次爬山冒险吧！";
const MOTIVATION_TEN_PLUS: &str = "哇！已经爬了这么多次，真是了不起！";
const MOTIVATION_FIVE_PLUS: &str = "太棒了！你们已经是爬山小能手啦！";
const MOTIVATION_LINES: [&str; 6] = [
    "每一步都是成长的足迹！",
    "继续加油，征服更多山峰！",
    "和宝贝的回忆越来越多啦！",
    "你们是最棒的爬山搭档！",
    "坚持就是胜利，继续前进！",
    "每次登顶都是新的突破！",
];

/// Weather distribution, most frequent first.
///
/// `percentage` is relative to the largest group (bar-chart scaling), so
/// the top entry is always 100 and the values do not sum to 100.
pub fn compute_weather_stats(records: &[Record]) -> Vec<WeatherStat> {
    let groups = group_in_discovery_order(records, |r| r.weather_label());
    let max_count = groups.iter().map(|(_, g)| g.len()).max().unwrap_or(0).max(1);

    let mut stats: Vec<WeatherStat> = groups
        .into_iter()
        .map(|(weather, group)| {
            let count = group.len() as u32;
            WeatherStat {
                weather: weather.to_string(),
                icon: weather_icon(weather).to_string(),
                count,
                percentage: 100.0 * f64::from(count) / max_count as f64,
            }
        })
        .collect();

    // Stable: equal counts stay in discovery order.
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Per-month rollup, most recent month first.
pub fn compute_monthly_stats(records: &[Record]) -> Vec<MonthlyStat> {
    let groups = group_in_discovery_order(records, |r| month_key(&r.date));

    let mut stats: Vec<MonthlyStat> = groups
        .into_iter()
        .map(|(month, group)| {
            let total_distance: f64 = group.iter().map(|r| r.distance_km()).sum();
            let total_minutes = group
                .iter()
                .map(|r| parse_opt_to_minutes(r.duration.as_deref()))
                .fold(0u64, u64::saturating_add);

            MonthlyStat {
                display_month: display_month(&month),
                count: group.len() as u32,
                total_distance: format!("{:.1}", total_distance),
                total_duration: format_minutes(total_minutes),
                month,
            }
        })
        .collect();

    // Keys are zero-padded "YYYY-MM", so string order is date order.
    stats.sort_by(|a, b| b.month.cmp(&a.month));
    stats
}

/// Mountains ranked by visit count, with a gradient per rank.
pub fn compute_mountain_stats(records: &[Record]) -> Vec<MountainStat> {
    let grouped = group_in_discovery_order(records, |r| {
        Some(r.mountain_name.as_str()).filter(|n| !n.is_empty())
    });
    let mut groups: Vec<(&str, u32)> = grouped
        .into_iter()
        .map(|(name, group)| (name, group.len() as u32))
        .collect();

    groups.sort_by(|a, b| b.1.cmp(&a.1));

    groups
        .into_iter()
        .enumerate()
        .map(|(rank, (name, count))| MountainStat {
            name: name.to_string(),
            count,
            gradient: MOUNTAIN_GRADIENTS[rank % MOUNTAIN_GRADIENTS.len()].to_string(),
        })
        .collect()
}

/// Headline numbers for the dashboard.
///
/// `seed` picks the motivation line for small record counts.
pub fn compute_summary(records: &[Record], seed: u64) -> StatsSummary {
    let total_count = records.len() as u32;
    StatsSummary {
        total_count,
        total_photos: records.iter().map(|r| r.photos.len() as u32).sum(),
        recent_records: records.iter().take(RECENT_RECORDS_LIMIT).cloned().collect(),
        motivation: motivation_text(total_count, seed).to_string(),
    }
}

/// Encouragement line for the given number of hikes.
pub fn motivation_text(count: u32, seed: u64) -> &'static str {
    match count {
        0 => MOTIVATION_FIRST_HIKE,
        10.. => MOTIVATION_TEN_PLUS,
        5.. => MOTIVATION_FIVE_PLUS,
        _ => MOTIVATION_LINES[(seed % MOTIVATION_LINES.len() as u64) as usize],
    }
}

/// All dashboard views for one record list.
pub fn compute_report(records: &[Record], seed: u64) -> StatsReport {
    StatsReport {
        summary: compute_summary(records, seed),
        weather_stats: compute_weather_stats(records),
        monthly_stats: compute_monthly_stats(records),
        mountain_list: compute_mountain_stats(records),
    }
}

/// "YYYY-MM" key from a date; `None` for records without a date.
fn month_key(date: &str) -> Option<String> {
    if date.is_empty() {
        return None;
    }
    Some(date.chars().take(7).collect())
}

/// "2024-06" -> "2024年6月". Keys that are not "YYYY-MM" display as-is.
fn display_month(key: &str) -> String {
    key.split_once('-')
        .filter(|(year, _)| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|(year, month)| {
            month
                .parse::<u32>()
                .ok()
                .filter(|m| (1..=12).contains(m))
                .map(|m| format!("{}年{}月", year, m))
        })
        .unwrap_or_else(|| key.to_string())
}

/// Group records by key, in the order each key is first seen.
fn group_in_discovery_order<'a, K, F>(records: &'a [Record], key: F) -> Vec<(K, Vec<&'a Record>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a Record) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a Record>)> = Vec::new();

    for record in records {
        let Some(k) = key(record) else {
            continue;
        };
        match index.get(&k) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![record]));
            }
        }
    }

    groups
}
