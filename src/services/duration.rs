// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Duration text codec.
//!
//! Durations are typed by hand ("2h", "1小时30分", "90m"), so parsing is
//! lenient: anything unrecognized contributes zero minutes instead of
//! failing.

use regex::Regex;
use std::sync::LazyLock;

/// "N hours": integer or decimal followed by 小时 or h.
///
/// Decimals are accepted so that `attach_unit("1.5")` reads back as 90
/// minutes rather than 5 hours.
static HOUR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:小时|h)").expect("hour pattern is valid")
});

/// "N minutes": integer followed by 分钟, 分 or m.
static MINUTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:分钟|分|m)").expect("minute pattern is valid"));

/// A bare number with a trailing hour unit, as written by `attach_unit`.
static NUMBER_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:hour|h|小时)\s*$").expect("unit pattern is valid")
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("number pattern is valid"));

/// Parse a duration into total minutes.
///
/// The hour and minute components are matched independently and summed.
/// Empty or unrecognized text gives 0.
pub fn parse_to_minutes(text: &str) -> u64 {
    let hours = HOUR_PATTERN
        .captures(text)
        .map_or(0, |caps| hours_to_minutes(&caps[1]));
    let minutes = MINUTE_PATTERN
        .captures(text)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .unwrap_or(0);

    hours.saturating_add(minutes)
}

/// `parse_to_minutes` for an optional field; `None` gives 0.
pub fn parse_opt_to_minutes(text: Option<&str>) -> u64 {
    text.map_or(0, parse_to_minutes)
}

fn hours_to_minutes(value: &str) -> u64 {
    if !value.contains('.') {
        return value
            .parse::<u64>()
            .ok()
            .and_then(|hours| hours.checked_mul(60))
            .unwrap_or(0);
    }
    value
        .parse::<f64>()
        .ok()
        .map(|h| (h * 60.0).round())
        .filter(|m| m.is_finite() && *m >= 0.0 && *m < u64::MAX as f64)
        .map_or(0, |m| m as u64)
}

/// Format total minutes for display ("2小时15分钟", "2小时", "45分钟").
pub fn format_minutes(minutes: u64) -> String {
    if minutes == 0 {
        return "0分钟".to_string();
    }

    let hours = minutes / 60;
    let mins = minutes % 60;

    match (hours, mins) {
        (0, m) => format!("{}分钟", m),
        (h, 0) => format!("{}小时", h),
        (h, m) => format!("{}小时{}分钟", h, m),
    }
}

/// Strip the hour unit from a stored duration so it can be edited as a
/// number ("2.5h" -> "2.5").
///
/// Values that are not a bare number plus a known unit are returned as-is.
pub fn strip_unit(text: &str) -> String {
    match NUMBER_WITH_UNIT.captures(text) {
        Some(caps) => caps[1].to_string(),
        None => text.to_string(),
    }
}

/// Append "h" to a bare number before saving ("2.5" -> "2.5h").
///
/// Anything else is returned unchanged.
pub fn attach_unit(text: &str) -> String {
    if BARE_NUMBER.is_match(text) {
        format!("{}h", text)
    } else {
        text.to_string()
    }
}
