// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hiking record model shared by local storage, the backend client and
//! the statistics views.

use crate::error::{AppError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Icon used for weather labels outside the fixed vocabulary.
pub const DEFAULT_WEATHER_ICON: &str = "🌤️";

/// One logged hike.
///
/// Field names follow the client's camelCase storage format. Optional text
/// fields stored as empty strings by the client deserialize as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Remote identifier; absent on records that were never persisted
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Mountain name (required)
    #[serde(default, deserialize_with = "null_as_default")]
    pub mountain_name: String,
    /// Hike date, `YYYY-MM-DD` (required)
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Distance in kilometers, as entered
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<String>,
    /// Free-text duration ("2h", "1小时30分钟", ...)
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    /// Weather label ("晴天", "多云", ...)
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather_icon: Option<String>,
    /// Photo references; the first one is the cover
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    /// Creation time (epoch millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    /// Last update time (epoch millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_id: Option<String>,
    /// Identity of the user who migrated this record
    #[serde(
        rename = "_openid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owner_marker: Option<String>,
    /// Local identifier this record was migrated from
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_id: Option<String>,
}

impl Record {
    /// Create a record with the two required fields set.
    pub fn new(mountain_name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            mountain_name: mountain_name.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    /// Distance in kilometers, or 0 when missing or unparseable.
    pub fn distance_km(&self) -> f64 {
        self.distance.as_deref().map_or(0.0, parse_distance_km)
    }

    /// Distance as sent to the backend: the whole field parsed as a number.
    pub fn distance_value(&self) -> Option<f64> {
        self.distance
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
    }

    /// Weather label, if set to something non-empty.
    pub fn weather_label(&self) -> Option<&str> {
        self.weather.as_deref().filter(|w| !w.is_empty())
    }

    /// Check the fields the backend requires before a create request.
    pub fn validate(&self) -> Result<()> {
        if self.mountain_name.trim().is_empty() {
            return Err(AppError::BadRequest(
                "mountainName must not be blank".to_string(),
            ));
        }

        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(format!("Invalid date '{}': expected YYYY-MM-DD", self.date))
        })?;

        if let Some(distance) = self.distance.as_deref() {
            let valid = distance
                .trim()
                .parse::<f64>()
                .is_ok_and(|d| d.is_finite() && d >= 0.0);
            if !valid {
                return Err(AppError::BadRequest(format!(
                    "Invalid distance '{}': expected a non-negative number",
                    distance
                )));
            }
        }

        Ok(())
    }
}

/// Fixed weather vocabulary offered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Sunny,
    Cloudy,
    Overcast,
    LightRain,
    Rainy,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Sunny,
        Weather::Cloudy,
        Weather::Overcast,
        Weather::LightRain,
        Weather::Rainy,
    ];

    /// Stored label.
    pub fn label(self) -> &'static str {
        match self {
            Weather::Sunny => "晴天",
            Weather::Cloudy => "多云",
            Weather::Overcast => "阴天",
            Weather::LightRain => "小雨",
            Weather::Rainy => "雨天",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Weather::Sunny => "☀️",
            Weather::Cloudy => "⛅",
            Weather::Overcast => "☁️",
            Weather::LightRain => "🌦️",
            Weather::Rainy => "🌧️",
        }
    }

    pub fn from_label(label: &str) -> Option<Weather> {
        Self::ALL.into_iter().find(|w| w.label() == label)
    }
}

/// Icon for a stored weather label, falling back to the default icon.
pub fn weather_icon(label: &str) -> &'static str {
    Weather::from_label(label).map_or(DEFAULT_WEATHER_ICON, Weather::icon)
}

/// Parse the leading decimal number of a distance string.
///
/// "12.5" and "12.5km" both give 12.5; anything without a leading number
/// gives 0.
pub fn parse_distance_km(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let mut seen_dot = false;
    let end = trimmed
        .char_indices()
        .find(|&(_, c)| match c {
            '0'..='9' => false,
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            _ => true,
        })
        .map_or(trimmed.len(), |(i, _)| i);

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .unwrap_or(0.0)
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a JSON string or number; empty strings and null become `None`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            None => None,
            Some(StringOrNumber::Text(s)) if s.is_empty() => None,
            Some(StringOrNumber::Text(s)) => Some(s),
            Some(StringOrNumber::Integer(n)) => Some(n.to_string()),
            Some(StringOrNumber::Float(f)) => Some(f.to_string()),
        },
    )
}
