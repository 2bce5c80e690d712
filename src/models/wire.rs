// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types of the hiking-record REST backend.

use crate::error::{AppError, Result};
use crate::models::Record;
use serde::{Deserialize, Serialize};

/// Response envelope used by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// 0 on success, a business error code otherwise
    pub code: i32,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: Some("success".to_string()),
            data: Some(data),
        }
    }

    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Unwrap the payload, mapping a non-zero code to an error.
    pub fn into_data(self) -> Result<T> {
        if self.code != 0 {
            return Err(AppError::RemoteApi(format!(
                "code {}: {}",
                self.code,
                self.message.unwrap_or_default()
            )));
        }
        self.data
            .ok_or_else(|| AppError::RemoteApi("Response envelope has no data".to_string()))
    }
}

/// Hiking record as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDto {
    pub id: Option<i64>,
    pub user_id: Option<String>,
    pub owner_id: Option<i64>,
    pub team_id: Option<i64>,
    pub owner_name: Option<String>,
    #[serde(default)]
    pub mountain_name: String,
    /// `YYYY-MM-DD`
    pub hiking_date: Option<String>,
    pub distance: Option<f64>,
    pub duration: Option<String>,
    pub weather_type: Option<String>,
    pub weather_icon: Option<String>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    pub notes: Option<String>,
    /// `YYYY-MM-DDTHH:MM:SS[.fff]`, assigned by the backend
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

impl RecordDto {
    /// Convert to the client record shape.
    ///
    /// Missing timestamps default to `now_millis`.
    pub fn into_record(self, now_millis: i64) -> Record {
        let create_time = self
            .create_time
            .as_deref()
            .and_then(parse_backend_datetime)
            .unwrap_or(now_millis);
        let update_time = self
            .update_time
            .as_deref()
            .and_then(parse_backend_datetime)
            .unwrap_or(now_millis);

        Record {
            id: self.id.map(|id| id.to_string()),
            mountain_name: self.mountain_name,
            date: self.hiking_date.unwrap_or_default(),
            distance: self.distance.map(|d| d.to_string()),
            duration: non_empty(self.duration),
            weather: non_empty(self.weather_type),
            weather_icon: non_empty(self.weather_icon),
            photos: self.photos.unwrap_or_default(),
            notes: non_empty(self.notes),
            create_time: Some(create_time),
            update_time: Some(update_time),
            owner_id: self.owner_id.map(|id| id.to_string()),
            team_id: self.team_id.map(|id| id.to_string()),
            owner_marker: None,
            source_id: None,
        }
    }
}

/// Body of `POST /v1/hiking-records`.
///
/// The backend accepts only these fields; ownership comes from the
/// `X-User-Id` header and timestamps are assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordPayload {
    pub mountain_name: String,
    pub hiking_date: String,
    pub distance: Option<f64>,
    pub duration: Option<String>,
    pub weather_type: Option<String>,
    pub weather_icon: Option<String>,
    pub photos: Vec<String>,
    pub notes: Option<String>,
}

impl From<&Record> for CreateRecordPayload {
    fn from(record: &Record) -> Self {
        Self {
            mountain_name: record.mountain_name.clone(),
            hiking_date: record.date.clone(),
            distance: record.distance_value(),
            duration: record.duration.clone(),
            weather_type: record.weather.clone(),
            weather_icon: record.weather_icon.clone(),
            photos: record.photos.clone(),
            notes: record.notes.clone(),
        }
    }
}

/// Parse a backend `LocalDateTime` string into epoch millis (read as UTC).
pub fn parse_backend_datetime(value: &str) -> Option<i64> {
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
