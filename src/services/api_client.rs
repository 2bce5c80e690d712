// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hiking-record backend client.
//!
//! Handles:
//! - Listing the current user's records
//! - Creating records (used by migration)
//! - Envelope unwrapping and error mapping

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{ApiEnvelope, CreateRecordPayload, Record, RecordDto};
use crate::services::migration::RemoteRecordStore;
use crate::time_utils::{Clock, SystemClock};

/// Header carrying the client's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

const RECORDS_PATH: &str = "/v1/hiking-records";

/// REST client for `/v1/hiking-records`.
#[derive(Clone)]
pub struct RecordApiClient {
    http: reqwest::Client,
    base_url: String,
    user_id: String,
}

impl RecordApiClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            user_id: config.user_id.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all records visible to the current user.
    pub async fn list_records(&self) -> Result<Vec<Record>> {
        let url = format!("{}{}", self.base_url, RECORDS_PATH);

        let response = self
            .http
            .get(&url)
            .header(USER_ID_HEADER, &self.user_id)
            .send()
            .await
            .map_err(transport_error)?;

        let dtos: Vec<RecordDto> = self.check_response_json(response).await?;
        let now = SystemClock.now_millis();

        tracing::debug!(count = dtos.len(), "Fetched remote records");
        Ok(dtos.into_iter().map(|dto| dto.into_record(now)).collect())
    }

    /// Create a record; returns it as stored by the backend.
    pub async fn create_record(&self, record: &Record) -> Result<Record> {
        record.validate()?;

        let url = format!("{}{}", self.base_url, RECORDS_PATH);
        let payload = CreateRecordPayload::from(record);

        let response = self
            .http
            .post(&url)
            .header(USER_ID_HEADER, &self.user_id)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let dto: RecordDto = self.check_response_json(response).await?;
        tracing::debug!(id = ?dto.id, mountain = %dto.mountain_name, "Created remote record");
        Ok(dto.into_record(SystemClock.now_millis()))
    }

    /// Check response status, parse the envelope and return its payload.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 {
                return Err(AppError::NotFound(format!("HTTP {}: {}", status, body)));
            }

            tracing::warn!(status = %status, "Backend request failed");
            return Err(AppError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::RemoteApi(format!("JSON parse error: {}", e)))?;

        envelope.into_data()
    }
}

impl RemoteRecordStore for RecordApiClient {
    async fn fetch_records(&self) -> Result<Vec<Record>> {
        self.list_records().await
    }

    async fn append_record(&self, record: &Record) -> Result<Record> {
        self.create_record(record).await
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::Transport(err.to_string())
}
