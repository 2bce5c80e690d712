// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process stub of the hiking-record backend.
//!
//! Mirrors the backend's contract: create requests carry only the record
//! content, ids and timestamps are assigned here, and nothing else a
//! client sends is kept.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dashmap::DashMap;
use hiking_log::config::Config;
use hiking_log::models::{ApiEnvelope, CreateRecordPayload, RecordDto};
use hiking_log::services::api_client::USER_ID_HEADER;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Photo limit enforced by the stub, like the real backend.
#[allow(dead_code)]
pub const MAX_PHOTOS: usize = 9;

/// Backend state shared with the test body.
#[derive(Default)]
pub struct StubBackend {
    pub records: DashMap<i64, RecordDto>,
    next_id: AtomicI64,
    /// Number of create requests received
    pub create_attempts: AtomicUsize,
    /// Fail this create attempt (1-based) with HTTP 503
    pub fail_create_on: Option<usize>,
}

impl StubBackend {
    #[allow(dead_code)]
    pub fn failing_on(attempt: usize) -> Self {
        Self {
            fail_create_on: Some(attempt),
            ..Self::default()
        }
    }

    /// Stored records ordered by id.
    #[allow(dead_code)]
    pub fn sorted_records(&self) -> Vec<RecordDto> {
        let mut records: Vec<RecordDto> = self.records.iter().map(|e| e.value().clone()).collect();
        records.sort_by_key(|r| r.id);
        records
    }
}

/// Start the stub backend on an ephemeral port; returns its `/api` base URL.
#[allow(dead_code)]
pub async fn spawn_backend(backend: Arc<StubBackend>) -> String {
    let app = Router::new()
        .route("/api/v1/hiking-records", get(list_records).post(create_record))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Stub backend has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub backend failed");
    });

    format!("http://{}/api", addr)
}

/// Test config pointing at `api_url`.
#[allow(dead_code)]
pub fn test_config(api_url: String) -> Config {
    Config {
        api_url,
        http_timeout_secs: 5,
        ..Config::default()
    }
}

fn has_user(headers: &HeaderMap) -> bool {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty())
}

async fn list_records(State(backend): State<Arc<StubBackend>>, headers: HeaderMap) -> Response {
    if !has_user(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing user").into_response();
    }
    Json(ApiEnvelope::success(backend.sorted_records())).into_response()
}

async fn create_record(
    State(backend): State<Arc<StubBackend>>,
    headers: HeaderMap,
    Json(payload): Json<CreateRecordPayload>,
) -> Response {
    if !has_user(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing user").into_response();
    }

    let attempt = backend.create_attempts.fetch_add(1, Ordering::SeqCst) + 1;
    if backend.fail_create_on == Some(attempt) {
        return (StatusCode::SERVICE_UNAVAILABLE, "unavailable").into_response();
    }

    // Business validation errors come back as HTTP 200 with a non-zero code.
    if payload.photos.len() > MAX_PHOTOS {
        return Json(ApiEnvelope::<RecordDto>::failure(400, "照片最多9张")).into_response();
    }

    let id = backend.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let dto = RecordDto {
        id: Some(id),
        user_id: headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        mountain_name: payload.mountain_name,
        hiking_date: Some(payload.hiking_date),
        distance: payload.distance,
        duration: payload.duration,
        weather_type: payload.weather_type,
        weather_icon: payload.weather_icon,
        photos: Some(payload.photos),
        notes: payload.notes,
        create_time: Some(local_date_time_now()),
        update_time: Some(local_date_time_now()),
        ..RecordDto::default()
    };
    backend.records.insert(id, dto.clone());

    Json(ApiEnvelope::success(dto)).into_response()
}

fn local_date_time_now() -> String {
    chrono::Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
