// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end migration through the HTTP client against the stub backend.

use hiking_log::models::Record;
use hiking_log::services::{
    migration::{MigrationError, MigrationState, MigrationStatus},
    MigrationReconciler, RecordApiClient,
};
use hiking_log::time_utils::FixedClock;
use std::sync::atomic::Ordering;
use std::sync::Arc;

mod common;
use common::{spawn_backend, test_config, StubBackend};

const NOW: i64 = 1_717_230_600_000;

fn local_records() -> Vec<Record> {
    [
        ("1700000000001", "泰山", "2024-05-01"),
        ("1700000000002", "华山", "2024-05-12"),
        ("1700000000003", "黄山", "2024-06-03"),
    ]
    .into_iter()
    .map(|(id, name, date)| {
        let mut record = Record::new(name, date);
        record.id = Some(id.to_string());
        record.distance = Some("8".to_string());
        record.duration = Some("2h".to_string());
        record
    })
    .collect()
}

async fn client_for(backend: &Arc<StubBackend>) -> RecordApiClient {
    let url = spawn_backend(backend.clone()).await;
    RecordApiClient::new(&test_config(url)).unwrap()
}

#[tokio::test]
async fn test_migrates_all_records_in_order() {
    let backend = Arc::new(StubBackend::default());
    let client = client_for(&backend).await;
    let local = local_records();

    let mut reconciler = MigrationReconciler::new(&client, FixedClock(NOW), Some("user_1".into()));
    let outcome = reconciler.reconcile(&local).await;

    assert_eq!(outcome.status, MigrationStatus::Done);
    assert_eq!(outcome.migrated_count, 3);
    assert!(outcome.error.is_none());
    assert_eq!(reconciler.state(), MigrationState::Done);

    let stored = backend.sorted_records();
    let names: Vec<&str> = stored.iter().map(|r| r.mountain_name.as_str()).collect();
    assert_eq!(names, vec!["泰山", "华山", "黄山"]);

    for dto in &stored {
        assert_eq!(dto.user_id.as_deref(), Some("test_user"));
        assert_eq!(dto.distance, Some(8.0));
        assert_eq!(dto.duration.as_deref(), Some("2h"));
    }
}

#[tokio::test]
async fn test_second_run_is_nothing_to_do() {
    let backend = Arc::new(StubBackend::default());
    let client = client_for(&backend).await;
    let local = local_records();

    let first = MigrationReconciler::new(&client, FixedClock(NOW), None)
        .reconcile(&local)
        .await;
    assert_eq!(first.status, MigrationStatus::Done);

    let second = MigrationReconciler::new(&client, FixedClock(NOW), None)
        .reconcile(&local)
        .await;
    assert_eq!(second.status, MigrationStatus::NothingToDo);
    assert_eq!(second.migrated_count, 0);
    assert_eq!(second.to_string(), "no migration performed");

    assert_eq!(backend.records.len(), 3);
    assert_eq!(backend.create_attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_failure_stops_at_first_error_and_rerun_completes() {
    let backend = Arc::new(StubBackend::failing_on(2));
    let client = client_for(&backend).await;
    let local = local_records();

    let outcome = MigrationReconciler::new(&client, FixedClock(NOW), None)
        .reconcile(&local)
        .await;

    assert!(outcome.is_failed());
    assert_eq!(outcome.migrated_count, 1);
    assert_eq!(backend.create_attempts.load(Ordering::SeqCst), 2);
    assert_eq!(backend.records.len(), 1);

    let err = outcome.error.as_ref().expect("Failed outcome carries an error");
    assert!(err.is_retryable());
    match err {
        MigrationError::Append {
            index, record_id, ..
        } => {
            assert_eq!(*index, 1);
            assert_eq!(record_id.as_deref(), Some("1700000000002"));
        }
        other => panic!("Expected append error, got {:?}", other),
    }

    // Only the attempt number failed, so a second pass picks up the rest.
    let retry = MigrationReconciler::new(&client, FixedClock(NOW), None)
        .reconcile(&local)
        .await;

    assert_eq!(retry.status, MigrationStatus::Done);
    assert_eq!(retry.migrated_count, 2);

    let stored = backend.sorted_records();
    let names: Vec<&str> = stored.iter().map(|r| r.mountain_name.as_str()).collect();
    assert_eq!(names, vec!["泰山", "华山", "黄山"]);
    assert_eq!(backend.create_attempts.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_record_already_on_backend_is_not_duplicated() {
    let backend = Arc::new(StubBackend::default());
    let client = client_for(&backend).await;
    let local = local_records();

    // Same hike entered through the app: new id, distance stored as a number.
    client.create_record(&local[1]).await.unwrap();

    let outcome = MigrationReconciler::new(&client, FixedClock(NOW), None)
        .reconcile(&local)
        .await;

    assert_eq!(outcome.status, MigrationStatus::Done);
    assert_eq!(outcome.migrated_count, 2);

    let stored = backend.sorted_records();
    let names: Vec<&str> = stored.iter().map(|r| r.mountain_name.as_str()).collect();
    assert_eq!(names, vec!["华山", "泰山", "黄山"]);
}

#[tokio::test]
async fn test_fetch_failure_appends_nothing() {
    // Point at a path the stub does not serve.
    let backend = Arc::new(StubBackend::default());
    let url = spawn_backend(backend.clone()).await;
    let client = RecordApiClient::new(&test_config(format!("{}/missing", url))).unwrap();

    let outcome = MigrationReconciler::new(&client, FixedClock(NOW), None)
        .reconcile(&local_records())
        .await;

    assert!(outcome.is_failed());
    assert_eq!(outcome.migrated_count, 0);
    assert!(matches!(outcome.error, Some(MigrationError::Fetch { .. })));
    assert_eq!(backend.create_attempts.load(Ordering::SeqCst), 0);
}
