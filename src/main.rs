// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hiking-log migration and statistics runner
//!
//! Uploads records kept on the device to the backend (once), then prints
//! the statistics dashboard for the records stored remotely.

use anyhow::Context;
use hiking_log::{
    config::Config,
    services::{stats, LocalRecordStore, MigrationReconciler, RecordApiClient},
    time_utils::{format_millis_rfc3339, Clock, SystemClock},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    let started_at = SystemClock.now_millis();
    tracing::info!(
        api_url = %config.api_url,
        started_at = format_millis_rfc3339(started_at).as_deref(),
        "Starting hiking-log"
    );

    let local = LocalRecordStore::load_from_file(&config.local_records_path)
        .with_context(|| format!("Failed to load {}", config.local_records_path))?;

    let client = RecordApiClient::new(&config)?;

    let mut migration = MigrationReconciler::new(
        client.clone(),
        SystemClock,
        Some(config.owner_marker.clone()),
    );
    let outcome = migration.reconcile(local.records()).await;
    tracing::info!(
        status = ?outcome.status,
        migrated = outcome.migrated_count,
        "Migration finished: {}",
        outcome
    );

    if let Some(err) = outcome.error {
        tracing::error!(
            retryable = err.is_retryable(),
            "Migration stopped; re-running is safe"
        );
        return Err(err.into());
    }

    let records = client
        .list_records()
        .await
        .context("Failed to fetch records for statistics")?;

    let report = stats::compute_report(&records, started_at.unsigned_abs());
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hiking_log=debug,info")),
        )
        .with(format)
        .init();
}
