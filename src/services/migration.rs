// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One-time migration of locally stored records to the backend.
//!
//! The workflow:
//! 1. Fetch the remote records and collect their identities
//! 2. Keep the local records that are not already remote
//! 3. Append those one at a time, in input order, stopping at the first failure
//!
//! Nothing is rolled back on failure. Re-running is safe because step 2
//! skips every record an earlier run already appended.
//!
//! The backend assigns its own ids and keeps only the record content, so a
//! local record is also recognized by its content (see [`ContentKey`]).

use std::collections::HashSet;
use std::fmt;
use std::future::Future;

use crate::error::{AppError, Result};
use crate::models::Record;
use crate::time_utils::Clock;

/// Remote record storage used as the migration target.
pub trait RemoteRecordStore {
    /// All records currently persisted remotely.
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<Record>>> + Send;

    /// Persist one record; returns it with its remote identifier.
    fn append_record(&self, record: &Record) -> impl Future<Output = Result<Record>> + Send;
}

impl<T: RemoteRecordStore + Sync> RemoteRecordStore for &T {
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<Record>>> + Send {
        (**self).fetch_records()
    }

    fn append_record(&self, record: &Record) -> impl Future<Output = Result<Record>> + Send {
        (**self).append_record(record)
    }
}

/// Migration progress.
///
/// `Idle -> Checking -> {NothingToDo | Failed | Migrating -> {Done | Failed}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    Idle,
    Checking,
    NothingToDo,
    Migrating,
    Done,
    Failed,
}

impl MigrationState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MigrationState::NothingToDo | MigrationState::Done | MigrationState::Failed
        )
    }

    fn can_transition_to(self, next: MigrationState) -> bool {
        use MigrationState::*;
        matches!(
            (self, next),
            (Idle, Checking)
                | (Checking, NothingToDo)
                | (Checking, Migrating)
                | (Checking, Failed)
                | (Migrating, Done)
                | (Migrating, Failed)
        )
    }
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigrationState::Idle => "idle",
            MigrationState::Checking => "checking",
            MigrationState::NothingToDo => "nothing_to_do",
            MigrationState::Migrating => "migrating",
            MigrationState::Done => "done",
            MigrationState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Terminal status of one migration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    NothingToDo,
    Done,
    Failed,
}

/// Errors that end a migration pass.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Failed to fetch remote records: {source}")]
    Fetch {
        #[source]
        source: AppError,
    },

    #[error(
        "Failed to migrate record at index {index} (id {id}): {source}",
        id = .record_id.as_deref().unwrap_or("<none>")
    )]
    Append {
        /// Position of the record in the local input list
        index: usize,
        record_id: Option<String>,
        #[source]
        source: AppError,
    },
}

impl MigrationError {
    /// The remote error that ended the pass.
    pub fn remote_error(&self) -> &AppError {
        match self {
            MigrationError::Fetch { source } | MigrationError::Append { source, .. } => source,
        }
    }

    /// Whether the failure looks transient, so re-running later may succeed.
    pub fn is_retryable(&self) -> bool {
        self.remote_error().is_retryable()
    }
}

/// Result of `MigrationReconciler::reconcile`.
#[derive(Debug)]
pub struct MigrationOutcome {
    pub status: MigrationStatus,
    /// Records appended during this pass (before the failure, if any)
    pub migrated_count: usize,
    pub error: Option<MigrationError>,
}

impl MigrationOutcome {
    fn nothing_to_do() -> Self {
        Self {
            status: MigrationStatus::NothingToDo,
            migrated_count: 0,
            error: None,
        }
    }

    fn failed(migrated_count: usize, error: MigrationError) -> Self {
        Self {
            status: MigrationStatus::Failed,
            migrated_count,
            error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == MigrationStatus::Failed
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.error) {
            (MigrationStatus::NothingToDo, _) => write!(f, "no migration performed"),
            (MigrationStatus::Done, _) => write!(f, "migrated {} records", self.migrated_count),
            (MigrationStatus::Failed, Some(err)) => write!(
                f,
                "migration failed after {} records: {}",
                self.migrated_count, err
            ),
            (MigrationStatus::Failed, None) => write!(
                f,
                "migration failed after {} records",
                self.migrated_count
            ),
        }
    }
}

/// Copies local records that are missing remotely to the remote store.
pub struct MigrationReconciler<R, C> {
    remote: R,
    clock: C,
    owner_marker: Option<String>,
    state: MigrationState,
}

impl<R: RemoteRecordStore, C: Clock> MigrationReconciler<R, C> {
    /// `owner_marker` is the acting user's identity, stamped on every
    /// migrated record.
    pub fn new(remote: R, clock: C, owner_marker: Option<String>) -> Self {
        Self {
            remote,
            clock,
            owner_marker,
            state: MigrationState::Idle,
        }
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    /// Run one migration pass over `local_records`.
    ///
    /// Appends are awaited one at a time in input order. The first failed
    /// append ends the pass; records appended before it stay remote.
    pub async fn reconcile(&mut self, local_records: &[Record]) -> MigrationOutcome {
        self.state = MigrationState::Idle;
        self.transition(MigrationState::Checking);

        if local_records.is_empty() {
            tracing::info!("No local records to migrate");
            self.transition(MigrationState::NothingToDo);
            return MigrationOutcome::nothing_to_do();
        }

        tracing::info!(local = local_records.len(), "Checking local records against remote");

        let remote_records = match self.remote.fetch_records().await {
            Ok(records) => records,
            Err(source) => {
                tracing::error!(error = %source, "Failed to fetch remote records");
                self.transition(MigrationState::Failed);
                return MigrationOutcome::failed(0, MigrationError::Fetch { source });
            }
        };

        let to_migrate = missing_from_remote(local_records, &remote_records);
        if to_migrate.is_empty() {
            tracing::info!(
                remote = remote_records.len(),
                "Remote already has every local record"
            );
            self.transition(MigrationState::NothingToDo);
            return MigrationOutcome::nothing_to_do();
        }

        tracing::info!(count = to_migrate.len(), "Migrating records");
        self.transition(MigrationState::Migrating);

        // One timestamp for the whole pass.
        let now = self.clock.now_millis();

        for (migrated, &(index, record)) in to_migrate.iter().enumerate() {
            let stamped = self.stamp(record, now);

            match self.remote.append_record(&stamped).await {
                Ok(persisted) => {
                    tracing::debug!(
                        index,
                        local_id = ?record.id,
                        remote_id = ?persisted.id,
                        "Record migrated"
                    );
                }
                Err(source) => {
                    tracing::error!(
                        index,
                        local_id = ?record.id,
                        migrated,
                        error = %source,
                        "Record migration failed"
                    );
                    self.transition(MigrationState::Failed);
                    return MigrationOutcome::failed(
                        migrated,
                        MigrationError::Append {
                            index,
                            record_id: record.id.clone(),
                            source,
                        },
                    );
                }
            }
        }

        tracing::info!(count = to_migrate.len(), "Migration complete");
        self.transition(MigrationState::Done);
        MigrationOutcome {
            status: MigrationStatus::Done,
            migrated_count: to_migrate.len(),
            error: None,
        }
    }

    /// Copy of `record` ready to append: the remote assigns the new id, the
    /// local id moves to `source_id`, missing timestamps default to `now`.
    fn stamp(&self, record: &Record, now: i64) -> Record {
        let mut stamped = record.clone();
        stamped.id = None;
        stamped.source_id = record.id.clone().or_else(|| record.source_id.clone());
        if self.owner_marker.is_some() {
            stamped.owner_marker = self.owner_marker.clone();
        }
        stamped.create_time.get_or_insert(now);
        stamped.update_time.get_or_insert(now);
        stamped
    }

    fn transition(&mut self, next: MigrationState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid migration transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(
            from = %self.state,
            to = %next,
            terminal = next.is_terminal(),
            "Migration state change"
        );
        self.state = next;
    }
}

/// The fields a record keeps through a round trip to the backend.
///
/// Two records with equal keys describe the same hike. Photos are left out
/// because uploads may rewrite their references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    mountain_name: String,
    date: String,
    distance: Option<String>,
    duration: Option<String>,
    weather: Option<String>,
    notes: Option<String>,
}

impl ContentKey {
    pub fn of(record: &Record) -> Self {
        let text = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        Self {
            mountain_name: record.mountain_name.clone(),
            date: record.date.clone(),
            // Canonical number text, so "8" and "8.0" compare equal.
            distance: record.distance_value().map(|d| d.to_string()),
            duration: text(&record.duration),
            weather: record.weather_label().map(String::from),
            notes: text(&record.notes),
        }
    }
}

/// Local records (with their input index) not yet present remotely.
///
/// A remote record covers a local one when its `id` or `source_id` equals
/// the local `id`, or when both have the same [`ContentKey`].
fn missing_from_remote<'a>(local: &'a [Record], remote: &[Record]) -> Vec<(usize, &'a Record)> {
    let remote_ids: HashSet<&str> = remote
        .iter()
        .flat_map(|r| [r.id.as_deref(), r.source_id.as_deref()])
        .flatten()
        .collect();
    let remote_content: HashSet<ContentKey> = remote.iter().map(ContentKey::of).collect();

    local
        .iter()
        .enumerate()
        .filter(|(index, record)| {
            if record
                .id
                .as_deref()
                .is_some_and(|id| remote_ids.contains(id))
            {
                return false;
            }
            if remote_content.contains(&ContentKey::of(record)) {
                tracing::debug!(
                    index = *index,
                    local_id = ?record.id,
                    "Local record already remote under another id"
                );
                return false;
            }
            true
        })
        .collect()
}
