// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod api_client;
pub mod duration;
pub mod local_store;
pub mod migration;
pub mod stats;

pub use api_client::RecordApiClient;
pub use local_store::{LocalRecordStore, LocalStoreError};
pub use migration::{
    ContentKey, MigrationError, MigrationOutcome, MigrationReconciler, MigrationState, MigrationStatus,
    RemoteRecordStore,
};
