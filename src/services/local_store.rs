// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Loader for records kept on the device before the backend existed.

use crate::models::Record;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Records exported from local storage as a JSON array.
#[derive(Debug, Default, Clone)]
pub struct LocalRecordStore {
    records: Vec<Record>,
}

impl LocalRecordStore {
    /// Load records from a JSON file. A missing file means no local records.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LocalStoreError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json_data) => Self::load_from_json(&json_data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No local record file");
                Ok(Self::default())
            }
            Err(e) => Err(LocalStoreError::IoError(e.to_string())),
        }
    }

    /// Load records from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, LocalStoreError> {
        let records: Vec<Record> = serde_json::from_str(json_data)
            .map_err(|e| LocalStoreError::ParseError(e.to_string()))?;

        tracing::info!(count = records.len(), "Loaded local records");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Errors from loading local records.
#[derive(Debug, thiserror::Error)]
pub enum LocalStoreError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse records: {0}")]
    ParseError(String),
}
