// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The checkpoint store: the resolver's input table and durable result sink.

use crate::checkpoint::CheckpointError;
use crate::{CsvStore, JsonStore};
use rr_core::{ColumnConfig, TaskIndex};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or writing a table
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("checkpoint write failed: {0}")]
    Checkpoint(#[from] CheckpointError),
    #[error("column not found: {0}")]
    MissingColumn(String),
    #[error("row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: TaskIndex, len: usize },
    #[error("malformed table: {0}")]
    Malformed(String),
    #[error("unsupported table format: {0} (expected .csv or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("table is locked by another run: {0}")]
    Locked(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One input row as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub index: TaskIndex,
    pub key: String,
    /// Existing result cell; `None` when empty
    pub value: Option<String>,
}

impl Record {
    pub fn new(index: TaskIndex, key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            index,
            key: key.into(),
            value: value.map(str::to_string),
        }
    }
}

/// New result-cell text for the row at `index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub index: TaskIndex,
    pub value: String,
}

/// Durable sink for per-record results.
///
/// `apply` reads a full snapshot of the current contents, sets the given
/// cells, and atomically replaces the live table. Callers serialize writes.
pub trait CheckpointStore: Send + Sync + 'static {
    /// Read every row as `(index, key, existing value)`.
    fn load(&self) -> Result<Vec<Record>, StoreError>;

    /// Write result cells into a full snapshot and swap it in atomically.
    fn apply(&self, updates: &[CellUpdate]) -> Result<(), StoreError>;

    /// Human-readable location for logs.
    fn location(&self) -> String;
}

/// Store selected from a table path's extension
pub enum TableStore {
    Csv(CsvStore),
    Json(JsonStore),
}

/// Open the store for `path`, choosing the format by extension.
pub fn open_store(path: &Path, columns: ColumnConfig) -> Result<TableStore, StoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => Ok(TableStore::Csv(CsvStore::new(path.to_path_buf(), columns))),
        Some("json") => Ok(TableStore::Json(JsonStore::new(path.to_path_buf(), columns))),
        _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
    }
}

impl CheckpointStore for TableStore {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        match self {
            Self::Csv(store) => store.load(),
            Self::Json(store) => store.load(),
        }
    }

    fn apply(&self, updates: &[CellUpdate]) -> Result<(), StoreError> {
        match self {
            Self::Csv(store) => store.apply(updates),
            Self::Json(store) => store.apply(updates),
        }
    }

    fn location(&self) -> String {
        match self {
            Self::Csv(store) => store.location(),
            Self::Json(store) => store.location(),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
