// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON table store: an array of objects, one per record.

use crate::checkpoint::{write_atomic, CheckpointWriter, FsCheckpointWriter};
use crate::store::{CellUpdate, CheckpointStore, Record, StoreError};
use indexmap::IndexMap;
use rr_core::ColumnConfig;
use serde_json::Value;
use std::path::PathBuf;

type Row = IndexMap<String, Value>;

/// Render a JSON cell as text; numbers keep their literal form.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Table stored as a JSON array of objects
pub struct JsonStore<W: CheckpointWriter = FsCheckpointWriter> {
    path: PathBuf,
    columns: ColumnConfig,
    writer: W,
}

impl JsonStore<FsCheckpointWriter> {
    pub fn new(path: PathBuf, columns: ColumnConfig) -> Self {
        Self::with_writer(FsCheckpointWriter, path, columns)
    }
}

impl<W: CheckpointWriter> JsonStore<W> {
    pub fn with_writer(writer: W, path: PathBuf, columns: ColumnConfig) -> Self {
        Self {
            path,
            columns,
            writer,
        }
    }

    fn read_rows(&self) -> Result<Vec<Row>, StoreError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => {
                StoreError::Malformed(format!("expected a JSON array of objects: {e}"))
            }
            _ => StoreError::Json(e),
        })
    }
}

impl<W: CheckpointWriter> CheckpointStore for JsonStore<W> {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        let rows = self.read_rows()?;
        if !rows.is_empty() && !rows.iter().any(|r| r.contains_key(&self.columns.key)) {
            return Err(StoreError::MissingColumn(self.columns.key.clone()));
        }
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let key = row
                    .get(&self.columns.key)
                    .and_then(cell_text)
                    .unwrap_or_default();
                let value = row
                    .get(&self.columns.value)
                    .and_then(cell_text)
                    .filter(|v| !v.trim().is_empty());
                Record {
                    index,
                    key,
                    value,
                }
            })
            .collect();
        Ok(records)
    }

    fn apply(&self, updates: &[CellUpdate]) -> Result<(), StoreError> {
        let mut rows = self.read_rows()?;
        let len = rows.len();
        for update in updates {
            let row = rows.get_mut(update.index).ok_or(StoreError::RowOutOfRange {
                index: update.index,
                len,
            })?;
            row.insert(
                self.columns.value.clone(),
                Value::String(update.value.clone()),
            );
        }

        let mut data = serde_json::to_vec_pretty(&rows)?;
        data.push(b'\n');
        write_atomic(&self.writer, &self.path, &data)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
