// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CSV table store.
//!
//! The first row is the header. The key column must exist; the result column
//! is appended on first write if the table does not have one yet. All other
//! columns are carried through unchanged.

use crate::checkpoint::{write_atomic, CheckpointWriter, FsCheckpointWriter};
use crate::store::{CellUpdate, CheckpointStore, Record, StoreError};
use rr_core::ColumnConfig;
use std::path::PathBuf;

struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

/// Table stored as a CSV file
pub struct CsvStore<W: CheckpointWriter = FsCheckpointWriter> {
    path: PathBuf,
    columns: ColumnConfig,
    writer: W,
}

impl CsvStore<FsCheckpointWriter> {
    pub fn new(path: PathBuf, columns: ColumnConfig) -> Self {
        Self::with_writer(FsCheckpointWriter, path, columns)
    }
}

impl<W: CheckpointWriter> CsvStore<W> {
    /// Create a store with a custom checkpoint writer (for testing).
    pub fn with_writer(writer: W, path: PathBuf, columns: ColumnConfig) -> Self {
        Self {
            path,
            columns,
            writer,
        }
    }

    fn read_table(&self) -> Result<CsvTable, StoreError> {
        let file = std::fs::File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(CsvTable { headers, rows })
    }

    fn serialize(table: &CsvTable) -> Result<Vec<u8>, StoreError> {
        let width = table.headers.len();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            let mut row = row.clone();
            if row.len() < width {
                row.resize(width, String::new());
            }
            writer.write_record(&row)?;
        }
        writer
            .into_inner()
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

impl<W: CheckpointWriter> CheckpointStore for CsvStore<W> {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        let table = self.read_table()?;
        let key_col = table
            .column(&self.columns.key)
            .ok_or_else(|| StoreError::MissingColumn(self.columns.key.clone()))?;
        let value_col = table.column(&self.columns.value);

        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let key = row.get(key_col).map(String::as_str).unwrap_or_default();
                let value = value_col
                    .and_then(|c| row.get(c))
                    .map(String::as_str)
                    .filter(|v| !v.trim().is_empty());
                Record::new(index, key, value)
            })
            .collect();
        Ok(records)
    }

    fn apply(&self, updates: &[CellUpdate]) -> Result<(), StoreError> {
        let mut table = self.read_table()?;
        let value_col = match table.column(&self.columns.value) {
            Some(col) => col,
            None => {
                table.headers.push(self.columns.value.clone());
                table.headers.len() - 1
            }
        };

        let len = table.rows.len();
        for update in updates {
            let row = table
                .rows
                .get_mut(update.index)
                .ok_or(StoreError::RowOutOfRange {
                    index: update.index,
                    len,
                })?;
            if row.len() <= value_col {
                row.resize(value_col + 1, String::new());
            }
            row[value_col] = update.value.clone();
        }

        let data = Self::serialize(&table)?;
        write_atomic(&self.writer, &self.path, &data)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[path = "csv_store_tests.rs"]
mod tests;
