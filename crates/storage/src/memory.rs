// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory checkpoint store for testing

use crate::store::{CellUpdate, CheckpointStore, Record, StoreError};
use parking_lot::Mutex;
use rr_core::TaskIndex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct MemoryState {
    records: Vec<Record>,
    applies: Vec<Vec<CellUpdate>>,
}

/// Store backed by a vector; records every `apply` and supports failure injection.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryState>>,
    fail_apply: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Table with the given keys and empty result cells
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let records = keys
            .iter()
            .enumerate()
            .map(|(index, key)| Record::new(index, key.as_ref(), None))
            .collect();
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState {
                records,
                applies: Vec::new(),
            })),
            fail_apply: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current result cell for `index`
    pub fn value(&self, index: TaskIndex) -> Option<String> {
        self.inner
            .lock()
            .records
            .get(index)
            .and_then(|r| r.value.clone())
    }

    /// All result cells in row order
    pub fn values(&self) -> Vec<Option<String>> {
        self.inner
            .lock()
            .records
            .iter()
            .map(|r| r.value.clone())
            .collect()
    }

    /// Every batch passed to `apply`, in order
    pub fn applies(&self) -> Vec<Vec<CellUpdate>> {
        self.inner.lock().applies.clone()
    }

    pub fn set_fail_apply(&self, fail: bool) {
        self.fail_apply.store(fail, Ordering::SeqCst);
    }
}

impl CheckpointStore for MemoryStore {
    fn load(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.inner.lock().records.clone())
    }

    fn apply(&self, updates: &[CellUpdate]) -> Result<(), StoreError> {
        if self.fail_apply.load(Ordering::SeqCst) {
            return Err(StoreError::Malformed("injected apply failure".to_string()));
        }
        let mut inner = self.inner.lock();
        let len = inner.records.len();
        // Validate first so a bad batch leaves the table untouched
        if let Some(bad) = updates.iter().find(|u| u.index >= len) {
            return Err(StoreError::RowOutOfRange {
                index: bad.index,
                len,
            });
        }
        for update in updates {
            inner.records[update.index].value = Some(update.value.clone());
        }
        inner.applies.push(updates.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
