// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result buffer: staged task results waiting to be checkpointed.
//!
//! Successful values are *flushable* and may be written whenever a trigger
//! fires. Failures, skips and blank values are *final-only*: they reach the
//! store only on a forced flush, so an interrupted run never records a
//! placeholder over a cell that a later attempt in the same run might fill.
//!
//! Every stage carries a sequence number. A flush removes only the entries
//! whose sequence number is unchanged when the write completes, so a result
//! restaged while the store was being written stays buffered.

use crate::error::RunError;
use crate::scheduler::task_panicked;
use parking_lot::Mutex;
use rr_core::{Clock, FlushPolicy, Flushability, TaskIndex, TaskResult};
use rr_storage::{CellUpdate, CheckpointStore, StoreError};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// What a call to [`ResultBuffer::maybe_flush`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushOutcome {
    /// Cells written to the store (0 when no trigger fired)
    pub written: usize,
    /// Entries still buffered afterwards
    pub remaining: usize,
}

#[derive(Debug)]
struct Staged {
    result: TaskResult,
    seq: u64,
}

struct BufferState {
    entries: BTreeMap<TaskIndex, Staged>,
    next_seq: u64,
    last_flush: Instant,
}

pub struct ResultBuffer<St, C> {
    store: St,
    policy: FlushPolicy,
    clock: C,
    state: Mutex<BufferState>,
    write_lock: Mutex<()>,
}

impl<St: CheckpointStore, C: Clock> ResultBuffer<St, C> {
    pub fn new(store: St, policy: FlushPolicy, clock: C) -> Self {
        let last_flush = clock.now();
        Self {
            store,
            policy,
            clock,
            state: Mutex::new(BufferState {
                entries: BTreeMap::new(),
                next_seq: 0,
                last_flush,
            }),
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Stage `result` for `index`, replacing anything staged before.
    pub fn stage(&self, index: TaskIndex, result: TaskResult) {
        let mut state = self.state.lock();
        state.next_seq += 1;
        let seq = state.next_seq;
        state.entries.insert(index, Staged { result, seq });
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries that an unforced flush would write
    pub fn flushable_count(&self) -> usize {
        self.state
            .lock()
            .entries
            .values()
            .filter(|s| s.result.flushability() == Flushability::Incremental)
            .count()
    }

    /// Staged result for `index`, if any
    pub fn staged(&self, index: TaskIndex) -> Option<TaskResult> {
        self.state
            .lock()
            .entries
            .get(&index)
            .map(|s| s.result.clone())
    }

    /// Write buffered results if a trigger fired, or unconditionally with `force`.
    ///
    /// An unforced flush writes only flushable entries; a forced flush writes
    /// everything. On error nothing is removed from the buffer.
    pub fn maybe_flush(&self, force: bool) -> Result<FlushOutcome, StoreError> {
        let _write = self.write_lock.lock();
        let now = self.clock.now();

        let batch: Vec<(u64, CellUpdate)> = {
            let mut state = self.state.lock();
            let flushable = state
                .entries
                .values()
                .filter(|s| s.result.flushability() == Flushability::Incremental)
                .count();
            let count_due = self.policy.every_count.is_some_and(|n| flushable >= n);
            let time_due = self
                .policy
                .every
                .is_some_and(|every| now.duration_since(state.last_flush) >= every);
            if !(force || count_due || time_due) {
                return Ok(FlushOutcome {
                    written: 0,
                    remaining: state.entries.len(),
                });
            }
            state.last_flush = now;
            state
                .entries
                .iter()
                .filter(|(_, s)| force || s.result.flushability() == Flushability::Incremental)
                .map(|(&index, s)| {
                    (
                        s.seq,
                        CellUpdate {
                            index,
                            value: s.result.cell_value(),
                        },
                    )
                })
                .collect()
        };

        if batch.is_empty() {
            return Ok(FlushOutcome {
                written: 0,
                remaining: self.len(),
            });
        }

        let updates: Vec<CellUpdate> = batch.iter().map(|(_, u)| u.clone()).collect();
        self.store.apply(&updates)?;

        let mut state = self.state.lock();
        for (seq, update) in &batch {
            if state.entries.get(&update.index).is_some_and(|s| s.seq == *seq) {
                state.entries.remove(&update.index);
            }
        }
        let outcome = FlushOutcome {
            written: batch.len(),
            remaining: state.entries.len(),
        };
        tracing::info!(
            written = outcome.written,
            remaining = outcome.remaining,
            forced = force,
            store = %self.store.location(),
            "checkpoint written"
        );
        Ok(outcome)
    }

    /// [`maybe_flush`](Self::maybe_flush) on tokio's blocking thread pool.
    ///
    /// Async callers use this so store I/O stays off the runtime's worker
    /// threads. The write completes even if the returned future is dropped.
    pub async fn flush_on_blocking_pool(
        self: Arc<Self>,
        force: bool,
    ) -> Result<FlushOutcome, RunError> {
        let outcome = tokio::task::spawn_blocking(move || self.maybe_flush(force))
            .await
            .map_err(task_panicked)??;
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
