// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run statistics.
//!
//! Counters only ever increase. Each task is recorded once, when its final
//! outcome for the run is known: pass-1 failures are held back until the retry
//! pass has decided them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use uuid::Uuid;

use crate::result::TaskResult;

/// Live counters shared by all tasks of a run
#[derive(Debug)]
pub struct RunStatistics {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    total: AtomicU64,
    success: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
    retried: AtomicU64,
    recovered: AtomicU64,
    restarts: AtomicU64,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStatistics {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            total: AtomicU64::new(0),
            success: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            retried: AtomicU64::new(0),
            recovered: AtomicU64::new(0),
            restarts: AtomicU64::new(0),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Count records in the run, whether or not they need work
    pub fn add_total(&self, n: usize) {
        self.total.fetch_add(n as u64, Ordering::Relaxed);
    }

    /// Count records excluded before scheduling because they are already resolved
    pub fn add_pre_skipped(&self, n: usize) {
        self.skipped.fetch_add(n as u64, Ordering::Relaxed);
    }

    /// Record the final outcome of one task
    pub fn record(&self, result: &TaskResult) {
        let counter = match result {
            TaskResult::Success(_) => &self.success,
            TaskResult::Skipped(_) => &self.skipped,
            TaskResult::Failed(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count tasks entering the retry pass
    pub fn add_retried(&self, n: usize) {
        self.retried.fetch_add(n as u64, Ordering::Relaxed);
    }

    /// Count a retry-pass task that ended in success
    pub fn add_recovered(&self) {
        self.recovered.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a fatal session restart
    pub fn add_restart(&self) {
        self.restarts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn success(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Snapshot the counters into a summary.
    pub fn summary(&self, elapsed: Duration) -> RunSummary {
        let total = self.total.load(Ordering::Relaxed);
        let success = self.success();
        let failed = self.failed();
        let skipped = self.skipped();
        let attempted = total.saturating_sub(skipped);
        let success_rate = if attempted == 0 {
            100.0
        } else {
            success as f64 / attempted as f64 * 100.0
        };
        RunSummary {
            run_id: self.run_id,
            started_at: self.started_at,
            total,
            success,
            failed,
            skipped,
            failed_after_retry: failed,
            retried: self.retried.load(Ordering::Relaxed),
            recovered: self.recovered.load(Ordering::Relaxed),
            restarts: self.restarts.load(Ordering::Relaxed),
            success_rate,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

/// Aggregate result of a run, returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    pub skipped: u64,
    /// Tasks still failed after the retry pass
    pub failed_after_retry: u64,
    pub retried: u64,
    pub recovered: u64,
    pub restarts: u64,
    /// Percentage of attempted (non-skipped) records that resolved
    pub success_rate: f64,
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// True when every record is either resolved or was skipped.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Format a duration for log lines and summaries: `"850ms"`, `"12.4s"`, `"3m05s"`, `"1h02m"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs == 0 {
        format!("{}ms", elapsed.as_millis())
    } else if secs < 60 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h{:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
