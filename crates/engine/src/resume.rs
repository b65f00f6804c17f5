// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resume filter: decide which records still need work.

use rr_core::isbn::normalize_isbn;
use rr_core::{KeyFormat, Task, ValidityPredicate};
use rr_storage::Record;
use serde::Serialize;

/// Work remaining for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePlan {
    /// Records to dispatch, keys normalized
    pub pending: Vec<Task>,
    /// Records whose stored value is already valid
    pub already_resolved: usize,
    pub total: usize,
}

/// Per-category record counts, as reported by `rr status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub total: usize,
    pub resolved: usize,
    pub pending: usize,
    pub failed: usize,
    pub skipped: usize,
    pub blank_key: usize,
}

#[derive(Debug, Clone)]
pub struct ResumeFilter {
    predicate: ValidityPredicate,
    key_format: KeyFormat,
}

impl ResumeFilter {
    pub fn new(predicate: ValidityPredicate, key_format: KeyFormat) -> Self {
        Self {
            predicate,
            key_format,
        }
    }

    pub fn normalize_key(&self, raw: &str) -> String {
        match self.key_format {
            KeyFormat::Any => raw.trim().to_string(),
            KeyFormat::Isbn => normalize_isbn(raw),
        }
    }

    pub fn is_resolved(&self, record: &Record) -> bool {
        self.predicate.is_valid(record.value.as_deref())
    }

    pub fn plan(&self, records: &[Record]) -> ResumePlan {
        let pending: Vec<Task> = records
            .iter()
            .filter(|r| !self.is_resolved(r))
            .map(|r| Task::new(r.index, self.normalize_key(&r.key)))
            .collect();
        ResumePlan {
            already_resolved: records.len() - pending.len(),
            total: records.len(),
            pending,
        }
    }

    /// Classify every record without touching any session.
    pub fn status(&self, records: &[Record]) -> TableStatus {
        let mut status = TableStatus {
            total: records.len(),
            ..TableStatus::default()
        };
        for record in records {
            let value = record
                .value
                .as_deref()
                .map(|v| v.trim().to_ascii_lowercase())
                .unwrap_or_default();
            if self.is_resolved(record) {
                status.resolved += 1;
            } else if self.normalize_key(&record.key).is_empty() {
                status.blank_key += 1;
            } else if value.starts_with("failed") || value.starts_with("error:") {
                status.failed += 1;
            } else if value.starts_with("skipped") {
                status.skipped += 1;
            } else {
                status.pending += 1;
            }
        }
        status
    }
}

#[cfg(test)]
#[path = "resume_tests.rs"]
mod tests;
