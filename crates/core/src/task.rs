// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task: one record key awaiting resolution.

use std::fmt;

/// Ordinal position of a record in the input table
pub type TaskIndex = usize;

/// A single unit of work: resolve `key` for the record at `index`.
///
/// Tasks are created once from the input table and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    index: TaskIndex,
    key: String,
}

impl Task {
    pub fn new(index: TaskIndex, key: impl Into<String>) -> Self {
        Self {
            index,
            key: key.into(),
        }
    }

    pub fn index(&self) -> TaskIndex {
        self.index
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.index, self.key)
    }
}
