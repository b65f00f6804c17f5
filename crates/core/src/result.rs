// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task outcomes and their persistence classification.

use crate::validity::is_placeholder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefixes marking a stored cell as a placeholder rather than a resolved value.
///
/// Matched case-insensitively against the trimmed cell text.
pub const PLACEHOLDER_PREFIXES: &[&str] = &["skipped", "failed", "error:"];

/// Outcome of one attempt group for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum TaskResult {
    Success(String),
    Skipped(String),
    Failed(String),
}

/// Whether a staged result may be persisted by a partial flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flushability {
    /// Safe to write on any flush
    Incremental,
    /// Written only by the final forced flush
    FinalOnly,
}

impl TaskResult {
    pub fn success(value: impl Into<String>) -> Self {
        Self::Success(value.into())
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Only a non-empty, non-placeholder success is flushable incrementally.
    pub fn flushability(&self) -> Flushability {
        match self {
            Self::Success(value) if !value.trim().is_empty() && !is_placeholder(value) => {
                Flushability::Incremental
            }
            _ => Flushability::FinalOnly,
        }
    }

    /// Text written into the result column of the table.
    pub fn cell_value(&self) -> String {
        match self {
            Self::Success(value) => value.clone(),
            Self::Skipped(reason) => format!("skipped: {reason}"),
            Self::Failed(reason) => format!("failed: {reason}"),
        }
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(f, "success({value})"),
            Self::Skipped(reason) => write!(f, "skipped({reason})"),
            Self::Failed(reason) => write!(f, "failed({reason})"),
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
