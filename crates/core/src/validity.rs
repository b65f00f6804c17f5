// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validity predicate deciding whether a stored value is already resolved.
//!
//! Cells are modelled as `Option<&str>`: `None` is an empty cell. A value is
//! valid when it is non-blank, is not a placeholder written by an earlier
//! failed or skipped attempt, and (if configured) matches the expected shape.

use crate::result::PLACEHOLDER_PREFIXES;
use regex::Regex;

/// Returns true when `value` starts with one of [`PLACEHOLDER_PREFIXES`].
pub fn is_placeholder(value: &str) -> bool {
    let lowered = value.trim().to_ascii_lowercase();
    PLACEHOLDER_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Pure check applied to every stored value before scheduling.
#[derive(Debug, Clone, Default)]
pub struct ValidityPredicate {
    shape: Option<Regex>,
}

impl ValidityPredicate {
    /// Predicate with no shape constraint
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicate that additionally requires values to match `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            shape: Some(Regex::new(pattern)?),
        })
    }

    pub fn is_valid(&self, value: Option<&str>) -> bool {
        let Some(value) = value.map(str::trim) else {
            return false;
        };
        if value.is_empty() || is_placeholder(value) {
            return false;
        }
        match &self.shape {
            Some(shape) => shape.is_match(value),
            None => true,
        }
    }
}

#[cfg(test)]
#[path = "validity_tests.rs"]
mod tests;
