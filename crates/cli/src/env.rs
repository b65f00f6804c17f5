// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

// --- Configuration ---

/// Explicit config file path from `RR_CONFIG`
pub fn config_path() -> Option<PathBuf> {
    non_empty("RR_CONFIG").map(PathBuf::from)
}

/// `<config dir>/rr/rr.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rr").join("rr.toml"))
}

// --- Credentials ---

pub fn username() -> Option<String> {
    non_empty("RR_USERNAME")
}

pub fn password() -> Option<String> {
    non_empty("RR_PASSWORD")
}

// --- Logging ---

/// Log filter: `RR_LOG` > `RUST_LOG` > `info`
pub fn log_filter() -> String {
    non_empty("RR_LOG")
        .or_else(|| non_empty("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string())
}
