// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use rr_core::{ResolverConfig, SaveConfig};

/// Config with no backoff and short timeouts
pub(crate) fn fast_config(max_concurrent: usize) -> ResolverConfig {
    ResolverConfig {
        max_concurrent,
        retry_times: 3,
        min_delay_secs: 0.0,
        max_delay_secs: 0.0,
        request_timeout_secs: 1.0,
        session_startup_timeout_secs: 1.0,
        navigation_timeout_secs: 1.0,
        poll_interval_ms: 10,
        retry_settle_secs: 0.0,
        ..ResolverConfig::default()
    }
}

pub(crate) fn final_only(config: ResolverConfig) -> ResolverConfig {
    ResolverConfig {
        save: SaveConfig::FinalOnly,
        ..config
    }
}

/// `k0`, `k1`, ... `k{n-1}`
pub(crate) fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("k{i}")).collect()
}
