// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rr-core: domain types for the record resolver

pub mod clock;
pub mod config;
pub mod isbn;
pub mod result;
pub mod stats;
pub mod task;
pub mod validity;

pub use clock::{Clock, SystemClock};
pub use config::{
    ColumnConfig, ConfigError, FlushPolicy, KeyFormat, ResolverConfig, SaveConfig, SessionConfig,
};
pub use result::{Flushability, TaskResult, PLACEHOLDER_PREFIXES};
pub use stats::{format_elapsed, RunStatistics, RunSummary};
pub use task::{Task, TaskIndex};
pub use validity::{is_placeholder, ValidityPredicate};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
