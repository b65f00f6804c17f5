// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Record resolver engine

mod buffer;
mod error;
mod pool;
mod resume;
mod runner;
mod scheduler;
mod worker;

#[cfg(test)]
mod test_helpers;

pub use buffer::{FlushOutcome, ResultBuffer};
pub use error::{PoolError, RunError};
pub use pool::WorkerPool;
pub use resume::{ResumeFilter, ResumePlan, TableStatus};
pub use runner::Resolver;
pub use scheduler::{SchedulerSettings, TaskScheduler};
pub use worker::{Resolution, SessionWorker, WorkerSettings};
