// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run orchestration: resume, start the pool, schedule, checkpoint.

use crate::buffer::{FlushOutcome, ResultBuffer};
use crate::error::RunError;
use crate::pool::WorkerPool;
use crate::resume::ResumeFilter;
use crate::scheduler::{SchedulerSettings, TaskScheduler};
use crate::worker::WorkerSettings;
use rr_adapters::SessionAdapter;
use rr_core::{format_elapsed, Clock, ResolverConfig, RunStatistics, RunSummary, SystemClock};
use rr_storage::CheckpointStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Forces a final flush when dropped without [`FlushGuard::finish`].
///
/// Covers panics that unwind through the run and cancellation of the run
/// future, e.g. on ctrl-c.
struct FlushGuard<St: CheckpointStore, C: Clock> {
    buffer: Option<Arc<ResultBuffer<St, C>>>,
}

impl<St: CheckpointStore, C: Clock> FlushGuard<St, C> {
    fn new(buffer: Arc<ResultBuffer<St, C>>) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    async fn finish(mut self) -> Result<FlushOutcome, RunError> {
        match self.buffer.take() {
            Some(buffer) => buffer.flush_on_blocking_pool(true).await,
            None => Ok(FlushOutcome::default()),
        }
    }
}

impl<St: CheckpointStore, C: Clock> Drop for FlushGuard<St, C> {
    fn drop(&mut self) {
        let Some(buffer) = self.buffer.take() else {
            return;
        };
        match buffer.maybe_flush(true) {
            Ok(outcome) if outcome.written > 0 => {
                tracing::warn!(written = outcome.written, "saved buffered results on early exit")
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "could not save buffered results on early exit"),
        }
    }
}

/// Resolves every pending record of one table.
pub struct Resolver<S, St, C = SystemClock> {
    adapter: S,
    store: St,
    config: ResolverConfig,
    clock: C,
}

impl<S: SessionAdapter, St: CheckpointStore> Resolver<S, St, SystemClock> {
    pub fn new(adapter: S, store: St, config: ResolverConfig) -> Self {
        Self::with_clock(adapter, store, config, SystemClock)
    }
}

impl<S: SessionAdapter, St: CheckpointStore, C: Clock> Resolver<S, St, C> {
    pub fn with_clock(adapter: S, store: St, config: ResolverConfig, clock: C) -> Self {
        Self {
            adapter,
            store,
            config,
            clock,
        }
    }

    /// Run to completion and return the summary.
    ///
    /// Every buffered result is written before this returns, including on
    /// error. If nothing is pending no session is started.
    pub async fn run(self) -> Result<RunSummary, RunError> {
        let stats = Arc::new(RunStatistics::new());
        let span = tracing::info_span!("run", run_id = %stats.run_id());
        self.run_inner(stats).instrument(span).await
    }

    async fn run_inner(self, stats: Arc<RunStatistics>) -> Result<RunSummary, RunError> {
        let started = Instant::now();
        let Self {
            adapter,
            store,
            config,
            clock,
        } = self;
        config.validate()?;

        let records = store.load()?;
        let validity = config.validity_predicate()?;
        let filter = ResumeFilter::new(validity.clone(), config.key_format);
        let plan = filter.plan(&records);
        stats.add_total(plan.total);
        stats.add_pre_skipped(plan.already_resolved);
        tracing::info!(
            store = %store.location(),
            total = plan.total,
            already_resolved = plan.already_resolved,
            pending = plan.pending.len(),
            "loaded table"
        );
        if plan.pending.is_empty() {
            tracing::info!("nothing to resolve");
            return Ok(stats.summary(started.elapsed()));
        }

        let buffer = Arc::new(ResultBuffer::new(store, config.flush_policy(), clock));
        let guard = FlushGuard::new(Arc::clone(&buffer));

        let pool = WorkerPool::start(
            adapter,
            WorkerSettings::from_config(&config),
            config.max_concurrent,
        )
        .await?;
        let pool = Arc::new(pool);

        let scheduler = TaskScheduler::new(
            Arc::clone(&pool),
            Arc::clone(&buffer),
            Arc::clone(&stats),
            SchedulerSettings::from_config(&config),
        )
        .with_validity(validity);
        let outcome = scheduler.run(plan.pending).await;
        pool.close_all().await;
        let flushed = guard.finish().await;

        outcome?;
        let flushed = flushed?;
        let summary = stats.summary(started.elapsed());
        tracing::info!(
            success = summary.success,
            failed = summary.failed,
            skipped = summary.skipped,
            restarts = summary.restarts,
            final_writes = flushed.written,
            elapsed = %format_elapsed(started.elapsed()),
            "run finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
