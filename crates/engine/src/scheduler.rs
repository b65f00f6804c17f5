// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-pass task scheduler.
//!
//! Pass 1 runs pending tasks in chunks with bounded concurrency and
//! checkpoints after each chunk. Tasks that fail pass 1 are retried once more
//! in pass 2, one settle delay apart per worker slot. A task's final outcome
//! is counted only when it is known, so pass-1 failures are counted after
//! pass 2.

use crate::buffer::ResultBuffer;
use crate::error::RunError;
use crate::pool::WorkerPool;
use crate::worker::Resolution;
use rr_adapters::SessionAdapter;
use rr_core::isbn::is_valid_isbn;
use rr_core::{
    Clock, KeyFormat, ResolverConfig, RunStatistics, Task, TaskResult, ValidityPredicate,
};
use rr_storage::CheckpointStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerSettings {
    pub retry_times: u32,
    pub chunk_size: Option<usize>,
    pub retry_settle: Duration,
    pub key_format: KeyFormat,
}

impl SchedulerSettings {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            retry_times: config.retry_times,
            chunk_size: config.chunk_size,
            retry_settle: config.retry_settle(),
            key_format: config.key_format,
        }
    }
}

/// Everything a spawned task needs to resolve one record
struct Dispatch<S> {
    pool: Arc<WorkerPool<S>>,
    permits: Arc<Semaphore>,
    stats: Arc<RunStatistics>,
    validity: Arc<ValidityPredicate>,
    retry_times: u32,
}

impl<S> Clone for Dispatch<S> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
            permits: Arc::clone(&self.permits),
            stats: Arc::clone(&self.stats),
            validity: Arc::clone(&self.validity),
            retry_times: self.retry_times,
        }
    }
}

impl<S: SessionAdapter> Dispatch<S> {
    /// Resolve `task` on round-robin workers, re-dispatching after fatal restarts.
    ///
    /// The concurrency permit is held until `settle` has elapsed.
    async fn resolve_task(&self, task: &Task, settle: Duration) -> TaskResult {
        let Ok(_permit) = Arc::clone(&self.permits).acquire_owned().await else {
            return TaskResult::failed("scheduler shut down");
        };

        let mut budget = self.retry_times;
        let result = loop {
            if budget == 0 {
                break TaskResult::failed("retry limit exceeded");
            }
            let worker = self.pool.next_worker();
            match worker.resolve(task.key(), budget).await {
                Resolution::Resolved(value) if self.validity.is_valid(Some(value.as_str())) => {
                    break TaskResult::success(value)
                }
                Resolution::Resolved(value) => {
                    tracing::warn!(
                        index = task.index(),
                        key = task.key(),
                        worker = worker.id(),
                        value = %value,
                        "page showed no valid value"
                    );
                    break TaskResult::failed("no valid value");
                }
                Resolution::Retryable { reason } => break TaskResult::failed(reason),
                Resolution::FatalRestart {
                    attempts_used,
                    error,
                } => {
                    self.stats.add_restart();
                    budget = budget.saturating_sub(attempts_used.max(1));
                    tracing::warn!(
                        index = task.index(),
                        key = task.key(),
                        worker = worker.id(),
                        budget,
                        error = %error,
                        "session restarted, re-dispatching"
                    );
                }
            }
        };

        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        result
    }
}

pub struct TaskScheduler<S, St, C> {
    dispatch: Dispatch<S>,
    buffer: Arc<ResultBuffer<St, C>>,
    stats: Arc<RunStatistics>,
    settings: SchedulerSettings,
}

impl<S, St, C> TaskScheduler<S, St, C>
where
    S: SessionAdapter,
    St: CheckpointStore,
    C: Clock,
{
    /// In-flight tasks are bounded by the number of started workers.
    pub fn new(
        pool: Arc<WorkerPool<S>>,
        buffer: Arc<ResultBuffer<St, C>>,
        stats: Arc<RunStatistics>,
        settings: SchedulerSettings,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(pool.size()));
        Self {
            dispatch: Dispatch {
                pool,
                permits,
                stats: Arc::clone(&stats),
                validity: Arc::new(ValidityPredicate::new()),
                retry_times: settings.retry_times,
            },
            buffer,
            stats,
            settings,
        }
    }

    /// Accept a resolved value only if `predicate` holds for it.
    ///
    /// Values the predicate rejects are recorded as failures so the next run
    /// picks them up again. Defaults to rejecting blank and placeholder values.
    pub fn with_validity(mut self, predicate: ValidityPredicate) -> Self {
        self.dispatch.validity = Arc::new(predicate);
        self
    }

    /// Run both passes over `tasks`.
    pub async fn run(&self, tasks: Vec<Task>) -> Result<(), RunError> {
        let failed = self.first_pass(tasks).await?;
        self.retry_pass(failed).await
    }

    /// Result for a task that must not be dispatched
    fn precheck(&self, task: &Task) -> Option<TaskResult> {
        if task.key().is_empty() {
            return Some(TaskResult::skipped("empty key"));
        }
        if self.settings.key_format == KeyFormat::Isbn && !is_valid_isbn(task.key()) {
            return Some(TaskResult::skipped("invalid isbn"));
        }
        None
    }

    fn finish_task(&self, task: &Task, result: TaskResult) {
        self.stats.record(&result);
        self.buffer.stage(task.index(), result);
    }

    async fn first_pass(&self, tasks: Vec<Task>) -> Result<Vec<Task>, RunError> {
        let mut dispatch = Vec::with_capacity(tasks.len());
        for task in tasks {
            match self.precheck(&task) {
                Some(result) => {
                    tracing::debug!(
                        index = task.index(),
                        key = task.key(),
                        %result,
                        "not dispatched"
                    );
                    self.finish_task(&task, result);
                }
                None => dispatch.push(task),
            }
        }
        if dispatch.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = self.settings.chunk_size.unwrap_or(dispatch.len()).max(1);
        let chunks = dispatch.len().div_ceil(chunk_size);
        let mut failed = Vec::new();

        for (n, chunk) in dispatch.chunks(chunk_size).enumerate() {
            let mut set = JoinSet::new();
            for task in chunk {
                let d = self.dispatch.clone();
                let task = task.clone();
                set.spawn(async move {
                    let result = d.resolve_task(&task, Duration::ZERO).await;
                    (task, result)
                });
            }

            while let Some(joined) = set.join_next().await {
                let (task, result) = joined.map_err(task_panicked)?;
                if result.is_failed() {
                    // Counted once pass 2 decides it
                    self.buffer.stage(task.index(), result);
                    failed.push(task);
                } else {
                    self.finish_task(&task, result);
                }
            }

            let flush = Arc::clone(&self.buffer)
                .flush_on_blocking_pool(false)
                .await?;
            tracing::info!(
                chunk = n + 1,
                chunks,
                success = self.stats.success(),
                failed = failed.len(),
                buffered = flush.remaining,
                "chunk complete"
            );
        }
        Ok(failed)
    }

    async fn retry_pass(&self, mut failed: Vec<Task>) -> Result<(), RunError> {
        if failed.is_empty() {
            return Ok(());
        }
        failed.sort_by_key(Task::index);
        self.stats.add_retried(failed.len());
        tracing::info!(tasks = failed.len(), "retrying failed tasks");

        let mut set = JoinSet::new();
        for task in failed {
            let d = self.dispatch.clone();
            let settle = self.settings.retry_settle;
            set.spawn(async move {
                let result = d.resolve_task(&task, settle).await;
                (task, result)
            });
        }

        while let Some(joined) = set.join_next().await {
            let (task, result) = joined.map_err(task_panicked)?;
            if result.is_success() {
                self.stats.add_recovered();
                tracing::info!(index = task.index(), key = task.key(), "recovered on retry");
            } else {
                tracing::warn!(
                    index = task.index(),
                    key = task.key(),
                    %result,
                    "failed after retry"
                );
            }
            self.finish_task(&task, result);
            Arc::clone(&self.buffer)
                .flush_on_blocking_pool(false)
                .await?;
        }
        Ok(())
    }
}

pub(crate) fn task_panicked(e: JoinError) -> RunError {
    if !e.is_panic() {
        return RunError::TaskPanicked(e.to_string());
    }
    let payload = e.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    RunError::TaskPanicked(message)
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
