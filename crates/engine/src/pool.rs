// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool of session workers with round-robin dispatch.

use crate::error::PoolError;
use crate::worker::{SessionWorker, WorkerSettings};
use rr_adapters::SessionAdapter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;

pub struct WorkerPool<S> {
    workers: Vec<Arc<SessionWorker<S>>>,
    cursor: AtomicUsize,
}

impl<S: SessionAdapter> WorkerPool<S> {
    /// Launch `size` workers concurrently and keep the ones that started.
    pub async fn start(
        adapter: S,
        settings: WorkerSettings,
        size: usize,
    ) -> Result<Self, PoolError> {
        let mut set = JoinSet::new();
        for id in 0..size {
            let worker = Arc::new(SessionWorker::new(id, adapter.clone(), settings.clone()));
            set.spawn(async move {
                let started = worker.start().await;
                (worker, started)
            });
        }

        let mut workers = Vec::with_capacity(size);
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((worker, true)) => workers.push(worker),
                Ok((_, false)) => {}
                Err(e) => tracing::warn!(error = %e, "worker startup task failed"),
            }
        }
        if workers.is_empty() {
            return Err(PoolError::NoWorkers { requested: size });
        }
        workers.sort_by_key(|w| w.id());
        tracing::info!(started = workers.len(), requested = size, "worker pool ready");

        Ok(Self {
            workers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Number of workers that started
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Next worker in strict round-robin order
    pub fn next_worker(&self) -> Arc<SessionWorker<S>> {
        let n = self.cursor.fetch_add(1, Ordering::Relaxed);
        Arc::clone(&self.workers[n % self.workers.len()])
    }

    pub async fn close_all(&self) {
        for worker in &self.workers {
            worker.close().await;
        }
        tracing::debug!(workers = self.workers.len(), "worker pool closed");
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
