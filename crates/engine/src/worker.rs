// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session worker: one logged-in session that resolves keys one at a time.

use rand::Rng;
use rr_adapters::{classify, FailureKind, SessionAdapter, SessionError};
use rr_core::ResolverConfig;
use std::time::Duration;
use tokio::sync::Mutex;

/// Timing knobs for a worker, derived from [`ResolverConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerSettings {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub request_timeout: Duration,
    pub startup_timeout: Duration,
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
}

impl WorkerSettings {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            min_delay: config.min_delay(),
            max_delay: config.max_delay(),
            request_timeout: config.request_timeout(),
            startup_timeout: config.session_startup_timeout(),
            navigation_timeout: config.navigation_timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Random backoff in `[min_delay, max_delay]`
    fn jitter(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let secs = rand::rng()
            .random_range(self.min_delay.as_secs_f64()..=self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

/// Outcome of one `resolve` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    /// Budget ran out on transient failures
    Retryable { reason: String },
    /// The session died and was replaced; the caller should re-dispatch
    FatalRestart { attempts_used: u32, error: String },
}

#[derive(Debug, Default)]
struct WorkerState {
    handle: Option<String>,
    logged_in: bool,
}

pub struct SessionWorker<S> {
    id: usize,
    name: String,
    adapter: S,
    settings: WorkerSettings,
    state: Mutex<WorkerState>,
}

impl<S: SessionAdapter> SessionWorker<S> {
    pub fn new(id: usize, adapter: S, settings: WorkerSettings) -> Self {
        Self {
            id,
            name: format!("worker-{id}"),
            adapter,
            settings,
            state: Mutex::new(WorkerState::default()),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Open and log in. On failure any partial session is closed.
    pub async fn start(&self) -> bool {
        let mut state = self.state.lock().await;
        match self.ensure_session(&mut state).await {
            Ok(()) => {
                tracing::info!(worker = self.id, "worker ready");
                true
            }
            Err(e) => {
                tracing::warn!(worker = self.id, error = %e, "worker failed to start");
                self.teardown(&mut state).await;
                false
            }
        }
    }

    /// Resolve `key` using at most `budget` attempts.
    pub async fn resolve(&self, key: &str, budget: u32) -> Resolution {
        let mut state = self.state.lock().await;
        let mut last_error = None;

        for attempt in 1..=budget {
            if let Err(e) = self.ensure_session(&mut state).await {
                tracing::warn!(
                    worker = self.id,
                    key,
                    attempt,
                    error = %e,
                    "session relaunch failed"
                );
                self.teardown(&mut state).await;
                return Resolution::FatalRestart {
                    attempts_used: attempt,
                    error: e.to_string(),
                };
            }
            let Some(id) = state.handle.clone() else {
                continue;
            };

            let error = match self.attempt(&id, key).await {
                Ok(value) => {
                    tracing::debug!(worker = self.id, key, attempt, "resolved");
                    return Resolution::Resolved(value);
                }
                Err(e) => e,
            };

            match classify(&error) {
                FailureKind::Fatal => {
                    tracing::warn!(
                        worker = self.id,
                        key,
                        attempt,
                        error = %error,
                        "session lost, restarting"
                    );
                    self.teardown(&mut state).await;
                    if let Err(e) = self.ensure_session(&mut state).await {
                        tracing::warn!(
                            worker = self.id,
                            error = %e,
                            "relaunch failed, will retry on next task"
                        );
                        self.teardown(&mut state).await;
                    }
                    return Resolution::FatalRestart {
                        attempts_used: attempt,
                        error: error.to_string(),
                    };
                }
                FailureKind::LoggedOut => {
                    tracing::info!(
                        worker = self.id,
                        key,
                        attempt,
                        "logged out, will log in again"
                    );
                    state.logged_in = false;
                }
                FailureKind::Transient => {
                    tracing::info!(
                        worker = self.id,
                        key,
                        attempt,
                        error = %error,
                        "attempt failed"
                    );
                }
            }
            last_error = Some(error);
            if attempt < budget {
                tokio::time::sleep(self.settings.jitter()).await;
            }
        }

        if let Some(e) = last_error {
            tracing::warn!(worker = self.id, key, budget, error = %e, "retry limit exceeded");
        }
        Resolution::Retryable {
            reason: "retry limit exceeded".to_string(),
        }
    }

    /// Close the session. Safe to call more than once.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        self.teardown(&mut state).await;
    }

    async fn ensure_session(&self, state: &mut WorkerState) -> Result<(), SessionError> {
        if state.handle.is_some() && state.logged_in {
            return Ok(());
        }
        let startup = async {
            let id = match &state.handle {
                Some(id) => id.clone(),
                None => {
                    let id = self.adapter.open(&self.name).await?;
                    state.handle = Some(id.clone());
                    id
                }
            };
            self.adapter.login(&id).await?;
            state.logged_in = true;
            Ok::<(), SessionError>(())
        };
        tokio::time::timeout(self.settings.startup_timeout, startup)
            .await
            .map_err(|_| SessionError::Timeout("session startup".to_string()))?
    }

    /// Submit `key` and wait for a page rendered for it.
    async fn attempt(&self, id: &str, key: &str) -> Result<String, SessionError> {
        tokio::time::timeout(self.settings.request_timeout, self.adapter.submit(id, key))
            .await
            .map_err(|_| SessionError::Timeout("request".to_string()))??;

        let wait = async {
            loop {
                let page = self.adapter.capture(id).await?;
                if page.reflects(key) {
                    let value = page.value.unwrap_or_default();
                    return Ok::<_, SessionError>(value.trim().to_string());
                }
                tokio::time::sleep(self.settings.poll_interval).await;
            }
        };
        tokio::time::timeout(self.settings.navigation_timeout, wait)
            .await
            .map_err(|_| SessionError::Timeout(format!("page never showed {key}")))?
    }

    async fn teardown(&self, state: &mut WorkerState) {
        if let Some(id) = state.handle.take() {
            if let Err(e) = self.adapter.close(&id).await {
                tracing::debug!(worker = self.id, error = %e, "close failed");
            }
        }
        state.logged_in = false;
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
