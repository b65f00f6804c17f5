// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::session::{Page, SessionAdapter, SessionError};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any SessionAdapter
#[derive(Clone)]
pub struct TracedSession<S> {
    inner: S,
}

impl<S> TracedSession<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SessionAdapter> SessionAdapter for TracedSession<S> {
    async fn open(&self, name: &str) -> Result<String, SessionError> {
        async {
            tracing::info!("launching");
            let start = std::time::Instant::now();
            let result = self.inner.open(name).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(id) => tracing::info!(session_id = id.as_str(), elapsed_ms, "session opened"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "launch failed"),
            }
            result
        }
        .instrument(tracing::info_span!("session.open", name))
        .await
    }

    async fn login(&self, id: &str) -> Result<(), SessionError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.login(id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "logged in"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "login failed"),
            }
            result
        }
        .instrument(tracing::info_span!("session.login", id))
        .await
    }

    async fn submit(&self, id: &str, key: &str) -> Result<(), SessionError> {
        tracing::info_span!("session.submit", id, key).in_scope(|| tracing::debug!("submitting"));
        let start = std::time::Instant::now();
        let result = self.inner.submit(id, key).await;
        if let Err(ref e) = result {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            tracing::warn!(id, key, elapsed_ms, error = %e, "submit failed");
        }
        result
    }

    async fn capture(&self, id: &str) -> Result<Page, SessionError> {
        let result = self.inner.capture(id).await;
        tracing::trace!(id, page = ?result.as_ref().ok(), "captured");
        result
    }

    async fn close(&self, id: &str) -> Result<(), SessionError> {
        let result = self.inner.close(id).await;
        tracing::info_span!("session.close", id).in_scope(|| match &result {
            Ok(()) => tracing::info!("closed"),
            Err(e) => tracing::warn!(error = %e, "close failed (may be expected)"),
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
