// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote lookup sessions

mod classify;
mod http;

pub use classify::{classify, is_fatal_message, FailureKind, FATAL_MARKERS};
pub use http::{Credentials, HttpSessionAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSessionAdapter, SessionCall, Step};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from session operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("launch failed: {0}")]
    LaunchFailed(String),
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("session logged out")]
    LoggedOut,
    #[error("disconnected: {0}")]
    Disconnected(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
}

/// What the service is currently showing for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Key the page was rendered for, when the page echoes it
    pub query: Option<String>,
    /// Extracted result value
    pub value: Option<String>,
}

impl Page {
    /// True when the page was rendered for `key` (not a stale earlier query).
    pub fn reflects(&self, key: &str) -> bool {
        self.query
            .as_deref()
            .is_some_and(|q| q.trim().eq_ignore_ascii_case(key.trim()))
    }
}

/// Adapter for a logged-in session against the lookup service.
///
/// A session is the unit of isolation: its own cookies, login state, and
/// current page. Sessions are addressed by the id returned from [`open`].
///
/// [`open`]: SessionAdapter::open
#[async_trait]
pub trait SessionAdapter: Clone + Send + Sync + 'static {
    /// Launch a fresh session; returns its id
    async fn open(&self, name: &str) -> Result<String, SessionError>;

    /// Authenticate the session
    async fn login(&self, id: &str) -> Result<(), SessionError>;

    /// Submit a lookup for `key`
    async fn submit(&self, id: &str, key: &str) -> Result<(), SessionError>;

    /// Read the page the session is currently showing
    async fn capture(&self, id: &str) -> Result<Page, SessionError>;

    /// Tear the session down. Closing an unknown session is not an error.
    async fn close(&self, id: &str) -> Result<(), SessionError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
