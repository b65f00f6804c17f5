// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake session adapter for testing
#![allow(clippy::panic)]

use super::{Page, SessionAdapter, SessionError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// Recorded session call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    Open { name: String },
    Login { id: String },
    Submit { id: String, key: String },
    Capture { id: String },
    Close { id: String },
}

/// Scripted behavior for one `submit` of a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Page shows `key` with this value
    Value(String),
    /// Request times out
    Timeout,
    /// Ordinary request failure
    Error(String),
    /// Session dies; the message should carry a fatal marker
    Fatal(String),
    /// Session is bounced to the login page
    LoggedOut,
    /// Page keeps showing the previous query
    Stale,
    /// Panic inside the adapter
    Panic,
}

#[derive(Debug, Clone)]
struct FakeSession {
    alive: bool,
    logged_in: bool,
    page: Page,
}

#[derive(Default)]
struct FakeState {
    sessions: HashMap<String, FakeSession>,
    calls: Vec<SessionCall>,
    next_id: u64,
    scripts: HashMap<String, VecDeque<Step>>,
    fallback: HashMap<String, Step>,
    open_failures: usize,
    login_failures: usize,
    latency: Duration,
    in_flight: usize,
    max_in_flight: usize,
}

/// Fake session adapter for testing.
///
/// Unscripted keys resolve to `resolved:{key}`. Scripts are consumed one step
/// per `submit`; once a key's script runs out its fallback step (if any) is
/// used, then the default value.
#[derive(Clone, Default)]
pub struct FakeSessionAdapter {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeSessionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue steps for successive submits of `key`
    pub fn script(&self, key: &str, steps: impl IntoIterator<Item = Step>) {
        self.inner
            .lock()
            .scripts
            .entry(key.to_string())
            .or_default()
            .extend(steps);
    }

    /// Use `step` for every submit of `key` once its script is exhausted
    pub fn always(&self, key: &str, step: Step) {
        self.inner.lock().fallback.insert(key.to_string(), step);
    }

    /// Make the next `n` opens fail
    pub fn fail_next_opens(&self, n: usize) {
        self.inner.lock().open_failures = n;
    }

    /// Make the next `n` logins fail
    pub fn fail_next_logins(&self, n: usize) {
        self.inner.lock().login_failures = n;
    }

    /// Delay applied inside every submit
    pub fn set_latency(&self, latency: Duration) {
        self.inner.lock().latency = latency;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SessionCall> {
        self.inner.lock().calls.clone()
    }

    /// Keys passed to `submit`, in call order
    pub fn submitted_keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                SessionCall::Submit { key, .. } => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    /// Highest number of submits observed in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.inner.lock().max_in_flight
    }

    /// Ids of sessions that are open and not closed
    pub fn live_sessions(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .inner
            .lock()
            .sessions
            .iter()
            .filter(|(_, s)| s.alive)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Log every live session out, as if the site expired them
    pub fn expire_logins(&self) {
        for session in self.inner.lock().sessions.values_mut() {
            session.logged_in = false;
        }
    }

    fn next_step(state: &mut FakeState, key: &str) -> Step {
        if let Some(step) = state.scripts.get_mut(key).and_then(|q| q.pop_front()) {
            return step;
        }
        state
            .fallback
            .get(key)
            .cloned()
            .unwrap_or_else(|| Step::Value(format!("resolved:{key}")))
    }
}

#[async_trait]
impl SessionAdapter for FakeSessionAdapter {
    async fn open(&self, name: &str) -> Result<String, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::Open {
            name: name.to_string(),
        });
        if inner.open_failures > 0 {
            inner.open_failures -= 1;
            return Err(SessionError::LaunchFailed("injected launch failure".to_string()));
        }
        inner.next_id += 1;
        let id = format!("{name}-{}", inner.next_id);
        inner.sessions.insert(
            id.clone(),
            FakeSession {
                alive: true,
                logged_in: false,
                page: Page::default(),
            },
        );
        Ok(id)
    }

    async fn login(&self, id: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::Login { id: id.to_string() });
        if inner.login_failures > 0 {
            inner.login_failures -= 1;
            return Err(SessionError::LoginFailed("injected login failure".to_string()));
        }
        match inner.sessions.get_mut(id) {
            Some(session) if session.alive => {
                session.logged_in = true;
                Ok(())
            }
            _ => Err(SessionError::NotFound(id.to_string())),
        }
    }

    async fn submit(&self, id: &str, key: &str) -> Result<(), SessionError> {
        let latency = {
            let mut inner = self.inner.lock();
            inner.calls.push(SessionCall::Submit {
                id: id.to_string(),
                key: key.to_string(),
            });
            inner.in_flight += 1;
            inner.max_in_flight = inner.max_in_flight.max(inner.in_flight);
            inner.latency
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut inner = self.inner.lock();
        inner.in_flight -= 1;
        let logged_in = match inner.sessions.get(id) {
            Some(session) if session.alive => session.logged_in,
            _ => return Err(SessionError::NotFound(id.to_string())),
        };
        if !logged_in {
            return Err(SessionError::LoggedOut);
        }

        let step = Self::next_step(&mut inner, key);
        let Some(session) = inner.sessions.get_mut(id) else {
            return Err(SessionError::NotFound(id.to_string()));
        };
        match step {
            Step::Value(value) => {
                session.page = Page {
                    query: Some(key.to_string()),
                    value: Some(value),
                };
                Ok(())
            }
            Step::Timeout => Err(SessionError::Timeout("request timed out".to_string())),
            Step::Error(msg) => Err(SessionError::RequestFailed(msg)),
            Step::Fatal(msg) => {
                session.alive = false;
                Err(SessionError::RequestFailed(msg))
            }
            Step::LoggedOut => {
                session.logged_in = false;
                Err(SessionError::LoggedOut)
            }
            Step::Stale => Ok(()),
            Step::Panic => {
                drop(inner);
                panic!("injected fault while resolving {key}");
            }
        }
    }

    async fn capture(&self, id: &str) -> Result<Page, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::Capture { id: id.to_string() });
        match inner.sessions.get(id) {
            Some(session) if session.alive => Ok(session.page.clone()),
            _ => Err(SessionError::NotFound(id.to_string())),
        }
    }

    async fn close(&self, id: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::Close { id: id.to_string() });
        if let Some(session) = inner.sessions.get_mut(id) {
            session.alive = false;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
