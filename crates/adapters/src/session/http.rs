// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP session adapter: one cookie-carrying client per session.

use super::{Page, SessionAdapter, SessionError};
use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;
use rr_core::SessionConfig;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Login credentials for the lookup service
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

struct HttpSession {
    client: reqwest::Client,
    page: Page,
}

struct Inner {
    config: SessionConfig,
    credentials: Credentials,
    request_timeout: Duration,
    echo: Option<Regex>,
    result: Regex,
    sessions: Mutex<HashMap<String, HttpSession>>,
    next_id: AtomicU64,
}

/// Session adapter that talks to a form-based lookup site over HTTP.
#[derive(Clone)]
pub struct HttpSessionAdapter {
    inner: Arc<Inner>,
}

impl HttpSessionAdapter {
    pub fn new(
        config: SessionConfig,
        credentials: Credentials,
        request_timeout: Duration,
    ) -> Result<Self, regex::Error> {
        let echo = config.echo_pattern.as_deref().map(Regex::new).transpose()?;
        let result = Regex::new(&config.result_pattern)?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                credentials,
                request_timeout,
                echo,
                result,
                sessions: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        })
    }

    fn client(&self, id: &str) -> Result<reqwest::Client, SessionError> {
        self.inner
            .sessions
            .lock()
            .get(id)
            .map(|s| s.client.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.inner.config.base_url, path)
    }

    fn shows_login_form(&self, body: &str) -> bool {
        self.inner
            .config
            .logged_out_marker
            .as_deref()
            .is_some_and(|marker| body.contains(marker))
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Extract the echoed query and result value from a response body.
///
/// Without an echo pattern the response is taken to be for `key`, since an
/// HTTP response always answers the request that produced it.
pub(crate) fn parse_page(body: &str, key: &str, echo: Option<&Regex>, result: &Regex) -> Page {
    let query = match echo {
        Some(re) => re
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string()),
        None => Some(key.to_string()),
    };
    let value = result
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string());
    Page { query, value }
}

fn request_error(e: reqwest::Error) -> SessionError {
    if e.is_timeout() {
        SessionError::Timeout(e.to_string())
    } else if e.is_connect() {
        SessionError::Disconnected(e.to_string())
    } else {
        SessionError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl SessionAdapter for HttpSessionAdapter {
    async fn open(&self, name: &str) -> Result<String, SessionError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(self.inner.request_timeout)
            .build()
            .map_err(|e| SessionError::LaunchFailed(e.to_string()))?;
        let n = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let id = format!("{name}-{n}");
        self.inner.sessions.lock().insert(
            id.clone(),
            HttpSession {
                client,
                page: Page::default(),
            },
        );
        Ok(id)
    }

    async fn login(&self, id: &str) -> Result<(), SessionError> {
        let client = self.client(id)?;
        let config = &self.inner.config;
        let creds = &self.inner.credentials;
        let response = client
            .post(self.url(&config.login_path))
            .form(&[
                (config.username_field.as_str(), creds.username.as_str()),
                (config.password_field.as_str(), creds.password.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::LoginFailed(format!("HTTP {status}")));
        }
        let body = response.text().await.map_err(request_error)?;
        if self.shows_login_form(&body) {
            return Err(SessionError::LoginFailed("credentials rejected".to_string()));
        }
        Ok(())
    }

    async fn submit(&self, id: &str, key: &str) -> Result<(), SessionError> {
        let client = self.client(id)?;
        let config = &self.inner.config;
        let response = client
            .get(self.url(&config.query_path))
            .query(&[(config.query_param.as_str(), key)])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SessionError::LoggedOut);
        }
        if !status.is_success() {
            return Err(SessionError::RequestFailed(format!("HTTP {status}")));
        }
        let body = response.text().await.map_err(request_error)?;
        if self.shows_login_form(&body) {
            return Err(SessionError::LoggedOut);
        }

        let page = parse_page(&body, key, self.inner.echo.as_ref(), &self.inner.result);
        match self.inner.sessions.lock().get_mut(id) {
            Some(session) => {
                session.page = page;
                Ok(())
            }
            None => Err(SessionError::NotFound(id.to_string())),
        }
    }

    async fn capture(&self, id: &str) -> Result<Page, SessionError> {
        self.inner
            .sessions
            .lock()
            .get(id)
            .map(|s| s.page.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    async fn close(&self, id: &str) -> Result<(), SessionError> {
        self.inner.sessions.lock().remove(id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
