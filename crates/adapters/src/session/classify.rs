// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure classification for session errors.

use super::SessionError;

/// Message fragments that mean the session itself is gone.
pub const FATAL_MARKERS: &[&str] = &[
    "target closed",
    "session closed",
    "connection closed",
    "browser has been closed",
    "disconnected",
    "connection refused",
    "connection reset",
    "broken pipe",
    "no such session",
];

/// How a worker should react to a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Back off and retry on the same session
    Transient,
    /// Retry after logging back in
    LoggedOut,
    /// Tear the session down and relaunch it
    Fatal,
}

/// True if `message` carries a session-dead marker (case-insensitive).
pub fn is_fatal_message(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    FATAL_MARKERS.iter().any(|m| lower.contains(m))
}

pub fn classify(error: &SessionError) -> FailureKind {
    match error {
        SessionError::NotFound(_) | SessionError::Disconnected(_) => FailureKind::Fatal,
        SessionError::LoggedOut => FailureKind::LoggedOut,
        SessionError::Timeout(_) => FailureKind::Transient,
        SessionError::LaunchFailed(msg)
        | SessionError::LoginFailed(msg)
        | SessionError::RequestFailed(msg) => {
            if is_fatal_message(msg) {
                FailureKind::Fatal
            } else {
                FailureKind::Transient
            }
        }
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
