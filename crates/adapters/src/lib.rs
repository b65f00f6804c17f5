// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the remote lookup service

pub mod session;
pub mod traced;

pub use session::{
    classify, is_fatal_message, Credentials, FailureKind, HttpSessionAdapter, Page,
    SessionAdapter, SessionError, FATAL_MARKERS,
};
pub use traced::TracedSession;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use session::{FakeSessionAdapter, SessionCall, Step};
