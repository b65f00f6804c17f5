// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the resolver engine

use rr_core::ConfigError;
use rr_storage::StoreError;
use thiserror::Error;

/// Errors starting the worker pool
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("no session worker could be started ({requested} requested)")]
    NoWorkers { requested: usize },
}

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("task panicked: {0}")]
    TaskPanicked(String),
}
