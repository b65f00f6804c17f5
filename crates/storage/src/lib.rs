// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Checkpoint storage for resolver tables

mod checkpoint;
mod csv_store;
mod json_store;
mod lock;
mod store;

pub use checkpoint::{tmp_path, write_atomic, CheckpointError, CheckpointWriter, FsCheckpointWriter};
pub use csv_store::CsvStore;
pub use json_store::JsonStore;
pub use lock::RunLock;
pub use store::{open_store, CellUpdate, CheckpointStore, Record, StoreError, TableStore};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod memory;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;
