// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusive per-table run lock.

use crate::store::StoreError;
use fs2::FileExt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Held for the duration of a run so two runs never write the same table.
///
/// The lock is released when this value is dropped.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    file: File,
}

impl RunLock {
    /// Lock `<table>.lock` next to the table, failing fast if another run holds it.
    pub fn acquire(table: &Path) -> Result<Self, StoreError> {
        let mut name = table.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".lock");
        let path = table.with_file_name(name);

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;
        if file.try_lock_exclusive().is_err() {
            return Err(StoreError::Locked(path));
        }

        // Write PID (truncate now that we hold the lock)
        let mut file = file;
        file.set_len(0).map_err(|e| StoreError::io(&path, e))?;
        writeln!(file, "{}", std::process::id()).map_err(|e| StoreError::io(&path, e))?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
