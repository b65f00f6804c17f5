// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic file replacement for checkpoint writes.
//!
//! Every store write is a full snapshot that replaces the live file:
//!
//! ```text
//! serialize snapshot
//!   write to <file>.tmp
//!   fsync <file>.tmp        (data durable)
//!   rename → <file>         (atomic swap, readers see old or new, never half)
//!   fsync directory         (rename durable)
//! ```
//!
//! The `CheckpointWriter` trait abstracts the I/O so ordering and crash
//! scenarios can be tested with an injecting fake.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from checkpoint I/O
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("checkpoint failed: {0}")]
    Failed(String),
}

/// Trait abstracting checkpoint I/O for testability.
pub trait CheckpointWriter: Send + Sync + 'static {
    /// Write snapshot bytes to a temporary file.
    fn write_tmp(&self, path: &Path, data: &[u8]) -> Result<(), CheckpointError>;

    /// Fsync a file to ensure data is durable.
    fn fsync_file(&self, path: &Path) -> Result<(), CheckpointError>;

    /// Atomically rename tmp file over the live path.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), CheckpointError>;

    /// Fsync directory to make rename durable.
    fn fsync_dir(&self, path: &Path) -> Result<(), CheckpointError>;
}

/// Production writer using real filesystem operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsCheckpointWriter;

impl CheckpointWriter for FsCheckpointWriter {
    fn write_tmp(&self, path: &Path, data: &[u8]) -> Result<(), CheckpointError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(data)?;
        Ok(())
    }

    fn fsync_file(&self, path: &Path) -> Result<(), CheckpointError> {
        let file = File::open(path)?;
        file.sync_all()?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), CheckpointError> {
        std::fs::rename(from, to)?;
        Ok(())
    }

    fn fsync_dir(&self, path: &Path) -> Result<(), CheckpointError> {
        let dir = File::open(path)?;
        dir.sync_all()?;
        Ok(())
    }
}

/// Temporary sibling used while writing `path` (`table.csv` → `table.csv.tmp`).
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `data` atomically.
///
/// On error the live file is untouched; a stale `.tmp` may be left behind and
/// is overwritten by the next write.
pub fn write_atomic<W: CheckpointWriter + ?Sized>(
    writer: &W,
    path: &Path,
    data: &[u8],
) -> Result<(), CheckpointError> {
    let tmp = tmp_path(path);

    writer.write_tmp(&tmp, data)?;
    writer.fsync_file(&tmp)?;
    writer.rename(&tmp, path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    writer.fsync_dir(dir)?;

    tracing::trace!(path = %path.display(), bytes = data.len(), "checkpoint written");
    Ok(())
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
