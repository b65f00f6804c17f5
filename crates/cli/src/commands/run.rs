// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rr run <table>` - Resolve every pending record of a table

use anyhow::{Context, Result};
use clap::Args;
use rr_adapters::{Credentials, HttpSessionAdapter, TracedSession};
use rr_core::{ResolverConfig, SaveConfig};
use rr_engine::Resolver;
use rr_storage::{open_store, RunLock};
use std::path::PathBuf;

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

/// Conventional exit code for termination by SIGINT
const INTERRUPTED: i32 = 130;

#[derive(Args)]
pub struct RunArgs {
    /// Table file (.csv or .json)
    pub table: PathBuf,

    /// Config file (default: $RR_CONFIG, ./rr.toml, then the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of concurrent sessions
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Attempts per record in each pass
    #[arg(long)]
    pub retry_times: Option<u32>,

    /// Records dispatched per chunk (default: all at once)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Save results only once, when the run ends
    #[arg(long)]
    pub final_only: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut ResolverConfig) {
        if let Some(n) = self.max_concurrent {
            config.max_concurrent = n;
        }
        if let Some(n) = self.retry_times {
            config.retry_times = n;
        }
        if let Some(n) = self.chunk_size {
            config.chunk_size = Some(n);
        }
        if self.final_only {
            config.save = SaveConfig::FinalOnly;
        }
    }
}

fn credentials() -> Result<Credentials> {
    let username = crate::env::username().context("RR_USERNAME is not set")?;
    let password = crate::env::password().context("RR_PASSWORD is not set")?;
    Ok(Credentials { username, password })
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    let _log_guard = crate::logging::init(args.log_file.as_deref())?;

    let loaded = crate::config_file::load(args.config.as_deref())?;
    let mut config = loaded.config;
    args.apply(&mut config);
    config.validate()?;
    if let Some(path) = &loaded.source {
        tracing::debug!(config = %path.display(), "loaded config");
    }

    let session = config
        .session
        .clone()
        .context("config has no [session] section")?;
    let adapter = HttpSessionAdapter::new(session, credentials()?, config.request_timeout())
        .context("invalid [session] pattern")?;

    let _lock = RunLock::acquire(&args.table)?;
    let store = open_store(&args.table, config.columns.clone())?;

    let resolver = Resolver::new(TracedSession::new(adapter), store, config);
    let summary = tokio::select! {
        result = resolver.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            // Dropping the run saves whatever is buffered
            tracing::warn!("interrupted");
            return Err(ExitError::new(INTERRUPTED, "interrupted; buffered results saved").into());
        }
    };

    output::print(&summary, format, output::format_summary)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
