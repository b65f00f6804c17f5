// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rr status <table>` - Count records by state

use anyhow::{Context, Result};
use clap::Args;
use rr_engine::ResumeFilter;
use rr_storage::{open_store, CheckpointStore};
use std::path::PathBuf;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    /// Table file (.csv or .json)
    pub table: PathBuf,

    /// Config file (default: $RR_CONFIG, ./rr.toml, then the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn handle(args: StatusArgs, format: OutputFormat) -> Result<()> {
    let loaded = crate::config_file::load(args.config.as_deref())?;
    let config = loaded.config;

    let store = open_store(&args.table, config.columns.clone())?;
    let records = store
        .load()
        .with_context(|| format!("failed to read {}", args.table.display()))?;
    let filter = ResumeFilter::new(config.validity_predicate()?, config.key_format);

    let status = filter.status(&records);
    output::print(&status, format, output::format_status)
}
