// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rr config` - Validate and print the effective configuration

use anyhow::Result;
use clap::Args;
use rr_core::ResolverConfig;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Args)]
pub struct ConfigArgs {
    /// Config file (default: $RR_CONFIG, ./rr.toml, then the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn handle(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let loaded = crate::config_file::load(args.config.as_deref())?;
    loaded.config.validate()?;

    match format {
        OutputFormat::Text => {
            match &loaded.source {
                Some(path) => println!("# {}", path.display()),
                None => println!("# built-in defaults"),
            }
            print!("{}", render_toml(&loaded.config)?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&loaded.config)?);
        }
    }
    Ok(())
}

fn render_toml(config: &ResolverConfig) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
