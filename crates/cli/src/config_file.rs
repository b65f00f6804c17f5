// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating and loading the resolver configuration.

use anyhow::{Context, Result};
use rr_core::ResolverConfig;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "rr.toml";

/// Configuration plus the file it came from (`None` for built-in defaults)
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ResolverConfig,
    pub source: Option<PathBuf>,
}

/// Pick the config file: explicit flag > `RR_CONFIG` > `./rr.toml` > user config.
///
/// Explicit paths are returned even if missing so the load reports them.
/// Implicit locations are used only when the file exists.
fn pick_path(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    implicit: &[Option<PathBuf>],
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if from_env.is_some() {
        return from_env;
    }
    implicit.iter().flatten().find(|p| p.is_file()).cloned()
}

pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let implicit = [Some(PathBuf::from(LOCAL_CONFIG)), crate::env::user_config_path()];
    let source = pick_path(explicit, crate::env::config_path(), &implicit);

    let config = match &source {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    Ok(LoadedConfig { config, source })
}

#[cfg(test)]
#[path = "config_file_tests.rs"]
mod tests;
