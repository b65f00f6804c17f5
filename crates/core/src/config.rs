// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolver configuration.
//!
//! Loaded from TOML and validated before a run is constructed. Durations are
//! expressed in seconds (fractional allowed) to match how operators tune the
//! lookup site's rate limits.

use crate::validity::ValidityPredicate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("invalid value_pattern: {0}")]
    Pattern(#[from] regex::Error),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// How record keys are interpreted before dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    /// Keys are used as-is after trimming
    #[default]
    Any,
    /// Keys are normalized ISBNs; invalid checksums are skipped
    Isbn,
}

/// When staged results are persisted during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SaveConfig {
    /// Flush after `every_count` resolved results or `every_secs` seconds,
    /// whichever comes first. Zero disables a trigger.
    Incremental {
        #[serde(default = "default_every_count")]
        every_count: usize,
        #[serde(default = "default_every_secs")]
        every_secs: f64,
    },
    /// Persist only once, at the end of the run
    FinalOnly,
}

fn default_every_count() -> usize {
    10
}

fn default_every_secs() -> f64 {
    60.0
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self::Incremental {
            every_count: default_every_count(),
            every_secs: default_every_secs(),
        }
    }
}

/// Flush triggers derived from [`SaveConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushPolicy {
    pub every_count: Option<usize>,
    pub every: Option<Duration>,
}

impl FlushPolicy {
    pub fn final_only() -> Self {
        Self {
            every_count: None,
            every: None,
        }
    }

    pub fn is_final_only(&self) -> bool {
        self.every_count.is_none() && self.every.is_none()
    }
}

/// Table column names holding the key and the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub key: String,
    pub value: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            key: "isbn".to_string(),
            value: "result".to_string(),
        }
    }
}

/// Login-gated lookup site used by the HTTP session adapter.
///
/// Credentials are never part of the file; they come from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub base_url: String,
    pub login_path: String,
    pub query_path: String,
    pub query_param: String,
    pub username_field: String,
    pub password_field: String,
    /// Text that only appears on the login page; seeing it means the session was lost
    pub logged_out_marker: Option<String>,
    /// Regex capturing the key the result page was rendered for
    pub echo_pattern: Option<String>,
    /// Regex whose first capture group is the resolved value
    pub result_pattern: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            login_path: "/login".to_string(),
            query_path: "/search".to_string(),
            query_param: "q".to_string(),
            username_field: "username".to_string(),
            password_field: "password".to_string(),
            logged_out_marker: None,
            echo_pattern: None,
            result_pattern: r#"<td class="result">([^<]*)</td>"#.to_string(),
        }
    }
}

/// Tuning parameters for a resolver run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub max_concurrent: usize,
    pub retry_times: u32,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    pub request_timeout_secs: f64,
    pub session_startup_timeout_secs: f64,
    pub navigation_timeout_secs: f64,
    pub poll_interval_ms: u64,
    pub retry_settle_secs: f64,
    pub chunk_size: Option<usize>,
    pub key_format: KeyFormat,
    pub value_pattern: Option<String>,
    pub save: SaveConfig,
    pub columns: ColumnConfig,
    pub session: Option<SessionConfig>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 3,
            retry_times: 3,
            min_delay_secs: 1.0,
            max_delay_secs: 3.0,
            request_timeout_secs: 30.0,
            session_startup_timeout_secs: 60.0,
            navigation_timeout_secs: 15.0,
            poll_interval_ms: 200,
            retry_settle_secs: 0.5,
            chunk_size: None,
            key_format: KeyFormat::Any,
            value_pattern: None,
            save: SaveConfig::default(),
            columns: ColumnConfig::default(),
            session: None,
        }
    }
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("must be a non-negative number, got {value}")));
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, format!("must be greater than 0, got {value}")));
    }
    Ok(())
}

impl ResolverConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constraint on the tuning parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent < 1 {
            return Err(invalid("max_concurrent", "must be at least 1"));
        }
        if self.retry_times < 1 {
            return Err(invalid("retry_times", "must be at least 1"));
        }
        check_non_negative("min_delay_secs", self.min_delay_secs)?;
        check_non_negative("max_delay_secs", self.max_delay_secs)?;
        if self.min_delay_secs > self.max_delay_secs {
            return Err(invalid(
                "min_delay_secs",
                format!(
                    "must not exceed max_delay_secs ({} > {})",
                    self.min_delay_secs, self.max_delay_secs
                ),
            ));
        }
        check_positive("request_timeout_secs", self.request_timeout_secs)?;
        check_positive(
            "session_startup_timeout_secs",
            self.session_startup_timeout_secs,
        )?;
        check_positive("navigation_timeout_secs", self.navigation_timeout_secs)?;
        if self.poll_interval_ms == 0 {
            return Err(invalid("poll_interval_ms", "must be at least 1"));
        }
        check_non_negative("retry_settle_secs", self.retry_settle_secs)?;
        if self.chunk_size == Some(0) {
            return Err(invalid("chunk_size", "must be at least 1 when set"));
        }
        if let SaveConfig::Incremental {
            every_count,
            every_secs,
        } = &self.save
        {
            check_non_negative("save.every_secs", *every_secs)?;
            if *every_count == 0 && *every_secs == 0.0 {
                return Err(invalid(
                    "save",
                    "incremental mode with both triggers disabled never saves before the end; \
                     use mode = \"final-only\" if that is intended",
                ));
            }
        }
        if self.columns.key.is_empty() || self.columns.value.is_empty() {
            return Err(invalid("columns", "column names must not be empty"));
        }
        if self.columns.key == self.columns.value {
            return Err(invalid("columns", "key and value columns must differ"));
        }
        self.validity_predicate()?;
        Ok(())
    }

    pub fn flush_policy(&self) -> FlushPolicy {
        match &self.save {
            SaveConfig::Incremental {
                every_count,
                every_secs,
            } => FlushPolicy {
                every_count: (*every_count > 0).then_some(*every_count),
                every: (*every_secs > 0.0).then(|| secs(*every_secs)),
            },
            SaveConfig::FinalOnly => FlushPolicy::final_only(),
        }
    }

    pub fn validity_predicate(&self) -> Result<ValidityPredicate, ConfigError> {
        match &self.value_pattern {
            Some(pattern) => Ok(ValidityPredicate::with_pattern(pattern)?),
            None => Ok(ValidityPredicate::new()),
        }
    }

    pub fn min_delay(&self) -> Duration {
        secs(self.min_delay_secs)
    }

    pub fn max_delay(&self) -> Duration {
        secs(self.max_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        secs(self.request_timeout_secs)
    }

    pub fn session_startup_timeout(&self) -> Duration {
        secs(self.session_startup_timeout_secs)
    }

    pub fn navigation_timeout(&self) -> Duration {
        secs(self.navigation_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn retry_settle(&self) -> Duration {
        secs(self.retry_settle_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
