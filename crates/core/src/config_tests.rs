// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn defaults_are_valid() {
    let config = ResolverConfig::default();
    config.validate().unwrap();
    assert_eq!(config.max_concurrent, 3);
    assert_eq!(
        config.flush_policy(),
        FlushPolicy {
            every_count: Some(10),
            every: Some(Duration::from_secs(60)),
        }
    );
}

#[test]
fn parses_full_file() {
    let config = ResolverConfig::from_toml_str(
        r#"
        max_concurrent = 2
        retry_times = 5
        min_delay_secs = 0.5
        max_delay_secs = 1.5
        chunk_size = 50
        key_format = "isbn"
        value_pattern = '^[A-Z]'

        [save]
        mode = "incremental"
        every_count = 0
        every_secs = 30.0

        [columns]
        key = "ISBN"
        value = "CLC"

        [session]
        base_url = "https://opac.example.org"
        result_pattern = '<span id="clc">([^<]+)</span>'
        "#,
    )
    .unwrap();

    assert_eq!(config.max_concurrent, 2);
    assert_eq!(config.retry_times, 5);
    assert_eq!(config.chunk_size, Some(50));
    assert_eq!(config.key_format, KeyFormat::Isbn);
    assert_eq!(config.min_delay(), Duration::from_millis(500));
    assert_eq!(
        config.flush_policy(),
        FlushPolicy {
            every_count: None,
            every: Some(Duration::from_secs(30)),
        }
    );
    assert_eq!(config.columns.key, "ISBN");
    let session = config.session.unwrap();
    assert_eq!(session.base_url, "https://opac.example.org");
    assert_eq!(session.login_path, "/login");
}

#[test]
fn final_only_is_a_named_mode() {
    let config = ResolverConfig::from_toml_str(
        r#"
        [save]
        mode = "final-only"
        "#,
    )
    .unwrap();
    assert!(config.flush_policy().is_final_only());
}

#[test]
fn incremental_with_both_triggers_disabled_is_rejected() {
    let err = ResolverConfig::from_toml_str(
        r#"
        [save]
        mode = "incremental"
        every_count = 0
        every_secs = 0.0
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("final-only"), "{err}");
}

#[yare::parameterized(
    zero_concurrency   = { "max_concurrent = 0",                              "max_concurrent" },
    zero_retries       = { "retry_times = 0",                                 "retry_times" },
    inverted_delays    = { "min_delay_secs = 5.0\nmax_delay_secs = 1.0",      "min_delay_secs" },
    negative_delay     = { "min_delay_secs = -1.0",                           "min_delay_secs" },
    zero_request       = { "request_timeout_secs = 0.0",                      "request_timeout_secs" },
    zero_navigation    = { "navigation_timeout_secs = 0.0",                   "navigation_timeout_secs" },
    zero_poll          = { "poll_interval_ms = 0",                            "poll_interval_ms" },
    zero_chunk         = { "chunk_size = 0",                                  "chunk_size" },
    same_columns       = { "[columns]\nkey = \"isbn\"\nvalue = \"isbn\"",     "columns" },
)]
fn rejects(content: &str, field: &str) {
    match ResolverConfig::from_toml_str(content) {
        Err(ConfigError::Invalid { field: f, .. }) => assert_eq!(f, field),
        other => panic!("expected invalid {field}, got {other:?}"),
    }
}

#[test]
fn rejects_bad_pattern() {
    let err = ResolverConfig::from_toml_str("value_pattern = '('").unwrap_err();
    assert!(matches!(err, ConfigError::Pattern(_)));
}

#[test]
fn rejects_unknown_keys() {
    let err = ResolverConfig::from_toml_str("max_concurent = 2").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "retry_times = 7").unwrap();

    let config = ResolverConfig::load(file.path()).unwrap();
    assert_eq!(config.retry_times, 7);
}

#[test]
fn load_missing_file_reports_path() {
    let err = ResolverConfig::load(Path::new("/nonexistent/rr.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/rr.toml"));
}
