// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn summary_counts_final_outcomes() {
    let stats = RunStatistics::new();
    stats.add_total(10);
    for _ in 0..8 {
        stats.record(&TaskResult::success("v"));
    }
    stats.record(&TaskResult::failed("retry limit exceeded"));
    stats.record(&TaskResult::skipped("empty key"));

    let summary = stats.summary(Duration::from_secs(3));
    assert_eq!(summary.total, 10);
    assert_eq!(summary.success, 8);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failed_after_retry, 1);
    assert_eq!(summary.skipped, 1);
    assert!((summary.success_rate - 8.0 / 9.0 * 100.0).abs() < 1e-9);
    assert!(!summary.is_complete());
}

#[test]
fn nothing_attempted_reports_full_success_rate() {
    let stats = RunStatistics::new();
    stats.add_total(4);
    stats.add_pre_skipped(4);

    let summary = stats.summary(Duration::ZERO);
    assert_eq!(summary.skipped, summary.total);
    assert_eq!(summary.success_rate, 100.0);
    assert!(summary.is_complete());
}

#[test]
fn empty_run_is_complete() {
    let summary = RunStatistics::new().summary(Duration::ZERO);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.success_rate, 100.0);
}

#[test]
fn summary_round_trips_through_json() {
    let stats = RunStatistics::new();
    stats.add_total(1);
    stats.record(&TaskResult::success("v"));
    let summary = stats.summary(Duration::from_millis(1500));

    let json = serde_json::to_string(&summary).unwrap();
    let back: RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
}

#[yare::parameterized(
    millis        = { Duration::from_millis(850),  "850ms" },
    seconds       = { Duration::from_millis(12_400), "12.4s" },
    minutes       = { Duration::from_secs(185),    "3m05s" },
    hours         = { Duration::from_secs(3_720),  "1h02m" },
)]
fn elapsed(duration: Duration, expected: &str) {
    assert_eq!(format_elapsed(duration), expected);
}
