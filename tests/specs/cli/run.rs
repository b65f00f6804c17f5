//! `rr run` specs
//!
//! These never reach a lookup service: every table is either fully
//! resolved or the run fails before any session starts.

use crate::prelude::*;

#[test]
fn resolved_table_is_skipped_without_sessions() {
    let temp = Project::empty();
    temp.file("rr.toml", UNREACHABLE_SESSION_CONFIG);
    temp.file("books.csv", RESOLVED_TABLE);

    temp.rr_with_credentials()
        .args(&["run", "books.csv"])
        .passes()
        .stdout_has("total:     2")
        .stdout_has("skipped:   2")
        .stdout_has("success rate: 100.0%");

    assert_eq!(temp.read("books.csv"), RESOLVED_TABLE);
}

#[test]
fn run_summary_as_json() {
    let temp = Project::empty();
    temp.file("rr.toml", UNREACHABLE_SESSION_CONFIG);
    temp.file("books.csv", RESOLVED_TABLE);

    let out = temp
        .rr_with_credentials()
        .args(&["-o", "json", "run", "books.csv"])
        .passes();
    let json = out.json();

    assert_eq!(json["total"], 2);
    assert_eq!(json["skipped"], 2);
    assert_eq!(json["failed_after_retry"], 0);
    assert!(json["run_id"].is_string());
}

#[test]
fn unreachable_service_fails_before_any_write() {
    let temp = Project::empty();
    temp.file("rr.toml", UNREACHABLE_SESSION_CONFIG);
    temp.file("books.csv", "isbn,result\n9780306406157,\n");

    temp.rr_with_credentials()
        .args(&["run", "books.csv"])
        .fails()
        .stderr_has("no session worker could be started");

    assert_eq!(temp.read("books.csv"), "isbn,result\n9780306406157,\n");
}

#[test]
fn log_file_receives_run_logs() {
    let temp = Project::empty();
    temp.file("rr.toml", UNREACHABLE_SESSION_CONFIG);
    temp.file("books.csv", RESOLVED_TABLE);

    temp.rr_with_credentials()
        .env("RR_LOG", "info")
        .args(&["run", "books.csv", "--log-file", "logs/rr.log"])
        .passes();

    assert!(temp.read("logs/rr.log").contains("nothing to resolve"));
}
