//! CLI error handling specs
//!
//! Verify error messages and exit codes for bad input.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli().args(&["resolve"]).fails().stderr_has("unrecognized subcommand");
}

#[test]
fn unsupported_table_format_fails() {
    let temp = Project::empty();
    temp.file("books.txt", "isbn\n1\n");

    temp.rr()
        .args(&["status", "books.txt"])
        .fails()
        .stderr_has("unsupported table format");
}

#[test]
fn missing_key_column_fails() {
    let temp = Project::empty();
    temp.file("books.csv", "code,result\n1,\n");

    temp.rr()
        .args(&["status", "books.csv"])
        .fails()
        .stderr_has("column not found: isbn");
}

#[test]
fn run_without_session_section_fails() {
    let temp = Project::empty();
    temp.file("books.csv", RESOLVED_TABLE);

    temp.rr_with_credentials()
        .args(&["run", "books.csv"])
        .fails()
        .stderr_has("config has no [session] section");
}

#[test]
fn run_without_credentials_fails() {
    let temp = Project::empty();
    temp.file("rr.toml", UNREACHABLE_SESSION_CONFIG);
    temp.file("books.csv", RESOLVED_TABLE);

    temp.rr()
        .args(&["run", "books.csv"])
        .fails()
        .stderr_has("RR_USERNAME is not set");
}

#[test]
fn run_rejects_invalid_override() {
    let temp = Project::empty();
    temp.file("rr.toml", UNREACHABLE_SESSION_CONFIG);
    temp.file("books.csv", RESOLVED_TABLE);

    temp.rr_with_credentials()
        .args(&["run", "books.csv", "--max-concurrent", "0"])
        .fails()
        .stderr_has("invalid max_concurrent");
}
