// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;

#[derive(Parser)]
struct Harness {
    #[command(flatten)]
    args: RunArgs,
}

fn parse(argv: &[&str]) -> RunArgs {
    let mut full = vec!["rr"];
    full.extend_from_slice(argv);
    Harness::try_parse_from(full).unwrap().args
}

#[test]
fn no_flags_leave_config_untouched() {
    let args = parse(&["books.csv"]);
    let mut config = ResolverConfig::default();

    args.apply(&mut config);

    assert_eq!(config, ResolverConfig::default());
    assert_eq!(args.table, PathBuf::from("books.csv"));
}

#[test]
fn flags_override_config() {
    let args = parse(&[
        "books.csv",
        "--max-concurrent",
        "5",
        "--retry-times",
        "2",
        "--chunk-size",
        "100",
        "--final-only",
    ]);
    let mut config = ResolverConfig::default();

    args.apply(&mut config);

    assert_eq!(config.max_concurrent, 5);
    assert_eq!(config.retry_times, 2);
    assert_eq!(config.chunk_size, Some(100));
    assert_eq!(config.save, SaveConfig::FinalOnly);
}

#[test]
fn overrides_are_validated_afterwards() {
    let args = parse(&["books.csv", "--max-concurrent", "0"]);
    let mut config = ResolverConfig::default();

    args.apply(&mut config);

    assert!(config.validate().is_err());
}

#[test]
fn table_is_required() {
    assert!(Harness::try_parse_from(["rr"]).is_err());
}
