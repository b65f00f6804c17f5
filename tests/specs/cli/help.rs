//! Help and version output specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: rr")
        .stdout_has("run")
        .stdout_has("status")
        .stdout_has("config");
}

#[test]
fn version_prints_package_version() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(concat!("rr ", env!("CARGO_PKG_VERSION")));
}

#[test]
fn run_help_lists_overrides() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--max-concurrent")
        .stdout_has("--retry-times")
        .stdout_has("--chunk-size")
        .stdout_has("--final-only")
        .stdout_has("--log-file");
}
