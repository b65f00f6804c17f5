//! `rr config` specs

use crate::prelude::*;

#[test]
fn defaults_are_printed_without_a_config_file() {
    let temp = Project::empty();

    temp.rr()
        .args(&["config"])
        .passes()
        .stdout_has("# built-in defaults")
        .stdout_has("max_concurrent = 3")
        .stdout_has("mode = \"incremental\"");
}

#[test]
fn local_rr_toml_is_picked_up() {
    let temp = Project::empty();
    temp.file("rr.toml", "max_concurrent = 7\n");

    temp.rr()
        .args(&["config"])
        .passes()
        .stdout_has("rr.toml")
        .stdout_has("max_concurrent = 7");
}

#[test]
fn explicit_config_beats_local_file() {
    let temp = Project::empty();
    temp.file("rr.toml", "max_concurrent = 7\n");
    temp.file("other.toml", "max_concurrent = 2\n");

    temp.rr()
        .args(&["config", "--config", "other.toml"])
        .passes()
        .stdout_has("max_concurrent = 2");
}

#[test]
fn json_output_is_structured() {
    let temp = Project::empty();
    temp.file("rr.toml", "[save]\nmode = \"final-only\"\n");

    let out = temp.rr().args(&["-o", "json", "config"]).passes();
    let json = out.json();

    assert_eq!(json["save"]["mode"], "final-only");
    assert_eq!(json["retry_times"], 3);
}

#[test]
fn invalid_config_is_rejected() {
    let temp = Project::empty();
    temp.file("rr.toml", "max_concurrent = 0\n");

    temp.rr()
        .args(&["config"])
        .fails()
        .stderr_has("invalid max_concurrent: must be at least 1");
}

#[test]
fn unknown_keys_are_rejected() {
    let temp = Project::empty();
    temp.file("rr.toml", "max_concurent = 4\n");

    temp.rr()
        .args(&["config"])
        .fails()
        .stderr_has("max_concurent");
}

#[test]
fn incremental_save_with_no_triggers_points_at_final_only() {
    let temp = Project::empty();
    temp.file(
        "rr.toml",
        "[save]\nmode = \"incremental\"\nevery_count = 0\nevery_secs = 0.0\n",
    );

    temp.rr()
        .args(&["config"])
        .fails()
        .stderr_has("mode = \"final-only\"");
}
