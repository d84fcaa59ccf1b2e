// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `settle replay` specs

use crate::prelude::*;

#[test]
fn converging_trace_passes() {
    let project = Project::empty();
    project.file("create.toml", CREATION_TRACE);

    project
        .settle()
        .args(&["replay", "create.toml"])
        .passes()
        .stdout_has("converged after 6 polls in 5s (last state: READY)")
        .stdout_has("probes: - - CREATING CREATING READY READY");
}

#[test]
fn stuck_trace_exits_with_timeout() {
    let project = Project::empty();
    project.file("stuck.toml", STUCK_TRACE);

    project
        .settle()
        .args(&["replay", "stuck.toml"])
        .exits(2)
        .stdout_has("timed out after 6 polls in 10s")
        .stdout_has("timeout while waiting for state to become [READY] (last state: 'CREATING', timeout: 10s)");
}

#[test]
fn timeout_flag_overrides_trace() {
    let project = Project::empty();
    project.file("create.toml", CREATION_TRACE);

    project
        .settle()
        .args(&["replay", "create.toml", "--timeout", "2s"])
        .exits(2)
        .stdout_has("timed out after 3 polls in 2s");
}

#[test]
fn oversized_timeout_flag_is_accepted() {
    let project = Project::empty();
    project.file("create.toml", CREATION_TRACE);

    project
        .settle()
        .args(&["replay", "create.toml", "--timeout", "300000000000y"])
        .passes()
        .stdout_has("converged after 6 polls in 5s");
}

#[test]
fn unexpected_status_is_reported() {
    let project = Project::empty();
    project.file(
        "failed.toml",
        r#"
pending = ["CREATING"]
target = ["READY"]
timeout = "1m"
steps = ["CREATING", "FAILED"]
"#,
    );

    project
        .settle()
        .args(&["replay", "failed.toml"])
        .exits(2)
        .stdout_has("unexpected status after 2 polls")
        .stdout_has("unexpected state 'FAILED', wanted target [READY]");
}

#[test]
fn deletion_trace_converges_on_absence() {
    let project = Project::empty();
    project.file(
        "delete.toml",
        r#"
pending = ["DELETING", "READY"]
timeout = "1m"
steps = ["DELETING", "DELETING", "-"]
"#,
    );

    project
        .settle()
        .args(&["replay", "delete.toml"])
        .passes()
        .stdout_has("converged on absence after 3 polls");
}

#[test]
fn json_report_is_machine_readable() {
    let project = Project::empty();
    project.file("stuck.toml", STUCK_TRACE);

    let outcome = project
        .settle()
        .args(&["replay", "stuck.toml", "--format", "json"])
        .exits(2);
    let report = outcome.json();

    assert_eq!(report["outcome"], "timeout");
    assert_eq!(report["polls"], 6);
    assert_eq!(report["elapsed"], "10s");
    assert_eq!(report["last_status"], "CREATING");
}

#[test]
fn missing_trace_file_is_an_error() {
    Project::empty()
        .settle()
        .args(&["replay", "nowhere.toml"])
        .exits(1)
        .stderr_has("failed to read trace nowhere.toml");
}

#[test]
fn malformed_trace_is_an_error() {
    let project = Project::empty();
    project.file("empty.toml", "timeout = \"5s\"\nsteps = []\n");

    project
        .settle()
        .args(&["replay", "empty.toml"])
        .exits(1)
        .stderr_has("invalid trace empty.toml")
        .stderr_has("trace has no steps");
}

#[test]
fn logs_go_to_stderr_when_enabled() {
    let project = Project::empty();
    project.file("create.toml", CREATION_TRACE);

    project
        .settle()
        .args(&["replay", "create.toml", "--format", "json"])
        .env("SETTLE_LOG", "info")
        .passes()
        .stderr_has("replay finished")
        .stdout_lacks("replay finished");
}

#[test]
fn default_logging_is_quiet() {
    let project = Project::empty();
    project.file("create.toml", CREATION_TRACE);

    project
        .settle()
        .args(&["replay", "create.toml"])
        .passes()
        .stderr_is_empty();
}
