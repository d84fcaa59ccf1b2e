// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level CLI behavior

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    Project::empty()
        .settle()
        .args(&["--help"])
        .passes()
        .stdout_has("replay")
        .stdout_has("types");
}

#[test]
fn version_is_reported() {
    Project::empty()
        .settle()
        .args(&["--version"])
        .passes()
        .stdout_has("settle ");
}

#[test]
fn unknown_command_fails() {
    Project::empty()
        .settle()
        .args(&["converge"])
        .exits(2)
        .stderr_has("unrecognized subcommand");
}
