// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use predicates::prelude::*;

/// Creation wait that converges on the sixth probe
pub const CREATION_TRACE: &str = r#"
pending = ["CREATING"]
target = ["READY"]
timeout = "5s"
continuous_target_occurrence = 2
steps = ["-", "-", "CREATING", "CREATING", "READY", "READY"]

[poll]
kind = "fixed"
interval = "1s"
"#;

/// Creation wait that never leaves the pending state
pub const STUCK_TRACE: &str = r#"
pending = ["CREATING"]
target = ["READY"]
timeout = "10s"
steps = ["CREATING"]

[poll]
kind = "fixed"
interval = "2s"
"#;

/// Scratch directory holding trace files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn settle(&self) -> Cli {
        let mut cmd = Command::cargo_bin("settle").unwrap();
        cmd.current_dir(self.dir.path()).env_remove("SETTLE_LOG");
        Cli { cmd }
    }
}

/// Builder around one CLI invocation
pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Outcome {
        Outcome(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> Outcome {
        Outcome(self.cmd.assert().failure())
    }

    pub fn exits(mut self, code: i32) -> Outcome {
        Outcome(self.cmd.assert().code(code))
    }
}

/// Finished invocation
pub struct Outcome(Assert);

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        Outcome(self.0.stdout(predicate::str::contains(needle)))
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        Outcome(self.0.stdout(predicate::str::contains(needle).not()))
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        Outcome(self.0.stderr(predicate::str::contains(needle)))
    }

    pub fn stderr_is_empty(self) -> Self {
        Outcome(self.0.stderr(predicate::str::is_empty()))
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).to_string()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
