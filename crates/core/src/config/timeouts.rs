// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-operation timeouts

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Timeouts for the waiting half of each lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub create: Duration,
    #[serde(with = "humantime_serde")]
    pub update: Duration,
    #[serde(with = "humantime_serde")]
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_OPERATION_TIMEOUT)
    }
}

impl Timeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            create: timeout,
            update: timeout,
            delete: timeout,
        }
    }

    /// Apply user-supplied overrides on top of these defaults
    pub fn overridden_by(&self, overrides: &TimeoutOverrides) -> Timeouts {
        Timeouts {
            create: overrides.create.unwrap_or(self.create),
            update: overrides.update.unwrap_or(self.update),
            delete: overrides.delete.unwrap_or(self.delete),
        }
    }
}

/// Optional per-resource timeout overrides (the `timeouts` block of a resource)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutOverrides {
    #[serde(default, with = "humantime_serde")]
    pub create: Option<Duration>,
    #[serde(default, with = "humantime_serde")]
    pub update: Option<Duration>,
    #[serde(default, with = "humantime_serde")]
    pub delete: Option<Duration>,
}

#[cfg(test)]
#[path = "timeouts_tests.rs"]
mod tests;
