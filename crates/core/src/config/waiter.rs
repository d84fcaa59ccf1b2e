// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiter tolerances and polling cadence

use super::ConfigError;
use crate::poll::PollPolicy;
use crate::waiter::DEFAULT_NOT_FOUND_CHECKS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables shared by every wait of a resource type
///
/// Pending/target sets and the timeout are per operation and live on the
/// `StateChangeConf` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaiterSettings {
    /// Consecutive "not found" probes tolerated while a target is expected
    pub not_found_checks: u32,
    /// Consecutive target observations required before success
    pub continuous_target_occurrence: u32,
    /// Wait before the first probe
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
    pub poll: PollPolicy,
}

impl Default for WaiterSettings {
    fn default() -> Self {
        Self {
            not_found_checks: DEFAULT_NOT_FOUND_CHECKS,
            continuous_target_occurrence: 1,
            delay: Duration::ZERO,
            poll: PollPolicy::default(),
        }
    }
}

impl WaiterSettings {
    /// Parse settings from a TOML document, filling gaps with defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: WaiterSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.continuous_target_occurrence == 0 {
            return Err(ConfigError::Invalid {
                field: "continuous_target_occurrence",
                message: "must be at least 1".to_string(),
            });
        }
        if let PollPolicy::Backoff {
            initial,
            max,
            multiplier,
            jitter,
        } = &self.poll
        {
            if initial.is_zero() || initial > max {
                return Err(ConfigError::Invalid {
                    field: "poll.initial",
                    message: format!("must be non-zero and at most max ({:?})", max),
                });
            }
            if *multiplier < 1.0 {
                return Err(ConfigError::Invalid {
                    field: "poll.multiplier",
                    message: format!("must be >= 1.0, got {}", multiplier),
                });
            }
            if !(0.0..=1.0).contains(jitter) {
                return Err(ConfigError::Invalid {
                    field: "poll.jitter",
                    message: format!("must be within 0.0..=1.0, got {}", jitter),
                });
            }
        }
        if let PollPolicy::Fixed { interval } = &self.poll {
            if interval.is_zero() {
                return Err(ConfigError::Invalid {
                    field: "poll.interval",
                    message: "must be non-zero".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
