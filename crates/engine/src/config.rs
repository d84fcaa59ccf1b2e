// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider configuration

use crate::tags::{IgnoreTags, TagPolicy, Tags};
use serde::{Deserialize, Serialize};
use settle_core::{ConfigError, TimeoutOverrides, WaiterSettings};

/// Settings applied to every resource the provider manages
///
/// ```toml
/// [default_tags]
/// env = "prod"
///
/// [ignore_tags]
/// key_prefixes = ["kubernetes.io/"]
///
/// [timeouts]
/// create = "45m"
///
/// [waiter.poll]
/// kind = "fixed"
/// interval = "5s"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub default_tags: Tags,
    pub ignore_tags: IgnoreTags,
    /// Overrides applied over each resource type's default timeouts
    pub timeouts: TimeoutOverrides,
    pub waiter: WaiterSettings,
}

impl ProviderConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ProviderConfig = toml::from_str(content)?;
        config.waiter.validate()?;
        Ok(config)
    }

    pub fn tag_policy(&self) -> TagPolicy {
        TagPolicy::new(self.default_tags.clone(), self.ignore_tags.clone())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
