// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Attribute bag exchanged between the dispatch layer and resources

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use settle_core::TimeoutOverrides;
use std::collections::BTreeMap;

/// Planned or stored state of one resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: Map<String, Value>,
    pub tags: BTreeMap<String, String>,
    /// Tags after merging provider defaults, as sent to the service
    pub tags_all: BTreeMap<String, String>,
    pub timeouts: TimeoutOverrides,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutOverrides) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// String attribute that must be present and non-empty
    pub fn require_str(&self, key: &'static str) -> Result<&str, DataError> {
        match self.get_str(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(DataError::MissingAttribute(key)),
        }
    }

    pub fn require_id(&self) -> Result<&str, DataError> {
        self.id.as_deref().ok_or(DataError::MissingId)
    }

    /// Label used in error messages: the id if assigned, else the name
    pub fn label(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.get_str("name").map(str::to_string))
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
