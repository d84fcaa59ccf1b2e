// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider-wide tag policy

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Tags = BTreeMap<String, String>;

/// Tag keys the provider never manages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreTags {
    pub keys: Vec<String>,
    pub key_prefixes: Vec<String>,
}

impl IgnoreTags {
    pub fn ignores(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
            || self.key_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

/// Default tags plus ignore rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPolicy {
    pub default_tags: Tags,
    pub ignore: IgnoreTags,
}

impl TagPolicy {
    pub fn new(default_tags: Tags, ignore: IgnoreTags) -> Self {
        Self {
            default_tags,
            ignore,
        }
    }

    /// Resource tags merged over the defaults, minus ignored keys
    pub fn tags_all(&self, tags: &Tags) -> Tags {
        self.default_tags
            .iter()
            .chain(tags.iter())
            .filter(|(key, _)| !self.ignore.ignores(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Split tags reported by the service into (tags, tags_all)
    ///
    /// Keys whose value matches a default tag are attributed to the provider
    /// and left out of the resource's own tags.
    pub fn split_remote(&self, remote: &Tags) -> (Tags, Tags) {
        let tags_all: Tags = remote
            .iter()
            .filter(|(key, _)| !self.ignore.ignores(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let tags = tags_all
            .iter()
            .filter(|(key, value)| self.default_tags.get(*key) != Some(*value))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        (tags, tags_all)
    }
}

/// Changes needed to move a resource's tags from `old` to `new`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Keys added or whose value changed
    pub upsert: Tags,
    /// Keys no longer present
    pub remove: Vec<String>,
}

impl TagDiff {
    pub fn between(old: &Tags, new: &Tags) -> Self {
        let upsert = new
            .iter()
            .filter(|(key, value)| old.get(*key) != Some(*value))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let remove = old
            .keys()
            .filter(|key| !new.contains_key(*key))
            .cloned()
            .collect();
        Self { upsert, remove }
    }

    pub fn is_empty(&self) -> bool {
        self.upsert.is_empty() && self.remove.is_empty()
    }
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
