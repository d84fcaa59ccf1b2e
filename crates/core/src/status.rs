// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status labels and the pending/target sets the waiter matches against

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote lifecycle stage reported by a probe (e.g. "CREATING", "READY")
///
/// Opaque: each resource type defines its own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for Status {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Status {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered, duplicate-free set of statuses
///
/// An empty target set means "converged once the resource is gone".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Status>", into = "Vec<Status>")]
pub struct StateSet(Vec<Status>);

impl StateSet {
    pub fn new<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Status>,
    {
        statuses.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, status: &Status) -> bool {
        self.0.iter().any(|s| s == status)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.0.iter()
    }

    fn insert(&mut self, status: Status) {
        if !self.contains(&status) {
            self.0.push(status);
        }
    }
}

impl<S: Into<Status>> FromIterator<S> for StateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = StateSet::empty();
        for status in iter {
            set.insert(status.into());
        }
        set
    }
}

impl From<Vec<Status>> for StateSet {
    fn from(statuses: Vec<Status>) -> Self {
        statuses.into_iter().collect()
    }
}

impl From<StateSet> for Vec<Status> {
    fn from(set: StateSet) -> Self {
        set.0
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, status) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", status)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
