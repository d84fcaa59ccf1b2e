// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probe results and the refresh capability
//!
//! A refresh performs exactly one remote read for one resource instance and
//! classifies the outcome. Absence is a distinct variant, never an error:
//! it is the success signal for deletion and a tolerated transient while a
//! freshly created resource propagates.

use crate::status::Status;
use std::future::Future;

/// Boxed error carried by a failed probe
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a single status probe
#[derive(Debug)]
pub enum Probe<T> {
    /// Resource exists and reports `status`
    Found { snapshot: T, status: Status },
    /// Resource is confirmed absent
    Absent,
    /// Any failure other than "not found" (transport, permission, server)
    Failed(BoxError),
}

impl<T> Probe<T> {
    pub fn found(snapshot: T, status: impl Into<Status>) -> Self {
        Probe::Found {
            snapshot,
            status: status.into(),
        }
    }

    pub fn failed(err: impl Into<BoxError>) -> Self {
        Probe::Failed(err.into())
    }

    /// Classify a lookup that already maps "not found" to `Ok(None)`
    pub fn from_lookup<E, F>(result: Result<Option<T>, E>, status_of: F) -> Self
    where
        E: Into<BoxError>,
        F: FnOnce(&T) -> Status,
    {
        match result {
            Ok(Some(snapshot)) => {
                let status = status_of(&snapshot);
                Probe::Found { snapshot, status }
            }
            Ok(None) => Probe::Absent,
            Err(e) => Probe::Failed(e.into()),
        }
    }

    pub fn status(&self) -> Option<&Status> {
        match self {
            Probe::Found { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Probe::Absent)
    }
}

/// Capability that probes one remote resource
///
/// Implemented for any `Fn() -> Future<Output = Probe<T>>`, so callers
/// usually bind identifiers by closure capture. Implementations must be
/// idempotent and safe to call at the polling cadence.
pub trait Refresh<T>: Send + Sync {
    fn refresh(&self) -> impl Future<Output = Probe<T>> + Send;
}

impl<T, F, Fut> Refresh<T> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Probe<T>> + Send,
{
    fn refresh(&self) -> impl Future<Output = Probe<T>> + Send {
        self()
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
