// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake guardrail adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{
    status, ApiError, Guardrail, GuardrailApi, GuardrailConfig, GuardrailRef, DRAFT_VERSION,
};
use async_trait::async_trait;
use settle_core::Status;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded guardrail call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardrailCall {
    Create {
        config: GuardrailConfig,
        tags: BTreeMap<String, String>,
    },
    Get {
        id: String,
        version: String,
    },
    Update {
        id: String,
        config: GuardrailConfig,
    },
    Delete {
        id: String,
    },
    Tag {
        arn: String,
        tags: BTreeMap<String, String>,
    },
    Untag {
        arn: String,
        keys: Vec<String>,
    },
}

/// Service operation, used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
    Tag,
    Untag,
}

/// What one `get_guardrail` call observes while a transition is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeObservation {
    /// Guardrail reported in this status
    Status(Status),
    /// Eventual-consistency gap: the service claims it does not exist
    NotFound,
    /// Call fails outright
    Fail(ApiError),
}

impl FakeObservation {
    pub fn status(label: &str) -> Self {
        FakeObservation::Status(Status::new(label))
    }
}

#[derive(Debug, Clone)]
struct Entry {
    guardrail: Guardrail,
    /// Observations still to be served for the current transition
    pending: VecDeque<FakeObservation>,
    /// Remove the guardrail once `pending` drains
    deleting: bool,
}

#[derive(Debug, Default)]
struct State {
    guardrails: HashMap<String, Entry>,
    next_id: u64,
    on_create: Vec<FakeObservation>,
    on_update: Vec<FakeObservation>,
    on_delete: Vec<FakeObservation>,
    failures: HashMap<Operation, ApiError>,
}

/// Fake guardrail service
///
/// Mutating calls settle immediately unless a transition script is set with
/// [`on_create`](Self::on_create), [`on_update`](Self::on_update) or
/// [`on_delete`](Self::on_delete). Each `get_guardrail` consumes one scripted
/// observation; once the script drains, the transition completes (READY, or
/// gone for deletes).
#[derive(Clone, Default)]
pub struct FakeGuardrailApi {
    state: Arc<Mutex<State>>,
    calls: Arc<Mutex<Vec<GuardrailCall>>>,
}

impl FakeGuardrailApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<GuardrailCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `get_guardrail` calls so far
    pub fn get_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, GuardrailCall::Get { .. }))
            .count()
    }

    /// Observations served after every subsequent create
    pub fn on_create(&self, script: Vec<FakeObservation>) {
        self.lock().on_create = script;
    }

    /// Observations served after every subsequent update
    pub fn on_update(&self, script: Vec<FakeObservation>) {
        self.lock().on_update = script;
    }

    /// Observations served after every subsequent delete
    pub fn on_delete(&self, script: Vec<FakeObservation>) {
        self.lock().on_delete = script;
    }

    /// Fail the next call of `operation` with `error`
    pub fn fail_next(&self, operation: Operation, error: ApiError) {
        self.lock().failures.insert(operation, error);
    }

    /// Seed an existing guardrail
    pub fn insert(&self, guardrail: Guardrail) {
        self.lock().guardrails.insert(
            guardrail.id.clone(),
            Entry {
                guardrail,
                pending: VecDeque::new(),
                deleting: false,
            },
        );
    }

    /// Current service-side record, ignoring any in-flight script
    pub fn guardrail(&self, id: &str) -> Option<Guardrail> {
        self.lock().guardrails.get(id).map(|e| e.guardrail.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: GuardrailCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn by_arn<'a>(state: &'a mut State, arn: &str) -> Result<&'a mut Entry, ApiError> {
        state
            .guardrails
            .values_mut()
            .find(|e| e.guardrail.arn == arn)
            .ok_or_else(|| ApiError::NotFound(format!("resource {}", arn)))
    }

    fn injected(state: &mut State, operation: Operation) -> Result<(), ApiError> {
        match state.failures.remove(&operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn arn_for(id: &str) -> String {
    format!("arn:aws:bedrock:us-east-1:123456789012:guardrail/{}", id)
}

#[async_trait]
impl GuardrailApi for FakeGuardrailApi {
    async fn create_guardrail(
        &self,
        config: &GuardrailConfig,
        tags: &BTreeMap<String, String>,
    ) -> Result<GuardrailRef, ApiError> {
        self.record(GuardrailCall::Create {
            config: config.clone(),
            tags: tags.clone(),
        });

        let mut state = self.lock();
        Self::injected(&mut state, Operation::Create)?;

        state.next_id += 1;
        let id = format!("gr{:08}", state.next_id);
        let guardrail = Guardrail {
            id: id.clone(),
            arn: arn_for(&id),
            version: DRAFT_VERSION.to_string(),
            status: Status::new(status::CREATING),
            config: config.clone(),
            tags: tags.clone(),
        };
        let reference = guardrail.reference();
        let pending = state.on_create.iter().cloned().collect();
        state.guardrails.insert(
            id,
            Entry {
                guardrail,
                pending,
                deleting: false,
            },
        );

        Ok(reference)
    }

    async fn get_guardrail(&self, id: &str, version: &str) -> Result<Guardrail, ApiError> {
        self.record(GuardrailCall::Get {
            id: id.to_string(),
            version: version.to_string(),
        });

        let mut state = self.lock();
        Self::injected(&mut state, Operation::Get)?;

        let not_found = || ApiError::NotFound(format!("guardrail {} version {}", id, version));
        let entry = state.guardrails.get_mut(id).ok_or_else(not_found)?;
        if entry.guardrail.version != version {
            return Err(not_found());
        }

        if let Some(observation) = entry.pending.pop_front() {
            return match observation {
                FakeObservation::Status(status) => {
                    entry.guardrail.status = status;
                    Ok(entry.guardrail.clone())
                }
                FakeObservation::NotFound => Err(not_found()),
                FakeObservation::Fail(err) => Err(err),
            };
        }

        // Transition complete
        if entry.deleting {
            state.guardrails.remove(id);
            return Err(not_found());
        }
        entry.guardrail.status = Status::new(status::READY);
        Ok(entry.guardrail.clone())
    }

    async fn update_guardrail(
        &self,
        id: &str,
        config: &GuardrailConfig,
    ) -> Result<GuardrailRef, ApiError> {
        self.record(GuardrailCall::Update {
            id: id.to_string(),
            config: config.clone(),
        });

        let mut state = self.lock();
        Self::injected(&mut state, Operation::Update)?;

        let pending: VecDeque<FakeObservation> = state.on_update.iter().cloned().collect();
        let entry = state
            .guardrails
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(format!("guardrail {}", id)))?;
        entry.guardrail.config = config.clone();
        entry.guardrail.status = Status::new(status::UPDATING);
        entry.pending = pending;

        Ok(entry.guardrail.reference())
    }

    async fn delete_guardrail(&self, id: &str) -> Result<(), ApiError> {
        self.record(GuardrailCall::Delete { id: id.to_string() });

        let mut state = self.lock();
        Self::injected(&mut state, Operation::Delete)?;

        let pending: VecDeque<FakeObservation> = state.on_delete.iter().cloned().collect();
        let entry = state
            .guardrails
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(format!("guardrail {}", id)))?;
        entry.guardrail.status = Status::new(status::DELETING);
        entry.pending = pending;
        entry.deleting = true;

        Ok(())
    }

    async fn tag_resource(
        &self,
        arn: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<(), ApiError> {
        self.record(GuardrailCall::Tag {
            arn: arn.to_string(),
            tags: tags.clone(),
        });

        let mut state = self.lock();
        Self::injected(&mut state, Operation::Tag)?;

        let entry = Self::by_arn(&mut state, arn)?;
        entry
            .guardrail
            .tags
            .extend(tags.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }

    async fn untag_resource(&self, arn: &str, keys: &[String]) -> Result<(), ApiError> {
        self.record(GuardrailCall::Untag {
            arn: arn.to_string(),
            keys: keys.to_vec(),
        });

        let mut state = self.lock();
        Self::injected(&mut state, Operation::Untag)?;

        let entry = Self::by_arn(&mut state, arn)?;
        for key in keys {
            entry.guardrail.tags.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
