// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guardrail service adapters
//!
//! A guardrail moves through server-side states after every mutating call:
//! CREATING -> READY, UPDATING -> READY, DELETING -> gone. Callers observe
//! those transitions by polling [`GuardrailApi::get_guardrail`].

mod noop;

pub use noop::NoOpGuardrailApi;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGuardrailApi, FakeObservation, GuardrailCall, Operation};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use settle_core::Status;
use std::collections::BTreeMap;
use thiserror::Error;

/// Server-side guardrail states
pub mod status {
    pub const CREATING: &str = "CREATING";
    pub const UPDATING: &str = "UPDATING";
    pub const VERSIONING: &str = "VERSIONING";
    pub const READY: &str = "READY";
    pub const FAILED: &str = "FAILED";
    pub const DELETING: &str = "DELETING";
}

/// Version label of the working copy of a guardrail
pub const DRAFT_VERSION: &str = "DRAFT";

/// Errors from guardrail service calls
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("service error: {0}")]
    Service(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Updatable guardrail attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub blocked_input_messaging: String,
    pub blocked_outputs_messaging: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,
}

/// Identifiers returned by create and update calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailRef {
    pub id: String,
    pub arn: String,
    pub version: String,
}

/// Guardrail as described by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardrail {
    pub id: String,
    pub arn: String,
    pub version: String,
    pub status: Status,
    #[serde(flatten)]
    pub config: GuardrailConfig,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Guardrail {
    pub fn reference(&self) -> GuardrailRef {
        GuardrailRef {
            id: self.id.clone(),
            arn: self.arn.clone(),
            version: self.version.clone(),
        }
    }
}

/// Adapter for the guardrail control plane
#[async_trait]
pub trait GuardrailApi: Clone + Send + Sync + 'static {
    /// Start creating a guardrail; returns before it is ready
    async fn create_guardrail(
        &self,
        config: &GuardrailConfig,
        tags: &BTreeMap<String, String>,
    ) -> Result<GuardrailRef, ApiError>;

    /// Describe one version of a guardrail
    async fn get_guardrail(&self, id: &str, version: &str) -> Result<Guardrail, ApiError>;

    /// Start updating the draft of a guardrail
    async fn update_guardrail(
        &self,
        id: &str,
        config: &GuardrailConfig,
    ) -> Result<GuardrailRef, ApiError>;

    /// Start deleting a guardrail and all its versions
    async fn delete_guardrail(&self, id: &str) -> Result<(), ApiError>;

    /// Add or overwrite tags on the resource named by `arn`
    async fn tag_resource(&self, arn: &str, tags: &BTreeMap<String, String>)
        -> Result<(), ApiError>;

    /// Remove tag keys from the resource named by `arn`
    async fn untag_resource(&self, arn: &str, keys: &[String]) -> Result<(), ApiError>;
}
