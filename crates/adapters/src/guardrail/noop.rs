// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op guardrail adapter for when no transport is configured.

use super::{ApiError, Guardrail, GuardrailApi, GuardrailConfig, GuardrailRef};
use async_trait::async_trait;
use std::collections::BTreeMap;

const NO_TRANSPORT: &str = "no guardrail transport configured";

/// Guardrail adapter that rejects every call.
///
/// Lets a provider be assembled (e.g. to list registered types) without a
/// service endpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpGuardrailApi;

impl NoOpGuardrailApi {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GuardrailApi for NoOpGuardrailApi {
    async fn create_guardrail(
        &self,
        _config: &GuardrailConfig,
        _tags: &BTreeMap<String, String>,
    ) -> Result<GuardrailRef, ApiError> {
        Err(ApiError::Service(NO_TRANSPORT.to_string()))
    }

    async fn get_guardrail(&self, _id: &str, _version: &str) -> Result<Guardrail, ApiError> {
        Err(ApiError::Service(NO_TRANSPORT.to_string()))
    }

    async fn update_guardrail(
        &self,
        _id: &str,
        _config: &GuardrailConfig,
    ) -> Result<GuardrailRef, ApiError> {
        Err(ApiError::Service(NO_TRANSPORT.to_string()))
    }

    async fn delete_guardrail(&self, _id: &str) -> Result<(), ApiError> {
        Err(ApiError::Service(NO_TRANSPORT.to_string()))
    }

    async fn tag_resource(
        &self,
        _arn: &str,
        _tags: &BTreeMap<String, String>,
    ) -> Result<(), ApiError> {
        Err(ApiError::Service(NO_TRANSPORT.to_string()))
    }

    async fn untag_resource(&self, _arn: &str, _keys: &[String]) -> Result<(), ApiError> {
        Err(ApiError::Service(NO_TRANSPORT.to_string()))
    }
}
