// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::guardrail::{ApiError, Guardrail, GuardrailApi, GuardrailConfig, GuardrailRef};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::Instrument;

/// Wrapper that adds tracing to any GuardrailApi
#[derive(Clone)]
pub struct TracedGuardrailApi<A> {
    inner: A,
}

impl<A> TracedGuardrailApi<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A: GuardrailApi> GuardrailApi for TracedGuardrailApi<A> {
    async fn create_guardrail(
        &self,
        config: &GuardrailConfig,
        tags: &BTreeMap<String, String>,
    ) -> Result<GuardrailRef, ApiError> {
        let span = tracing::info_span!("guardrail.create", name = %config.name);

        async {
            tracing::info!(tag_count = tags.len(), "starting");

            // Precondition: the service rejects unnamed guardrails
            if config.name.is_empty() {
                tracing::error!("guardrail name is empty");
                return Err(ApiError::Validation("guardrail name is empty".to_string()));
            }

            let start = std::time::Instant::now();
            let result = self.inner.create_guardrail(config, tags).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(created) => tracing::info!(
                    id = %created.id,
                    version = %created.version,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "create accepted"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "create failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn get_guardrail(&self, id: &str, version: &str) -> Result<Guardrail, ApiError> {
        let result = self.inner.get_guardrail(id, version).await;
        match &result {
            Ok(guardrail) => tracing::trace!(id, version, status = %guardrail.status, "described"),
            Err(e) if e.is_not_found() => tracing::trace!(id, version, "not found"),
            Err(e) => tracing::warn!(id, version, error = %e, "describe failed"),
        }
        result
    }

    async fn update_guardrail(
        &self,
        id: &str,
        config: &GuardrailConfig,
    ) -> Result<GuardrailRef, ApiError> {
        let span = tracing::info_span!("guardrail.update", id);

        async {
            tracing::info!(name = %config.name, "starting");

            let start = std::time::Instant::now();
            let result = self.inner.update_guardrail(id, config).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(_) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "update accepted"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "update failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn delete_guardrail(&self, id: &str) -> Result<(), ApiError> {
        let span = tracing::info_span!("guardrail.delete", id);

        async {
            let result = self.inner.delete_guardrail(id).await;
            // not found is often acceptable (already deleted)
            match &result {
                Ok(()) => tracing::info!("delete accepted"),
                Err(e) if e.is_not_found() => {
                    tracing::warn!(error = %e, "delete failed (may be expected)")
                }
                Err(e) => tracing::error!(error = %e, "delete failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn tag_resource(
        &self,
        arn: &str,
        tags: &BTreeMap<String, String>,
    ) -> Result<(), ApiError> {
        let result = self.inner.tag_resource(arn, tags).await;
        match &result {
            Ok(()) => tracing::info!(arn, tag_count = tags.len(), "tags applied"),
            Err(e) => tracing::error!(arn, error = %e, "tagging failed"),
        }
        result
    }

    async fn untag_resource(&self, arn: &str, keys: &[String]) -> Result<(), ApiError> {
        let result = self.inner.untag_resource(arn, keys).await;
        match &result {
            Ok(()) => tracing::info!(arn, keys = ?keys, "tags removed"),
            Err(e) => tracing::error!(arn, error = %e, "untagging failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
