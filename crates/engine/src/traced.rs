// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced wrappers around resources and data sources
//!
//! The provider hands out only wrapped handlers. A wrapper implements the full
//! capability interface whatever the inner type supports: a missing import is
//! reported as an error, a missing plan modifier or validator is a no-op.

use crate::data::ResourceData;
use crate::error::{Action, LifecycleError, Unsupported};
use crate::resource::{DataSource, ImportState, ModifyPlan, Resource, ValidateConfig};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Optional capabilities of a resource, captured when it is wrapped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub import_state: bool,
    pub modify_plan: bool,
    pub validate_config: bool,
}

impl Capabilities {
    fn of(resource: &dyn Resource) -> Self {
        Self {
            import_state: resource.as_import_state().is_some(),
            modify_plan: resource.as_modify_plan().is_some(),
            validate_config: resource.as_validate_config().is_some(),
        }
    }

    /// Names of the supported optional capabilities
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.import_state, "import"),
            (self.modify_plan, "modify-plan"),
            (self.validate_config, "validate"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Wrapper that adds tracing to any Resource
#[derive(Clone)]
pub struct TracedResource {
    inner: Arc<dyn Resource>,
    type_name: String,
    capabilities: Capabilities,
}

impl TracedResource {
    pub fn new(inner: Arc<dyn Resource>) -> Self {
        let type_name = inner.type_name().to_string();
        let capabilities = Capabilities::of(inner.as_ref());
        Self {
            inner,
            type_name,
            capabilities,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[async_trait]
impl Resource for TracedResource {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    async fn create(&self, plan: ResourceData) -> Result<ResourceData, LifecycleError> {
        let span = tracing::info_span!(
            "resource.create",
            type_name = %self.type_name,
            name = %plan.label()
        );

        async {
            tracing::info!("starting");
            let start = Instant::now();
            let result = self.inner.create(plan).await;

            match &result {
                Ok(state) => tracing::info!(
                    id = state.id.as_deref().unwrap_or(""),
                    elapsed_ms = elapsed_ms(start),
                    "created"
                ),
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "create failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn read(&self, state: ResourceData) -> Result<Option<ResourceData>, LifecycleError> {
        let span = tracing::info_span!(
            "resource.read",
            type_name = %self.type_name,
            id = %state.label()
        );

        async {
            let result = self.inner.read(state).await;
            match &result {
                Ok(Some(_)) => tracing::debug!("refreshed"),
                Ok(None) => tracing::warn!("resource not found, removing from state"),
                Err(e) => tracing::error!(error = %e, "read failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn update(
        &self,
        plan: ResourceData,
        state: ResourceData,
    ) -> Result<ResourceData, LifecycleError> {
        let span = tracing::info_span!(
            "resource.update",
            type_name = %self.type_name,
            id = %state.label()
        );

        async {
            tracing::info!("starting");
            let start = Instant::now();
            let result = self.inner.update(plan, state).await;

            match &result {
                Ok(_) => tracing::info!(elapsed_ms = elapsed_ms(start), "updated"),
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "update failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn delete(&self, state: ResourceData) -> Result<(), LifecycleError> {
        let span = tracing::info_span!(
            "resource.delete",
            type_name = %self.type_name,
            id = %state.label()
        );

        async {
            tracing::info!("starting");
            let start = Instant::now();
            let result = self.inner.delete(state).await;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(start), "deleted"),
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "delete failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    fn as_import_state(&self) -> Option<&dyn ImportState> {
        Some(self)
    }

    fn as_modify_plan(&self) -> Option<&dyn ModifyPlan> {
        Some(self)
    }

    fn as_validate_config(&self) -> Option<&dyn ValidateConfig> {
        Some(self)
    }
}

impl ImportState for TracedResource {
    fn import_state(&self, id: &str) -> Result<ResourceData, LifecycleError> {
        let _span = tracing::info_span!("resource.import", type_name = %self.type_name, id).entered();

        let Some(importer) = self.inner.as_import_state() else {
            tracing::error!("import not implemented");
            return Err(LifecycleError::new(
                Action::Importing,
                self.type_name.as_str(),
                id,
                Unsupported {
                    capability: "import",
                    resource_type: self.type_name.clone(),
                },
            ));
        };

        let result = importer.import_state(id);
        match &result {
            Ok(_) => tracing::info!("imported"),
            Err(e) => tracing::error!(error = %e, "import failed"),
        }
        result
    }
}

impl ModifyPlan for TracedResource {
    fn modify_plan(&self, plan: &mut ResourceData) -> Result<(), LifecycleError> {
        match self.inner.as_modify_plan() {
            Some(modifier) => {
                let result = modifier.modify_plan(plan);
                tracing::trace!(type_name = %self.type_name, ok = result.is_ok(), "plan modified");
                result
            }
            None => Ok(()),
        }
    }
}

impl ValidateConfig for TracedResource {
    fn validate_config(&self, config: &ResourceData) -> Result<(), LifecycleError> {
        match self.inner.as_validate_config() {
            Some(validator) => {
                let result = validator.validate_config(config);
                if let Err(e) = &result {
                    tracing::warn!(type_name = %self.type_name, error = %e, "invalid configuration");
                }
                result
            }
            None => Ok(()),
        }
    }
}

/// Wrapper that adds tracing to any DataSource
#[derive(Clone)]
pub struct TracedDataSource {
    inner: Arc<dyn DataSource>,
    type_name: String,
}

impl TracedDataSource {
    pub fn new(inner: Arc<dyn DataSource>) -> Self {
        let type_name = inner.type_name().to_string();
        Self { inner, type_name }
    }
}

#[async_trait]
impl DataSource for TracedDataSource {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    async fn read(&self, config: ResourceData) -> Result<ResourceData, LifecycleError> {
        let span = tracing::info_span!(
            "data_source.read",
            type_name = %self.type_name,
            id = %config.label()
        );

        async {
            let start = Instant::now();
            let result = self.inner.read(config).await;
            match &result {
                Ok(_) => tracing::debug!(elapsed_ms = elapsed_ms(start), "read"),
                Err(e) => tracing::error!(elapsed_ms = elapsed_ms(start), error = %e, "read failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
