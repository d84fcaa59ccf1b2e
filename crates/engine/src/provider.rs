// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch layer: routes lifecycle calls to handlers by type name

use crate::data::ResourceData;
use crate::error::{Action, DataError, LifecycleError, ProviderError, RegistryError};
use crate::registry::{ProviderMeta, Registry};
use crate::resource::{DataSource, ImportState, ModifyPlan, Resource, ValidateConfig};
use crate::traced::{Capabilities, TracedDataSource, TracedResource};
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

/// Kind of a registered type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeKind {
    Resource,
    DataSource,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Resource => "resource",
            TypeKind::DataSource => "data source",
        }
    }
}

/// One instantiated handler, as listed by [`Provider::types`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub kind: TypeKind,
    pub type_name: String,
    pub package: &'static str,
    pub capabilities: Capabilities,
}

/// Instantiated handlers, each wrapped in its traced decorator
pub struct Provider {
    resources: BTreeMap<String, (&'static str, TracedResource)>,
    data_sources: BTreeMap<String, (&'static str, TracedDataSource)>,
    cancel: CancellationToken,
}

impl Provider {
    /// Instantiate every registered handler
    ///
    /// A factory that fails is logged and skipped; its type is then unknown
    /// to this provider.
    pub fn new<A, C>(registry: &Registry<A, C>, meta: &ProviderMeta<A, C>) -> Self {
        let mut resources = BTreeMap::new();
        for (package, registration) in registry.resource_registrations() {
            match (registration.factory)(meta) {
                Ok(resource) => {
                    resources.insert(
                        registration.type_name.to_string(),
                        (package, TracedResource::new(resource)),
                    );
                }
                Err(e) => tracing::warn!(
                    package,
                    type_name = registration.type_name,
                    error = %e,
                    "creating resource failed, skipping"
                ),
            }
        }

        let mut data_sources = BTreeMap::new();
        for (package, registration) in registry.data_source_registrations() {
            match (registration.factory)(meta) {
                Ok(data_source) => {
                    data_sources.insert(
                        registration.type_name.to_string(),
                        (package, TracedDataSource::new(data_source)),
                    );
                }
                Err(e) => tracing::warn!(
                    package,
                    type_name = registration.type_name,
                    error = %e,
                    "creating data source failed, skipping"
                ),
            }
        }

        tracing::info!(
            resources = resources.len(),
            data_sources = data_sources.len(),
            "provider ready"
        );

        Self {
            resources,
            data_sources,
            cancel: meta.cancel.clone(),
        }
    }

    /// Every instantiated type, resources first, sorted by name
    pub fn types(&self) -> Vec<TypeInfo> {
        let resources = self.resources.iter().map(|(name, (package, r))| TypeInfo {
            kind: TypeKind::Resource,
            type_name: name.clone(),
            package: *package,
            capabilities: r.capabilities(),
        });
        let data_sources = self.data_sources.iter().map(|(name, (package, _))| TypeInfo {
            kind: TypeKind::DataSource,
            type_name: name.clone(),
            package: *package,
            capabilities: Capabilities::default(),
        });
        resources.chain(data_sources).collect()
    }

    pub fn resource(&self, type_name: &str) -> Result<&TracedResource, RegistryError> {
        self.resources
            .get(type_name)
            .map(|(_, r)| r)
            .ok_or_else(|| RegistryError::UnknownResource(type_name.to_string()))
    }

    pub fn data_source(&self, type_name: &str) -> Result<&TracedDataSource, RegistryError> {
        self.data_sources
            .get(type_name)
            .map(|(_, d)| d)
            .ok_or_else(|| RegistryError::UnknownDataSource(type_name.to_string()))
    }

    pub fn validate(&self, type_name: &str, config: &ResourceData) -> Result<(), ProviderError> {
        Ok(self.resource(type_name)?.validate_config(config)?)
    }

    /// Validate a configuration and fill in computed plan values (tags_all)
    pub fn plan(&self, type_name: &str, mut config: ResourceData) -> Result<ResourceData, ProviderError> {
        let resource = self.resource(type_name)?;
        resource.validate_config(&config)?;
        resource.modify_plan(&mut config)?;
        Ok(config)
    }

    pub async fn create(
        &self,
        type_name: &str,
        config: ResourceData,
    ) -> Result<ResourceData, ProviderError> {
        let plan = self.plan(type_name, config)?;
        Ok(self.resource(type_name)?.create(plan).await?)
    }

    /// Refresh state; `None` means the resource is gone and should be forgotten
    pub async fn read(
        &self,
        type_name: &str,
        state: ResourceData,
    ) -> Result<Option<ResourceData>, ProviderError> {
        Ok(self.resource(type_name)?.read(state).await?)
    }

    pub async fn update(
        &self,
        type_name: &str,
        config: ResourceData,
        state: ResourceData,
    ) -> Result<ResourceData, ProviderError> {
        let plan = self.plan(type_name, config)?;
        Ok(self.resource(type_name)?.update(plan, state).await?)
    }

    pub async fn delete(&self, type_name: &str, state: ResourceData) -> Result<(), ProviderError> {
        Ok(self.resource(type_name)?.delete(state).await?)
    }

    /// Adopt an existing remote object: parse the import id, then read it
    pub async fn import(&self, type_name: &str, id: &str) -> Result<ResourceData, ProviderError> {
        let resource = self.resource(type_name)?;
        let state = resource.import_state(id)?;
        match resource.read(state).await? {
            Some(state) => Ok(state),
            None => Err(LifecycleError::new(
                Action::Importing,
                type_name,
                id,
                DataError::NonExistent,
            )
            .into()),
        }
    }

    pub async fn read_data(
        &self,
        type_name: &str,
        config: ResourceData,
    ) -> Result<ResourceData, ProviderError> {
        Ok(self.data_source(type_name)?.read(config).await?)
    }

    /// Abort every in-flight wait
    pub fn shutdown(&self) {
        tracing::info!("provider shutting down");
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
