// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Type registry populated from service packages
//!
//! Each service package lists the resources and data sources it provides by
//! type name, with a factory that builds the handler from shared provider
//! metadata. The registry is assembled once at start and is read-only after.

use crate::config::ProviderConfig;
use crate::error::RegistryError;
use crate::resource::{DataSource, Resource};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Shared state handed to every factory
#[derive(Clone)]
pub struct ProviderMeta<A, C> {
    /// Transport client, shared by every handler
    pub api: A,
    pub clock: C,
    /// Fires when the provider shuts down; aborts in-flight waits
    pub cancel: CancellationToken,
    pub config: ProviderConfig,
}

impl<A, C> ProviderMeta<A, C> {
    pub fn new(api: A, clock: C, config: ProviderConfig) -> Self {
        Self {
            api,
            clock,
            cancel: CancellationToken::new(),
            config,
        }
    }
}

/// A factory could not build its handler
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FactoryError(pub String);

pub type ResourceFactory<A, C> =
    Arc<dyn Fn(&ProviderMeta<A, C>) -> Result<Arc<dyn Resource>, FactoryError> + Send + Sync>;
pub type DataSourceFactory<A, C> =
    Arc<dyn Fn(&ProviderMeta<A, C>) -> Result<Arc<dyn DataSource>, FactoryError> + Send + Sync>;

pub struct ResourceRegistration<A, C> {
    pub type_name: &'static str,
    pub factory: ResourceFactory<A, C>,
}

impl<A, C> ResourceRegistration<A, C> {
    pub fn new<F>(type_name: &'static str, factory: F) -> Self
    where
        F: Fn(&ProviderMeta<A, C>) -> Result<Arc<dyn Resource>, FactoryError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            type_name,
            factory: Arc::new(factory),
        }
    }
}

impl<A, C> Clone for ResourceRegistration<A, C> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            factory: Arc::clone(&self.factory),
        }
    }
}

pub struct DataSourceRegistration<A, C> {
    pub type_name: &'static str,
    pub factory: DataSourceFactory<A, C>,
}

impl<A, C> DataSourceRegistration<A, C> {
    pub fn new<F>(type_name: &'static str, factory: F) -> Self
    where
        F: Fn(&ProviderMeta<A, C>) -> Result<Arc<dyn DataSource>, FactoryError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            type_name,
            factory: Arc::new(factory),
        }
    }
}

impl<A, C> Clone for DataSourceRegistration<A, C> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            factory: Arc::clone(&self.factory),
        }
    }
}

/// A named group of registrations
pub trait ServicePackage<A, C>: Send + Sync {
    fn name(&self) -> &'static str;

    fn resources(&self) -> Vec<ResourceRegistration<A, C>>;

    fn data_sources(&self) -> Vec<DataSourceRegistration<A, C>> {
        Vec::new()
    }
}

struct Entry<R> {
    package: &'static str,
    registration: R,
}

/// Type name -> factory, for resources and data sources separately
pub struct Registry<A, C> {
    resources: BTreeMap<&'static str, Entry<ResourceRegistration<A, C>>>,
    data_sources: BTreeMap<&'static str, Entry<DataSourceRegistration<A, C>>>,
}

impl<A, C> Default for Registry<A, C> {
    fn default() -> Self {
        Self {
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        }
    }
}

impl<A, C> Registry<A, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every package, rejecting duplicate type names
    pub fn from_packages<I>(packages: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Box<dyn ServicePackage<A, C>>>,
    {
        let mut registry = Self::new();
        for package in packages {
            registry.register(package.as_ref())?;
        }
        Ok(registry)
    }

    /// Add one package; nothing is added if any of its names is taken
    pub fn register(&mut self, package: &dyn ServicePackage<A, C>) -> Result<(), RegistryError> {
        let name = package.name();
        let resources = package.resources();
        let data_sources = package.data_sources();

        let mut seen = BTreeMap::new();
        for registration in &resources {
            let taken = self
                .resources
                .get(registration.type_name)
                .map(|e| e.package)
                .or_else(|| seen.insert(registration.type_name, name));
            if let Some(first) = taken {
                return Err(RegistryError::DuplicateResource {
                    type_name: registration.type_name.to_string(),
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }

        let mut seen = BTreeMap::new();
        for registration in &data_sources {
            let taken = self
                .data_sources
                .get(registration.type_name)
                .map(|e| e.package)
                .or_else(|| seen.insert(registration.type_name, name));
            if let Some(first) = taken {
                return Err(RegistryError::DuplicateDataSource {
                    type_name: registration.type_name.to_string(),
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }

        for registration in resources {
            tracing::debug!(package = name, type_name = registration.type_name, "registered resource");
            self.resources.insert(
                registration.type_name,
                Entry {
                    package: name,
                    registration,
                },
            );
        }
        for registration in data_sources {
            tracing::debug!(package = name, type_name = registration.type_name, "registered data source");
            self.data_sources.insert(
                registration.type_name,
                Entry {
                    package: name,
                    registration,
                },
            );
        }

        Ok(())
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    /// Registered data source type names, sorted
    pub fn data_source_types(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    /// Package that registered a resource type
    pub fn resource_package(&self, type_name: &str) -> Option<&'static str> {
        self.resources.get(type_name).map(|e| e.package)
    }

    pub(crate) fn resource_registrations(
        &self,
    ) -> impl Iterator<Item = (&'static str, &ResourceRegistration<A, C>)> {
        self.resources
            .values()
            .map(|e| (e.package, &e.registration))
    }

    pub(crate) fn data_source_registrations(
        &self,
    ) -> impl Iterator<Item = (&'static str, &DataSourceRegistration<A, C>)> {
        self.data_sources
            .values()
            .map(|e| (e.package, &e.registration))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
