// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Lifecycle operations and type dispatch for managed resources

pub mod bedrock;
mod config;
mod data;
mod error;
mod provider;
mod registry;
mod resource;
mod tags;
#[cfg(test)]
mod test_logs;
mod traced;

pub use config::ProviderConfig;
pub use data::ResourceData;
pub use error::{Action, DataError, LifecycleError, ProviderError, RegistryError, Unsupported};
pub use provider::{Provider, TypeInfo, TypeKind};
pub use registry::{
    DataSourceFactory, DataSourceRegistration, FactoryError, ProviderMeta, Registry,
    ResourceFactory, ResourceRegistration, ServicePackage,
};
pub use resource::{DataSource, ImportState, ModifyPlan, Resource, ValidateConfig};
pub use tags::{IgnoreTags, TagDiff, TagPolicy, Tags};
pub use traced::{Capabilities, TracedDataSource, TracedResource};

use settle_adapters::GuardrailApi;
use settle_core::Clock;

/// Service packages compiled into this build
pub fn default_packages<A: GuardrailApi, C: Clock + 'static>() -> Vec<Box<dyn ServicePackage<A, C>>>
{
    vec![Box::new(bedrock::BedrockPackage)]
}
