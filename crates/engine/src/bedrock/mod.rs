// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bedrock service package

mod guardrail;

pub use guardrail::{GuardrailDataSource, GuardrailResource, GUARDRAIL_TYPE};

use crate::registry::{DataSourceRegistration, ResourceRegistration, ServicePackage};
use crate::resource::{DataSource, Resource};
use settle_adapters::GuardrailApi;
use settle_core::Clock;
use std::sync::Arc;

pub struct BedrockPackage;

impl<A: GuardrailApi, C: Clock + 'static> ServicePackage<A, C> for BedrockPackage {
    fn name(&self) -> &'static str {
        "bedrock"
    }

    fn resources(&self) -> Vec<ResourceRegistration<A, C>> {
        vec![ResourceRegistration::new(GUARDRAIL_TYPE, |meta| {
            let resource: Arc<dyn Resource> = Arc::new(GuardrailResource::new(meta));
            Ok(resource)
        })]
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<A, C>> {
        vec![DataSourceRegistration::new(GUARDRAIL_TYPE, |meta| {
            let data_source: Arc<dyn DataSource> = Arc::new(GuardrailDataSource::new(meta));
            Ok(data_source)
        })]
    }
}
