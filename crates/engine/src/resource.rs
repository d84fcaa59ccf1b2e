// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource and data-source capability traits
//!
//! Every resource implements the four lifecycle operations. Import, plan
//! modification and config validation are optional: a resource exposes them
//! by overriding the matching `as_*` accessor.

use crate::data::ResourceData;
use crate::error::LifecycleError;
use async_trait::async_trait;

/// A managed resource type
#[async_trait]
pub trait Resource: Send + Sync {
    fn type_name(&self) -> &str;

    /// Create the resource and wait until it is usable
    async fn create(&self, plan: ResourceData) -> Result<ResourceData, LifecycleError>;

    /// Refresh stored state; `None` means the resource no longer exists
    async fn read(&self, state: ResourceData) -> Result<Option<ResourceData>, LifecycleError>;

    /// Apply `plan` over `state` and wait until the change settles
    async fn update(
        &self,
        plan: ResourceData,
        state: ResourceData,
    ) -> Result<ResourceData, LifecycleError>;

    /// Delete the resource and wait until it is gone
    async fn delete(&self, state: ResourceData) -> Result<(), LifecycleError>;

    fn as_import_state(&self) -> Option<&dyn ImportState> {
        None
    }

    fn as_modify_plan(&self) -> Option<&dyn ModifyPlan> {
        None
    }

    fn as_validate_config(&self) -> Option<&dyn ValidateConfig> {
        None
    }
}

/// Build initial state from an operator-supplied import identifier
pub trait ImportState: Send + Sync {
    fn import_state(&self, id: &str) -> Result<ResourceData, LifecycleError>;
}

/// Adjust a plan before it is applied
pub trait ModifyPlan: Send + Sync {
    fn modify_plan(&self, plan: &mut ResourceData) -> Result<(), LifecycleError>;
}

/// Reject configuration before any remote call
pub trait ValidateConfig: Send + Sync {
    fn validate_config(&self, config: &ResourceData) -> Result<(), LifecycleError>;
}

/// A read-only lookup of remote objects
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &str;

    async fn read(&self, config: ResourceData) -> Result<ResourceData, LifecycleError>;
}
