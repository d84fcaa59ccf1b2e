// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guardrail resource and data source
//!
//! Every mutating call returns while the guardrail is still transitioning, so
//! each operation waits on the status reported by `get_guardrail`:
//!
//! | operation | pending              | target  | not-found checks | stable reads |
//! |-----------|----------------------|---------|------------------|--------------|
//! | create    | CREATING             | READY   | 20               | 2            |
//! | update    | UPDATING             | READY   | 20               | 2            |
//! | delete    | DELETING, READY      | (gone)  | n/a              | 1            |

use crate::data::ResourceData;
use crate::error::{Action, DataError, LifecycleError};
use crate::registry::ProviderMeta;
use crate::resource::{DataSource, ImportState, ModifyPlan, Resource, ValidateConfig};
use crate::tags::{TagDiff, TagPolicy};
use async_trait::async_trait;
use settle_adapters::guardrail::status;
use settle_adapters::{
    ApiError, Guardrail, GuardrailApi, GuardrailConfig, TracedGuardrailApi, DRAFT_VERSION,
};
use settle_core::{
    CancellationToken, Clock, Probe, Refresh, StateChangeConf, Timeouts, WaitError,
    WaiterSettings,
};
use std::time::Duration;

pub const GUARDRAIL_TYPE: &str = "aws_bedrock_guardrail";

/// Resource name used in error messages
const RESOURCE_NAME: &str = "Bedrock Guardrail";

/// Creation propagates slowly; early reads may not find the guardrail
const PROPAGATION_NOT_FOUND_CHECKS: u32 = 20;
const STABLE_READY_READS: u32 = 2;

const NAME_MAX_LEN: usize = 50;
const DESCRIPTION_MAX_LEN: usize = 200;
const MESSAGING_MAX_LEN: usize = 500;

const IMPORT_ID_FORMAT: &str = "GuardrailId:Version";

/// Probe one guardrail version; "not found" is an absent probe
fn status_refresh<A: GuardrailApi>(api: &A, id: &str, version: &str) -> impl Refresh<Guardrail> {
    let api = api.clone();
    let id = id.to_string();
    let version = version.to_string();
    move || {
        let api = api.clone();
        let id = id.clone();
        let version = version.clone();
        async move {
            let lookup = match api.get_guardrail(&id, &version).await {
                Ok(guardrail) => Ok(Some(guardrail)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            };
            Probe::from_lookup(lookup, |g| g.status.clone())
        }
    }
}

/// Updatable attributes from a plan or state
fn config_from(data: &ResourceData) -> Result<GuardrailConfig, DataError> {
    Ok(GuardrailConfig {
        name: data.require_str("name")?.to_string(),
        description: data.get_str("description").map(str::to_string),
        blocked_input_messaging: data.require_str("blocked_input_messaging")?.to_string(),
        blocked_outputs_messaging: data.require_str("blocked_outputs_messaging")?.to_string(),
        kms_key_arn: data.get_str("kms_key_arn").map(str::to_string),
    })
}

/// Copy the service view of a guardrail into `data`
fn write_state(data: &mut ResourceData, guardrail: &Guardrail) {
    data.id = Some(guardrail.id.clone());
    data.set("arn", guardrail.arn.as_str());
    data.set("version", guardrail.version.as_str());
    data.set("status", guardrail.status.as_str());
    data.set("name", guardrail.config.name.as_str());
    data.set("description", guardrail.config.description.clone());
    data.set(
        "blocked_input_messaging",
        guardrail.config.blocked_input_messaging.as_str(),
    );
    data.set(
        "blocked_outputs_messaging",
        guardrail.config.blocked_outputs_messaging.as_str(),
    );
    data.set("kms_key_arn", guardrail.config.kms_key_arn.clone());
}

fn version_of(data: &ResourceData) -> String {
    data.get_str("version").unwrap_or(DRAFT_VERSION).to_string()
}

fn check_len(
    attribute: &'static str,
    value: &str,
    max: usize,
) -> Result<(), DataError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(DataError::InvalidAttribute {
            attribute,
            message: format!("length must be between 1 and {}, got {}", max, len),
        });
    }
    Ok(())
}

/// Managed guardrail
pub struct GuardrailResource<A, C> {
    api: TracedGuardrailApi<A>,
    clock: C,
    cancel: CancellationToken,
    timeouts: Timeouts,
    waiter: WaiterSettings,
    tags: TagPolicy,
}

impl<A: GuardrailApi, C: Clock> GuardrailResource<A, C> {
    pub fn new(meta: &ProviderMeta<A, C>) -> Self {
        Self {
            api: TracedGuardrailApi::new(meta.api.clone()),
            clock: meta.clock.clone(),
            cancel: meta.cancel.clone(),
            timeouts: Timeouts::default().overridden_by(&meta.config.timeouts),
            waiter: meta.config.waiter.clone(),
            tags: meta.config.tag_policy(),
        }
    }

    fn error(
        &self,
        action: Action,
        id: impl Into<String>,
        source: impl Into<settle_core::BoxError>,
    ) -> LifecycleError {
        LifecycleError::new(action, RESOURCE_NAME, id, source)
    }

    fn timeouts_for(&self, data: &ResourceData) -> Timeouts {
        self.timeouts.overridden_by(&data.timeouts)
    }

    async fn wait_ready(
        &self,
        id: &str,
        version: &str,
        pending: &str,
        timeout: Duration,
    ) -> Result<(), WaitError<Guardrail>> {
        StateChangeConf::new(status_refresh(&self.api, id, version), timeout)
            .with_settings(&self.waiter)
            .with_pending([pending])
            .with_target([status::READY])
            .with_not_found_checks(PROPAGATION_NOT_FOUND_CHECKS)
            .with_continuous_target_occurrence(STABLE_READY_READS)
            .wait(&self.clock, &self.cancel)
            .await
            .map(|_| ())
    }

    async fn wait_deleted(
        &self,
        id: &str,
        version: &str,
        timeout: Duration,
    ) -> Result<(), WaitError<Guardrail>> {
        StateChangeConf::new(status_refresh(&self.api, id, version), timeout)
            .with_settings(&self.waiter)
            .with_pending([status::DELETING, status::READY])
            .with_continuous_target_occurrence(1)
            .wait(&self.clock, &self.cancel)
            .await
            .map(|_| ())
    }

    /// Push tag changes between the recorded and planned `tags_all`
    async fn update_tags(&self, id: &str, arn: &str, diff: &TagDiff) -> Result<(), LifecycleError> {
        if !diff.remove.is_empty() {
            self.api
                .untag_resource(arn, &diff.remove)
                .await
                .map_err(|e| self.error(Action::UpdatingTags, id, e))?;
        }
        if !diff.upsert.is_empty() {
            self.api
                .tag_resource(arn, &diff.upsert)
                .await
                .map_err(|e| self.error(Action::UpdatingTags, id, e))?;
        }
        Ok(())
    }

    async fn describe(&self, action: Action, id: &str, version: &str) -> Result<Guardrail, LifecycleError> {
        self.api
            .get_guardrail(id, version)
            .await
            .map_err(|e| self.error(action, id, e))
    }
}

#[async_trait]
impl<A: GuardrailApi, C: Clock + 'static> Resource for GuardrailResource<A, C> {
    fn type_name(&self) -> &str {
        GUARDRAIL_TYPE
    }

    async fn create(&self, mut plan: ResourceData) -> Result<ResourceData, LifecycleError> {
        let name = plan.label();
        let config = config_from(&plan).map_err(|e| self.error(Action::Creating, &name, e))?;
        plan.tags_all = self.tags.tags_all(&plan.tags);

        let created = self
            .api
            .create_guardrail(&config, &plan.tags_all)
            .await
            .map_err(|e| self.error(Action::Creating, &name, e))?;
        plan.id = Some(created.id.clone());
        plan.set("arn", created.arn.as_str());
        plan.set("version", created.version.as_str());

        let timeout = self.timeouts_for(&plan).create;
        self.wait_ready(&created.id, &created.version, status::CREATING, timeout)
            .await
            .map_err(|e| self.error(Action::WaitingForCreation, &name, e))?;

        let current = self
            .describe(Action::Setting, &created.id, &created.version)
            .await?;
        write_state(&mut plan, &current);
        Ok(plan)
    }

    async fn read(&self, mut state: ResourceData) -> Result<Option<ResourceData>, LifecycleError> {
        let id = state
            .require_id()
            .map_err(|e| self.error(Action::Reading, state.label(), e))?
            .to_string();
        let version = version_of(&state);

        match self.api.get_guardrail(&id, &version).await {
            Ok(guardrail) => {
                write_state(&mut state, &guardrail);
                let (tags, tags_all) = self.tags.split_remote(&guardrail.tags);
                state.tags = tags;
                state.tags_all = tags_all;
                Ok(Some(state))
            }
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(self.error(Action::Reading, id, e)),
        }
    }

    async fn update(
        &self,
        mut plan: ResourceData,
        state: ResourceData,
    ) -> Result<ResourceData, LifecycleError> {
        let id = state
            .require_id()
            .map_err(|e| self.error(Action::Updating, state.label(), e))?
            .to_string();
        let version = version_of(&state);
        let desired = config_from(&plan).map_err(|e| self.error(Action::Updating, &id, e))?;
        plan.id = Some(id.clone());
        plan.tags_all = self.tags.tags_all(&plan.tags);

        if config_from(&state).ok().as_ref() != Some(&desired) {
            let updated = self
                .api
                .update_guardrail(&id, &desired)
                .await
                .map_err(|e| self.error(Action::Updating, &id, e))?;
            plan.set("arn", updated.arn.as_str());
        } else {
            tracing::debug!(id = %id, "no updatable attribute changed");
        }

        let diff = TagDiff::between(&state.tags_all, &plan.tags_all);
        if !diff.is_empty() {
            let arn = plan
                .get_str("arn")
                .or_else(|| state.get_str("arn"))
                .map(str::to_string)
                .ok_or_else(|| {
                    self.error(Action::UpdatingTags, &id, DataError::MissingAttribute("arn"))
                })?;
            self.update_tags(&id, &arn, &diff).await?;
        }

        // Still wait: a previous update may not have settled
        let timeout = self.timeouts_for(&plan).update;
        self.wait_ready(&id, &version, status::UPDATING, timeout)
            .await
            .map_err(|e| self.error(Action::WaitingForUpdate, &id, e))?;

        let current = self.describe(Action::Setting, &id, &version).await?;
        write_state(&mut plan, &current);
        Ok(plan)
    }

    async fn delete(&self, state: ResourceData) -> Result<(), LifecycleError> {
        let id = state
            .require_id()
            .map_err(|e| self.error(Action::Deleting, state.label(), e))?
            .to_string();
        let version = version_of(&state);

        match self.api.delete_guardrail(&id).await {
            Ok(()) => {}
            Err(ApiError::NotFound(_)) => {
                tracing::debug!(id = %id, "guardrail already gone");
                return Ok(());
            }
            Err(e) => return Err(self.error(Action::Deleting, id, e)),
        }

        let timeout = self.timeouts_for(&state).delete;
        self.wait_deleted(&id, &version, timeout)
            .await
            .map_err(|e| self.error(Action::WaitingForDeletion, &id, e))
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

impl<A: GuardrailApi, C: Clock> ImportState for GuardrailResource<A, C> {
    fn import_state(&self, id: &str) -> Result<ResourceData, LifecycleError> {
        let invalid = || DataError::InvalidImportId {
            id: id.to_string(),
            expected: IMPORT_ID_FORMAT,
        };
        let (guardrail_id, version) = id
            .split_once(':')
            .filter(|(g, v)| !g.is_empty() && !v.is_empty() && !v.contains(':'))
            .ok_or_else(|| self.error(Action::Importing, id, invalid()))?;

        Ok(ResourceData::new()
            .with_id(guardrail_id)
            .with_attr("version", version))
    }
}

impl<A: GuardrailApi, C: Clock> ModifyPlan for GuardrailResource<A, C> {
    fn modify_plan(&self, plan: &mut ResourceData) -> Result<(), LifecycleError> {
        plan.tags_all = self.tags.tags_all(&plan.tags);
        Ok(())
    }
}

impl<A: GuardrailApi, C: Clock> ValidateConfig for GuardrailResource<A, C> {
    fn validate_config(&self, config: &ResourceData) -> Result<(), LifecycleError> {
        let validate = || -> Result<(), DataError> {
            let parsed = config_from(config)?;

            check_len("name", &parsed.name, NAME_MAX_LEN)?;
            if !parsed
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(DataError::InvalidAttribute {
                    attribute: "name",
                    message: "may only contain letters, digits, hyphens and underscores"
                        .to_string(),
                });
            }
            if let Some(description) = &parsed.description {
                check_len("description", description, DESCRIPTION_MAX_LEN)?;
            }
            check_len(
                "blocked_input_messaging",
                &parsed.blocked_input_messaging,
                MESSAGING_MAX_LEN,
            )?;
            check_len(
                "blocked_outputs_messaging",
                &parsed.blocked_outputs_messaging,
                MESSAGING_MAX_LEN,
            )?;
            Ok(())
        };

        validate().map_err(|e| self.error(Action::Validating, config.label(), e))
    }
}

/// Lookup of an existing guardrail version
pub struct GuardrailDataSource<A> {
    api: TracedGuardrailApi<A>,
    tags: TagPolicy,
}

impl<A: GuardrailApi> GuardrailDataSource<A> {
    pub fn new<C>(meta: &ProviderMeta<A, C>) -> Self {
        Self {
            api: TracedGuardrailApi::new(meta.api.clone()),
            tags: meta.config.tag_policy(),
        }
    }
}

#[async_trait]
impl<A: GuardrailApi> DataSource for GuardrailDataSource<A> {
    fn type_name(&self) -> &str {
        GUARDRAIL_TYPE
    }

    async fn read(&self, mut config: ResourceData) -> Result<ResourceData, LifecycleError> {
        let id = config
            .require_id()
            .map_err(|e| LifecycleError::new(Action::Reading, RESOURCE_NAME, config.label(), e))?
            .to_string();
        let version = version_of(&config);

        let guardrail = self
            .api
            .get_guardrail(&id, &version)
            .await
            .map_err(|e| LifecycleError::new(Action::Reading, RESOURCE_NAME, &id, e))?;

        write_state(&mut config, &guardrail);
        config.tags_all = self.tags.split_remote(&guardrail.tags).1;
        config.tags = config.tags_all.clone();
        Ok(config)
    }
}

#[cfg(test)]
#[path = "guardrail_tests.rs"]
mod tests;
