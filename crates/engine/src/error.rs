// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for lifecycle operations and dispatch

use settle_core::BoxError;
use std::fmt;
use thiserror::Error;

/// Step of a lifecycle operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Creating,
    WaitingForCreation,
    Updating,
    WaitingForUpdate,
    UpdatingTags,
    Deleting,
    WaitingForDeletion,
    Reading,
    Setting,
    Importing,
    Validating,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Creating => "creating",
            Action::WaitingForCreation => "waiting for creation",
            Action::Updating => "updating",
            Action::WaitingForUpdate => "waiting for update",
            Action::UpdatingTags => "updating tags",
            Action::Deleting => "deleting",
            Action::WaitingForDeletion => "waiting for deletion",
            Action::Reading => "reading",
            Action::Setting => "setting",
            Action::Importing => "importing",
            Action::Validating => "validating",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing failure of a lifecycle operation
///
/// Names the step, the resource type and the identifier (or name, before the
/// service has assigned an identifier). The underlying cause is chained as
/// `source`.
#[derive(Debug, Error)]
#[error("{action} {resource_type} ({id}): {source}")]
pub struct LifecycleError {
    pub action: Action,
    pub resource_type: String,
    pub id: String,
    #[source]
    pub source: BoxError,
}

impl LifecycleError {
    pub fn new(
        action: Action,
        resource_type: impl Into<String>,
        id: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            id: id.into(),
            source: source.into(),
        }
    }

    /// Whether the chained cause is of type `E`
    pub fn is_caused_by<E: std::error::Error + 'static>(&self) -> bool {
        self.source.downcast_ref::<E>().is_some()
    }
}

/// Problems with the attributes handed to a resource
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("resource has no id")]
    MissingId,
    #[error("missing required attribute \"{0}\"")]
    MissingAttribute(&'static str),
    #[error("invalid value for \"{attribute}\": {message}")]
    InvalidAttribute {
        attribute: &'static str,
        message: String,
    },
    #[error("unexpected format for import ID ({id}), use: \"{expected}\"")]
    InvalidImportId { id: String, expected: &'static str },
    #[error("cannot import non-existent remote object")]
    NonExistent,
}

/// An optional capability the resource does not provide
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{capability} not implemented for {resource_type}")]
pub struct Unsupported {
    pub capability: &'static str,
    pub resource_type: String,
}

/// Errors from building or querying the type registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate resource type {type_name} (packages {first} and {second})")]
    DuplicateResource {
        type_name: String,
        first: String,
        second: String,
    },
    #[error("duplicate data source type {type_name} (packages {first} and {second})")]
    DuplicateDataSource {
        type_name: String,
        first: String,
        second: String,
    },
    #[error("unknown resource type: {0}")]
    UnknownResource(String),
    #[error("unknown data source type: {0}")]
    UnknownDataSource(String),
}

/// Errors surfaced by the provider dispatch layer
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
