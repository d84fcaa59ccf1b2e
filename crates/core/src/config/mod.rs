// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration modules

mod timeouts;
mod waiter;

pub use timeouts::{TimeoutOverrides, Timeouts};
pub use waiter::WaiterSettings;

use thiserror::Error;

/// Errors from loading configuration documents
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}
