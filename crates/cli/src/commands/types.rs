// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `settle types` - List registered resource and data source types

use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use settle_adapters::NoOpGuardrailApi;
use settle_core::SystemClock;
use settle_engine::{default_packages, Provider, ProviderConfig, ProviderMeta, Registry, TypeInfo};
use std::fmt;

#[derive(Args)]
pub struct TypesArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One line of the listing
#[derive(Debug, Serialize)]
pub struct TypeRow {
    pub kind: &'static str,
    pub type_name: String,
    pub package: &'static str,
    pub capabilities: Vec<&'static str>,
}

impl From<TypeInfo> for TypeRow {
    fn from(info: TypeInfo) -> Self {
        Self {
            kind: info.kind.as_str(),
            type_name: info.type_name,
            package: info.package,
            capabilities: info.capabilities.names(),
        }
    }
}

impl fmt::Display for TypeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capabilities = if self.capabilities.is_empty() {
            "-".to_string()
        } else {
            self.capabilities.join(",")
        };
        write!(
            f,
            "{:<12} {:<28} {:<10} {}",
            self.kind, self.type_name, self.package, capabilities
        )
    }
}

/// Instantiate every compiled-in package without a transport and list it
pub fn rows() -> Result<Vec<TypeRow>> {
    let registry = Registry::from_packages(default_packages::<NoOpGuardrailApi, SystemClock>())?;
    let meta = ProviderMeta::new(NoOpGuardrailApi, SystemClock, ProviderConfig::default());
    let provider = Provider::new(&registry, &meta);
    Ok(provider.types().into_iter().map(TypeRow::from).collect())
}

pub fn types(args: TypesArgs) -> Result<()> {
    let rows = rows()?;
    if args.format == OutputFormat::Text && !rows.is_empty() {
        println!(
            "{:<12} {:<28} {:<10} CAPABILITIES",
            "KIND", "TYPE", "PACKAGE"
        );
    }
    output::print_list(&rows, args.format, "No registered types");
    Ok(())
}
