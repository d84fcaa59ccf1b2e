// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! settle - watch remote resources converge

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{replay, types};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `settle_core=debug`)
const LOG_ENV: &str = "SETTLE_LOG";

#[derive(Parser)]
#[command(
    name = "settle",
    version,
    about = "settle - polling convergence on remote resource state"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded status trace through the waiter
    ///
    /// Exits 0 when the wait converges and 2 when it fails.
    Replay(replay::ReplayArgs),
    /// List registered resource and data source types
    Types(types::TypesArgs),
}

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging();

    match cli.command {
        Commands::Replay(args) => replay::replay(args).await,
        Commands::Types(args) => {
            types::types(args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
