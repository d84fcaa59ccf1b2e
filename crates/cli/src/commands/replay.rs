// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `settle replay <trace>` - Replay a recorded status trace through the waiter
//!
//! A trace is a TOML document describing one wait and the probe outcomes it
//! saw:
//!
//! ```toml
//! pending = ["CREATING"]
//! target = ["READY"]
//! timeout = "5s"
//! continuous_target_occurrence = 2
//! steps = ["-", "-", "CREATING", "CREATING", "READY", "READY"]
//!
//! [poll]
//! kind = "fixed"
//! interval = "1s"
//! ```
//!
//! Waiter tunables (`not_found_checks`, `delay`, `poll`, ...) default to the
//! same values a live wait uses.

use crate::output::{self, OutputFormat};
use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use settle_core::{
    CancellationToken, Clock, Converged, FakeClock, Observation, ScriptedRefresh,
    StateChangeConf, Status, Step, SystemClock, WaitError, WaiterSettings,
};
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Exit status when the replayed wait does not converge
pub const NOT_CONVERGED: u8 = 2;

#[derive(Args)]
pub struct ReplayArgs {
    /// Trace file (TOML)
    pub trace: PathBuf,

    /// Override the timeout from the trace (e.g. "30s", "2m")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Sleep for real between polls instead of advancing a virtual clock
    #[arg(long)]
    pub real_time: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One recorded wait
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub pending: Vec<Status>,
    /// Empty means the wait expects the resource to disappear
    #[serde(default)]
    pub target: Vec<Status>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(flatten)]
    pub waiter: WaiterSettings,
    pub steps: Vec<Step>,
}

impl Trace {
    pub fn parse(content: &str) -> Result<Self> {
        let trace: Trace = toml::from_str(content)?;
        if trace.steps.is_empty() {
            bail!("trace has no steps");
        }
        trace.waiter.validate()?;
        Ok(trace)
    }

    /// Run the trace to completion against `clock`
    pub async fn run<C: Clock>(&self, clock: &C, cancel: &CancellationToken) -> Report {
        let refresh = ScriptedRefresh::new(self.steps.clone());
        let conf = StateChangeConf::new(refresh.clone(), self.timeout)
            .with_pending(self.pending.clone())
            .with_target(self.target.clone())
            .with_settings(&self.waiter);

        let started = clock.now();
        let result = conf.wait(clock, cancel).await;
        let elapsed = clock.now().saturating_duration_since(started);

        Report::new(result, refresh.polls(), elapsed, refresh.history())
    }
}

/// How a replayed wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Converged,
    Absent,
    Timeout,
    NotFound,
    UnexpectedStatus,
    ProbeFailed,
    Cancelled,
}

impl Outcome {
    fn of(result: &Result<Converged<Observation>, WaitError<Observation>>) -> Self {
        match result {
            Ok(Converged::Snapshot(_)) => Outcome::Converged,
            Ok(Converged::Absent) => Outcome::Absent,
            Err(WaitError::Timeout { .. }) => Outcome::Timeout,
            Err(WaitError::NotFound { .. }) => Outcome::NotFound,
            Err(WaitError::UnexpectedStatus { .. }) => Outcome::UnexpectedStatus,
            Err(WaitError::Probe(_)) => Outcome::ProbeFailed,
            Err(WaitError::Cancelled { .. }) => Outcome::Cancelled,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Converged | Outcome::Absent)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Converged => "converged",
            Outcome::Absent => "converged on absence",
            Outcome::Timeout => "timed out",
            Outcome::NotFound => "not found",
            Outcome::UnexpectedStatus => "unexpected status",
            Outcome::ProbeFailed => "probe failed",
            Outcome::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub outcome: Outcome,
    pub polls: u32,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    /// Last status any probe reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub history: Vec<Step>,
}

impl Report {
    fn new(
        result: Result<Converged<Observation>, WaitError<Observation>>,
        polls: u32,
        elapsed: Duration,
        history: Vec<Step>,
    ) -> Self {
        let last_status = history.iter().rev().find_map(|step| match step {
            Step::Status(status) => Some(status.clone()),
            _ => None,
        });
        Self {
            outcome: Outcome::of(&result),
            polls,
            elapsed,
            last_status,
            error: result.err().map(|e| e.to_string()),
            history,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} polls in {}",
            self.outcome.as_str(),
            self.polls,
            humantime::format_duration(self.elapsed)
        )?;
        if let Some(status) = &self.last_status {
            write!(f, " (last state: {})", status)?;
        }
        if let Some(error) = &self.error {
            write!(f, "\nerror: {}", error)?;
        }
        let steps: Vec<String> = self.history.iter().map(Step::to_string).collect();
        write!(f, "\nprobes: {}", steps.join(" "))
    }
}

pub async fn replay(args: ReplayArgs) -> Result<ExitCode> {
    let content = std::fs::read_to_string(&args.trace)
        .with_context(|| format!("failed to read trace {}", args.trace.display()))?;
    let mut trace = Trace::parse(&content)
        .with_context(|| format!("invalid trace {}", args.trace.display()))?;
    if let Some(timeout) = args.timeout {
        trace.timeout = timeout;
    }

    let report = if args.real_time {
        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });
        trace.run(&SystemClock, &cancel).await
    } else {
        trace.run(&FakeClock::new(), &CancellationToken::new()).await
    };

    tracing::info!(outcome = ?report.outcome, polls = report.polls, "replay finished");
    output::print(&report, args.format);

    Ok(if report.outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(NOT_CONVERGED)
    })
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
