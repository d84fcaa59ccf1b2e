// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! settle-core: polling convergence on remote resource state
//!
//! This crate provides:
//! - The state-change waiter (pending/target sets, not-found tolerance,
//!   hysteresis, timeout and cancellation)
//! - Probe and refresh abstractions for observing a resource
//! - Poll cadence policies and waiter/timeout configuration
//! - Injectable clocks and a scripted refresh for replaying traces

pub mod clock;
pub mod config;
pub mod poll;
pub mod probe;
pub mod script;
pub mod status;
pub mod waiter;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, TimeoutOverrides, Timeouts, WaiterSettings};
pub use poll::{Intervals, PollPolicy};
pub use probe::{BoxError, Probe, Refresh};
pub use script::{Observation, ScriptedFailure, ScriptedRefresh, Step, StepParseError};
pub use status::{StateSet, Status};
pub use waiter::{Converged, StateChangeConf, WaitError, DEFAULT_NOT_FOUND_CHECKS};
pub use tokio_util::sync::CancellationToken;
