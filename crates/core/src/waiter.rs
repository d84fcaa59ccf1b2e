// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State-change waiter
//!
//! Polls a [`Refresh`] until the remote resource converges on a target
//! status, the resource disappears (empty target), or the wait fails.
//!
//! ## Loop
//!
//! 1. Stop with [`WaitError::Timeout`] once the deadline has passed, or with
//!    [`WaitError::Cancelled`] when the token fires.
//! 2. Probe once and classify:
//!    - failure: fatal, returned as-is
//!    - absent: counts toward `not_found_checks`; with an empty target it
//!      counts toward convergence instead
//!    - pending status: resets the target streak
//!    - target status: extends the target streak
//!    - anything else: [`WaitError::UnexpectedStatus`]
//! 3. Succeed once the streak reaches `continuous_target_occurrence`.
//! 4. Sleep the next poll interval, clamped to the remaining budget. When no
//!    budget remains the wait times out rather than probing again.
//!
//! Probes never overlap; all invocation state lives on the stack of one
//! `wait` call.

use crate::clock::{Clock, SystemClock};
use crate::config::WaiterSettings;
use crate::poll::PollPolicy;
use crate::probe::{BoxError, Probe, Refresh};
use crate::status::{StateSet, Status};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Default number of consecutive "not found" probes tolerated
pub const DEFAULT_NOT_FOUND_CHECKS: u32 = 20;

/// Successful end of a wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converged<T> {
    /// Snapshot from the final target-status probe
    Snapshot(T),
    /// Resource is gone (empty target)
    Absent,
}

impl<T> Converged<T> {
    pub fn into_snapshot(self) -> Option<T> {
        match self {
            Converged::Snapshot(snapshot) => Some(snapshot),
            Converged::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Converged::Absent)
    }
}

/// Why a wait did not converge
#[derive(Debug, Error)]
pub enum WaitError<T> {
    #[error("status probe failed: {0}")]
    Probe(#[source] BoxError),

    #[error("{}", describe_not_found(.checks, .last_status))]
    NotFound {
        checks: u32,
        /// `None` when the resource was never observed during this wait
        last_status: Option<Status>,
    },

    #[error("unexpected state '{status}', wanted target {expected}")]
    UnexpectedStatus { status: Status, expected: StateSet },

    #[error(
        "timeout while waiting for state to become {expected} (last state: '{}', timeout: {timeout:?})",
        label(.last_status)
    )]
    Timeout {
        timeout: Duration,
        expected: StateSet,
        last_status: Option<Status>,
        last_snapshot: Option<T>,
    },

    #[error("wait cancelled (last state: '{}')", label(.last_status))]
    Cancelled { last_status: Option<Status> },
}

fn label(status: &Option<Status>) -> &str {
    status.as_ref().map(Status::as_str).unwrap_or("")
}

fn describe_not_found(checks: &u32, last_status: &Option<Status>) -> String {
    match last_status {
        Some(status) => format!(
            "resource disappeared while waiting (last state: '{}', {} consecutive not-found checks)",
            status, checks
        ),
        None => format!(
            "couldn't find resource ({} consecutive not-found checks)",
            checks
        ),
    }
}

impl<T> WaitError<T> {
    /// Last snapshot observed before a timeout
    pub fn last_snapshot(&self) -> Option<&T> {
        match self {
            WaitError::Timeout { last_snapshot, .. } => last_snapshot.as_ref(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WaitError::NotFound { .. })
    }
}

/// Configuration for one state-change wait
///
/// ```ignore
/// let ready = StateChangeConf::new(refresh, Duration::from_secs(1800))
///     .with_pending(["CREATING"])
///     .with_target(["READY"])
///     .with_continuous_target_occurrence(2)
///     .wait_for_state()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct StateChangeConf<R> {
    pub refresh: R,
    pub pending: StateSet,
    pub target: StateSet,
    pub timeout: Duration,
    /// Wait before the first probe
    pub delay: Duration,
    pub not_found_checks: u32,
    pub continuous_target_occurrence: u32,
    pub poll: PollPolicy,
}

impl<R> StateChangeConf<R> {
    pub fn new(refresh: R, timeout: Duration) -> Self {
        Self {
            refresh,
            pending: StateSet::empty(),
            target: StateSet::empty(),
            timeout,
            delay: Duration::ZERO,
            not_found_checks: DEFAULT_NOT_FOUND_CHECKS,
            continuous_target_occurrence: 1,
            poll: PollPolicy::default(),
        }
    }

    pub fn with_pending<I, S>(mut self, pending: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Status>,
    {
        self.pending = StateSet::new(pending);
        self
    }

    pub fn with_target<I, S>(mut self, target: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Status>,
    {
        self.target = StateSet::new(target);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_not_found_checks(mut self, checks: u32) -> Self {
        self.not_found_checks = checks;
        self
    }

    pub fn with_continuous_target_occurrence(mut self, occurrences: u32) -> Self {
        self.continuous_target_occurrence = occurrences;
        self
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Apply tolerances and cadence from settings, keeping states and timeout
    pub fn with_settings(mut self, settings: &WaiterSettings) -> Self {
        self.delay = settings.delay;
        self.not_found_checks = settings.not_found_checks;
        self.continuous_target_occurrence = settings.continuous_target_occurrence;
        self.poll = settings.poll.clone();
        self
    }

    /// Wait on the system clock with no external cancellation
    pub async fn wait_for_state<T>(&self) -> Result<Converged<T>, WaitError<T>>
    where
        R: Refresh<T>,
    {
        self.wait(&SystemClock, &CancellationToken::new()).await
    }

    /// Poll until convergence, failure, timeout or cancellation
    pub async fn wait<T, C>(
        &self,
        clock: &C,
        cancel: &CancellationToken,
    ) -> Result<Converged<T>, WaitError<T>>
    where
        R: Refresh<T>,
        C: Clock,
    {
        let mut state = WaitState::new(clock.now(), self.timeout);
        let mut intervals = self.poll.intervals();
        let required = self.continuous_target_occurrence.max(1);

        tracing::debug!(
            pending = %self.pending,
            target = %self.target,
            timeout_ms = self.timeout.as_millis() as u64,
            "waiting for state change"
        );

        if !self.delay.is_zero() {
            self.pause(clock, cancel, &mut state, self.delay).await?;
        }

        loop {
            if state.past_deadline(clock.now()) {
                return Err(self.timed_out(clock, &mut state));
            }
            if cancel.is_cancelled() {
                return Err(state.cancelled());
            }

            state.polls += 1;
            match self.refresh.refresh().await {
                Probe::Failed(err) => {
                    tracing::warn!(poll = state.polls, error = %err, "status probe failed");
                    return Err(WaitError::Probe(err));
                }
                Probe::Absent => {
                    state.not_found += 1;
                    tracing::debug!(
                        poll = state.polls,
                        not_found = state.not_found,
                        "resource not found"
                    );

                    if self.target.is_empty() {
                        state.streak += 1;
                        if state.streak >= required {
                            tracing::info!(
                                polls = state.polls,
                                elapsed_ms = state.elapsed_ms(clock),
                                "resource gone"
                            );
                            return Ok(Converged::Absent);
                        }
                    } else {
                        state.streak = 0;
                        if state.not_found > self.not_found_checks {
                            tracing::warn!(
                                polls = state.polls,
                                checks = self.not_found_checks,
                                "resource not found past tolerance"
                            );
                            return Err(WaitError::NotFound {
                                checks: self.not_found_checks,
                                last_status: state.last_status,
                            });
                        }
                    }
                }
                Probe::Found { snapshot, status } => {
                    state.not_found = 0;

                    if self.target.contains(&status) {
                        state.streak += 1;
                        tracing::debug!(
                            poll = state.polls,
                            %status,
                            streak = state.streak,
                            required,
                            "target status observed"
                        );
                        if state.streak >= required {
                            tracing::info!(
                                polls = state.polls,
                                %status,
                                elapsed_ms = state.elapsed_ms(clock),
                                "state converged"
                            );
                            return Ok(Converged::Snapshot(snapshot));
                        }
                    } else if self.pending.contains(&status) {
                        state.streak = 0;
                        tracing::debug!(poll = state.polls, %status, "still pending");
                    } else {
                        tracing::warn!(poll = state.polls, %status, "unexpected status");
                        return Err(WaitError::UnexpectedStatus {
                            status,
                            expected: self.target.clone(),
                        });
                    }

                    state.last_status = Some(status);
                    state.last_snapshot = Some(snapshot);
                }
            }

            let interval = intervals.next_interval();
            self.pause(clock, cancel, &mut state, interval).await?;
        }
    }

    /// Sleep within the remaining budget, racing cancellation
    async fn pause<T, C: Clock>(
        &self,
        clock: &C,
        cancel: &CancellationToken,
        state: &mut WaitState<T>,
        wanted: Duration,
    ) -> Result<(), WaitError<T>> {
        let remaining = state.remaining(clock.now());
        if remaining.is_zero() {
            return Err(self.timed_out(clock, state));
        }

        tokio::select! {
            _ = clock.sleep(wanted.min(remaining)) => Ok(()),
            _ = cancel.cancelled() => Err(state.cancelled()),
        }
    }

    fn timed_out<T, C: Clock>(&self, clock: &C, state: &mut WaitState<T>) -> WaitError<T> {
        tracing::warn!(
            polls = state.polls,
            elapsed_ms = state.elapsed_ms(clock),
            last_status = state.last_status.as_ref().map(Status::as_str),
            "timed out waiting for state change"
        );
        WaitError::Timeout {
            timeout: self.timeout,
            expected: self.target.clone(),
            last_status: state.last_status.take(),
            last_snapshot: state.last_snapshot.take(),
        }
    }
}

/// Transient state owned by one wait invocation
struct WaitState<T> {
    started: Instant,
    /// `None` when the timeout is too large to represent as an instant
    deadline: Option<Instant>,
    polls: u32,
    not_found: u32,
    streak: u32,
    last_status: Option<Status>,
    last_snapshot: Option<T>,
}

impl<T> WaitState<T> {
    fn new(started: Instant, timeout: Duration) -> Self {
        Self {
            started,
            deadline: started.checked_add(timeout),
            polls: 0,
            not_found: 0,
            streak: 0,
            last_status: None,
            last_snapshot: None,
        }
    }

    fn past_deadline(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }

    fn remaining(&self, now: Instant) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now),
            None => Duration::MAX,
        }
    }

    fn elapsed_ms<C: Clock>(&self, clock: &C) -> u64 {
        clock.now().saturating_duration_since(self.started).as_millis() as u64
    }

    fn cancelled(&mut self) -> WaitError<T> {
        tracing::info!(polls = self.polls, "wait cancelled");
        WaitError::Cancelled {
            last_status: self.last_status.take(),
        }
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
