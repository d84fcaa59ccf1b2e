// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling cadence between probes

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long the waiter sleeps between consecutive probes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PollPolicy {
    /// Constant interval
    Fixed {
        #[serde(with = "humantime_serde")]
        interval: Duration,
    },
    /// Exponential growth from `initial`, capped at `max`
    ///
    /// `jitter` scales each interval by a random factor in
    /// `[1 - jitter, 1 + jitter]`; the result never exceeds `max`.
    Backoff {
        #[serde(with = "humantime_serde")]
        initial: Duration,
        #[serde(with = "humantime_serde")]
        max: Duration,
        multiplier: f64,
        jitter: f64,
    },
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy::Backoff {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: 0.2,
        }
    }
}

impl PollPolicy {
    pub fn fixed(interval: Duration) -> Self {
        PollPolicy::Fixed { interval }
    }

    /// Backoff without jitter
    pub fn backoff(initial: Duration, max: Duration) -> Self {
        PollPolicy::Backoff {
            initial,
            max,
            multiplier: 2.0,
            jitter: 0.0,
        }
    }

    /// Start a fresh interval sequence for one waiter invocation
    pub fn intervals(&self) -> Intervals {
        let current = match self {
            PollPolicy::Fixed { interval } => *interval,
            PollPolicy::Backoff { initial, .. } => *initial,
        };
        Intervals {
            policy: self.clone(),
            current,
        }
    }
}

/// Per-invocation interval sequence
#[derive(Debug, Clone)]
pub struct Intervals {
    policy: PollPolicy,
    current: Duration,
}

impl Intervals {
    /// Next interval to sleep
    pub fn next_interval(&mut self) -> Duration {
        match &self.policy {
            PollPolicy::Fixed { interval } => *interval,
            PollPolicy::Backoff {
                max,
                multiplier,
                jitter,
                ..
            } => {
                let base = self.current.min(*max);
                let grown = (base.as_nanos() as f64 * multiplier.max(1.0)).round();
                self.current = Duration::from_nanos(grown.min(max.as_nanos() as f64) as u64);
                apply_jitter(base, *jitter, *max)
            }
        }
    }
}

/// Scale `base` by a random factor, never exceeding `max`
fn apply_jitter(base: Duration, jitter: f64, max: Duration) -> Duration {
    let jitter = jitter.clamp(0.0, 1.0);
    if jitter == 0.0 {
        return base.min(max);
    }
    let factor = rand::thread_rng().gen_range((1.0 - jitter)..=(1.0 + jitter));
    Duration::try_from_secs_f64(base.as_secs_f64() * factor)
        .unwrap_or(max)
        .min(max)
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
