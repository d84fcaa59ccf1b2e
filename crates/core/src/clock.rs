// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! The waiter reads the current instant and suspends between polls only
//! through this trait, so tests can drive it with [`FakeClock`] and observe
//! exact elapsed times without real sleeping.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time and can suspend the caller
#[async_trait]
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Instant;

    /// Suspend for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real system clock backed by the tokio timer
///
/// Reads time through tokio so that paused-time runtimes stay consistent
/// with the sleeps issued here.
#[derive(Clone, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fake clock for testing with controllable time
///
/// `sleep` advances the clock immediately and records the requested duration.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: Instant) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = instant;
    }

    /// Durations passed to `sleep`, in call order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Total time spent sleeping
    pub fn slept(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
        self.advance(duration);
        // Give racing futures (cancellation) a chance to run
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
