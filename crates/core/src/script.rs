// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted refresh for replaying recorded status traces
//!
//! A trace is a list of steps, one per probe. Once the script runs out the
//! last step repeats, so a trace ending in a pending status runs into the
//! timeout rather than failing on exhaustion.
//!
//! Step syntax: `-` is an absent probe, `!message` a failed probe, anything
//! else a status label.

use crate::probe::{Probe, Refresh};
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::{ready, Future};
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// One scripted probe outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Step {
    Absent,
    Status(Status),
    Fail(String),
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => Err(StepParseError::Empty),
            "-" => Ok(Step::Absent),
            _ => match s.strip_prefix('!') {
                Some(message) => Ok(Step::Fail(message.trim().to_string())),
                None => Ok(Step::Status(Status::new(s))),
            },
        }
    }
}

impl TryFrom<String> for Step {
    type Error = StepParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Step> for String {
    fn from(step: Step) -> Self {
        step.to_string()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Absent => write!(f, "-"),
            Step::Status(status) => write!(f, "{}", status),
            Step::Fail(message) => write!(f, "!{}", message),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepParseError {
    #[error("empty step (use '-' for an absent resource)")]
    Empty,
}

/// Failure injected by a `!message` step
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ScriptedFailure(pub String);

/// Snapshot produced by a scripted probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// 1-based probe number
    pub poll: u32,
    pub status: Status,
}

/// Refresh that replays a fixed list of steps
#[derive(Debug, Clone)]
pub struct ScriptedRefresh {
    steps: Arc<Vec<Step>>,
    polls: Arc<AtomicU32>,
    history: Arc<Mutex<Vec<Step>>>,
}

impl ScriptedRefresh {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(steps),
            polls: Arc::new(AtomicU32::new(0)),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Parse steps from their string form
    pub fn parse<I, S>(steps: I) -> Result<Self, StepParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let steps = steps
            .into_iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Step>, _>>()?;
        Ok(Self::new(steps))
    }

    /// Number of probes issued so far
    pub fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    /// Steps actually replayed, in order
    pub fn history(&self) -> Vec<Step> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn next_probe(&self) -> Probe<Observation> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        let index = (poll as usize - 1).min(self.steps.len().saturating_sub(1));
        let step = self.steps.get(index).cloned().unwrap_or(Step::Absent);

        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(step.clone());

        match step {
            Step::Absent => Probe::Absent,
            Step::Status(status) => Probe::Found {
                snapshot: Observation {
                    poll,
                    status: status.clone(),
                },
                status,
            },
            Step::Fail(message) => Probe::failed(ScriptedFailure(message)),
        }
    }
}

impl Refresh<Observation> for ScriptedRefresh {
    fn refresh(&self) -> impl Future<Output = Probe<Observation>> + Send {
        ready(self.next_probe())
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
