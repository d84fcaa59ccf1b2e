// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted traces driven through the public waiter API with TOML settings

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use settle_core::{
    CancellationToken, Converged, FakeClock, ScriptedRefresh, StateChangeConf, WaitError,
    WaiterSettings,
};
use std::time::Duration;

const SETTINGS: &str = r#"
not_found_checks = 2
continuous_target_occurrence = 2
delay = "3s"

[poll]
kind = "backoff"
initial = "1s"
max = "4s"
multiplier = 2.0
jitter = 0.0
"#;

fn conf(steps: &[&str], timeout: Duration) -> (ScriptedRefresh, StateChangeConf<ScriptedRefresh>) {
    let settings = WaiterSettings::from_toml(SETTINGS).unwrap();
    let refresh = ScriptedRefresh::parse(steps).unwrap();
    let conf = StateChangeConf::new(refresh.clone(), timeout)
        .with_pending(["UPDATING"])
        .with_target(["READY"])
        .with_settings(&settings);
    (refresh, conf)
}

#[tokio::test]
async fn settings_from_toml_shape_the_whole_wait() {
    let clock = FakeClock::new();
    let (refresh, conf) = conf(
        &["-", "-", "UPDATING", "READY", "UPDATING", "READY", "READY"],
        Duration::from_secs(60),
    );

    let converged = conf.wait(&clock, &CancellationToken::new()).await.unwrap();

    let snapshot = converged.into_snapshot().unwrap();
    assert_eq!(snapshot.poll, 7);
    assert_eq!(refresh.polls(), 7);
    assert_eq!(
        clock.sleeps(),
        [3, 1, 2, 4, 4, 4, 4]
            .into_iter()
            .map(Duration::from_secs)
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn tolerance_from_toml_is_enforced() {
    let clock = FakeClock::new();
    let (refresh, conf) = conf(&["-", "-", "-", "READY"], Duration::from_secs(60));

    let err = conf
        .wait(&clock, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WaitError::NotFound {
            checks: 2,
            last_status: None
        }
    ));
    assert_eq!(refresh.polls(), 3);
}

#[tokio::test]
async fn delay_counts_against_the_timeout() {
    let clock = FakeClock::new();
    let (refresh, conf) = conf(&["UPDATING"], Duration::from_secs(2));

    let err = conf
        .wait(&clock, &CancellationToken::new())
        .await
        .unwrap_err();

    // The clamped delay lands exactly on the deadline, which still allows one probe
    assert!(err.is_timeout());
    assert_eq!(refresh.polls(), 1);
    assert_eq!(clock.slept(), Duration::from_secs(2));
}

#[tokio::test]
async fn empty_target_converges_on_absence() {
    let clock = FakeClock::new();
    let refresh = ScriptedRefresh::parse(["DELETING", "DELETING", "-"]).unwrap();

    let converged = StateChangeConf::new(refresh.clone(), Duration::from_secs(60))
        .with_pending(["DELETING"])
        .with_poll(settle_core::PollPolicy::fixed(Duration::from_secs(5)))
        .wait(&clock, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(converged, Converged::Absent);
    assert_eq!(clock.slept(), Duration::from_secs(10));
}
