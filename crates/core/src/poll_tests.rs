// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[test]
fn fixed_policy_repeats_interval() {
    let mut intervals = PollPolicy::fixed(Duration::from_secs(3)).intervals();
    for _ in 0..5 {
        assert_eq!(intervals.next_interval(), Duration::from_secs(3));
    }
}

#[test]
fn backoff_doubles_until_cap() {
    let mut intervals =
        PollPolicy::backoff(Duration::from_millis(100), Duration::from_millis(500)).intervals();

    let seen: Vec<u128> = (0..6).map(|_| intervals.next_interval().as_millis()).collect();
    assert_eq!(seen, vec![100, 200, 400, 500, 500, 500]);
}

#[test]
fn each_invocation_starts_from_initial() {
    let policy = PollPolicy::backoff(Duration::from_millis(100), Duration::from_secs(10));
    let mut first = policy.intervals();
    first.next_interval();
    first.next_interval();

    let mut second = policy.intervals();
    assert_eq!(second.next_interval(), Duration::from_millis(100));
}

#[test]
fn default_policy_is_capped_backoff_with_jitter() {
    match PollPolicy::default() {
        PollPolicy::Backoff {
            initial,
            max,
            multiplier,
            jitter,
        } => {
            assert_eq!(initial, Duration::from_millis(100));
            assert_eq!(max, Duration::from_secs(10));
            assert_eq!(multiplier, 2.0);
            assert!(jitter > 0.0);
        }
        other => panic!("unexpected default: {:?}", other),
    }
}

#[test]
fn policy_parses_from_toml() {
    #[derive(serde::Deserialize)]
    struct Doc {
        poll: PollPolicy,
    }

    let doc: Doc = toml::from_str(
        r#"
        [poll]
        kind = "fixed"
        interval = "2s"
        "#,
    )
    .unwrap();
    assert_eq!(doc.poll, PollPolicy::fixed(Duration::from_secs(2)));

    let doc: Doc = toml::from_str(
        r#"
        [poll]
        kind = "backoff"
        initial = "250ms"
        max = "5s"
        multiplier = 1.5
        jitter = 0.1
        "#,
    )
    .unwrap();
    assert_eq!(
        doc.poll,
        PollPolicy::Backoff {
            initial: Duration::from_millis(250),
            max: Duration::from_secs(5),
            multiplier: 1.5,
            jitter: 0.1,
        }
    );
}

#[test]
fn jitter_at_the_largest_duration_is_clamped_to_cap() {
    let policy = PollPolicy::Backoff {
        initial: Duration::MAX,
        max: Duration::MAX,
        multiplier: 2.0,
        jitter: 1.0,
    };
    let mut intervals = policy.intervals();

    for _ in 0..50 {
        assert!(intervals.next_interval() <= Duration::MAX);
    }
}

#[test]
fn jitter_never_exceeds_a_cap_below_the_base() {
    assert_eq!(
        apply_jitter(Duration::from_secs(8), 0.0, Duration::from_secs(5)),
        Duration::from_secs(5)
    );
    for _ in 0..50 {
        assert!(apply_jitter(Duration::from_secs(5), 0.5, Duration::from_secs(5)) <= Duration::from_secs(5));
    }
}

proptest! {
    #[test]
    fn jittered_backoff_never_exceeds_cap(
        initial_ms in 1u64..2_000,
        max_ms in 1u64..20_000,
        jitter in 0.0f64..1.0,
        steps in 1usize..30,
    ) {
        let max = Duration::from_millis(max_ms);
        let policy = PollPolicy::Backoff {
            initial: Duration::from_millis(initial_ms),
            max,
            multiplier: 2.0,
            jitter,
        };
        let mut intervals = policy.intervals();
        for _ in 0..steps {
            prop_assert!(intervals.next_interval() <= max);
        }
    }
}
