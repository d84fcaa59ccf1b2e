// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use settle_core::PollPolicy;
use std::time::Duration;

#[test]
fn empty_document_uses_defaults() {
    let config = ProviderConfig::from_toml("").unwrap();
    assert_eq!(config, ProviderConfig::default());
}

#[test]
fn parses_every_section() {
    let config = ProviderConfig::from_toml(
        r#"
        [default_tags]
        env = "prod"

        [ignore_tags]
        keys = ["LastScanned"]
        key_prefixes = ["kubernetes.io/"]

        [timeouts]
        create = "45m"

        [waiter]
        not_found_checks = 5

        [waiter.poll]
        kind = "fixed"
        interval = "5s"
        "#,
    )
    .unwrap();

    assert_eq!(config.default_tags.get("env").map(String::as_str), Some("prod"));
    assert!(config.ignore_tags.ignores("kubernetes.io/role"));
    assert_eq!(config.timeouts.create, Some(Duration::from_secs(45 * 60)));
    assert_eq!(config.timeouts.delete, None);
    assert_eq!(config.waiter.not_found_checks, 5);
    assert_eq!(config.waiter.poll, PollPolicy::fixed(Duration::from_secs(5)));
}

#[test]
fn invalid_waiter_settings_are_rejected() {
    let err = ProviderConfig::from_toml(
        r#"
        [waiter]
        continuous_target_occurrence = 0
        "#,
    )
    .unwrap_err();

    assert!(
        err.to_string().contains("continuous_target_occurrence"),
        "unexpected error: {}",
        err
    );
}
