// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn require_str_rejects_missing_and_empty() {
    let data = ResourceData::new().with_attr("name", "").with_attr("count", 3);

    assert_eq!(
        data.require_str("name"),
        Err(DataError::MissingAttribute("name"))
    );
    assert_eq!(
        data.require_str("count"),
        Err(DataError::MissingAttribute("count"))
    );
    assert_eq!(
        data.require_str("other"),
        Err(DataError::MissingAttribute("other"))
    );
}

#[test]
fn label_prefers_id_over_name() {
    let unnamed = ResourceData::new();
    let named = ResourceData::new().with_attr("name", "pii");
    let assigned = named.clone().with_id("gr-1");

    assert_eq!(unnamed.label(), "");
    assert_eq!(named.label(), "pii");
    assert_eq!(assigned.label(), "gr-1");
}

#[test]
fn parses_from_toml_with_timeouts() {
    let data: ResourceData = toml::from_str(
        r#"
        id = "gr-1"

        [attributes]
        name = "pii"

        [tags]
        team = "ml"

        [timeouts]
        create = "10m"
        "#,
    )
    .unwrap();

    assert_eq!(data.require_id(), Ok("gr-1"));
    assert_eq!(data.get_str("name"), Some("pii"));
    assert_eq!(data.tags.get("team").map(String::as_str), Some("ml"));
    assert_eq!(
        data.timeouts.create,
        Some(std::time::Duration::from_secs(600))
    );
    assert!(data.timeouts.update.is_none());
}
