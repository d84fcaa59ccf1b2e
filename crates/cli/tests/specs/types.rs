// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `settle types` specs

use crate::prelude::*;

#[test]
fn lists_guardrail_types() {
    Project::empty()
        .settle()
        .args(&["types"])
        .passes()
        .stdout_has("KIND")
        .stdout_has("aws_bedrock_guardrail")
        .stdout_has("import,modify-plan,validate");
}

#[test]
fn json_listing_names_package_and_capabilities() {
    let outcome = Project::empty()
        .settle()
        .args(&["types", "--format", "json"])
        .passes();
    let types = outcome.json();

    assert_eq!(types.as_array().map(Vec::len), Some(2));
    assert_eq!(types[0]["kind"], "resource");
    assert_eq!(types[0]["package"], "bedrock");
    assert_eq!(types[1]["kind"], "data source");
}
