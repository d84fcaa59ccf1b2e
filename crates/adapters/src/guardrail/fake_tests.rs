// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn config(name: &str) -> GuardrailConfig {
    GuardrailConfig {
        name: name.to_string(),
        description: None,
        blocked_input_messaging: "blocked".to_string(),
        blocked_outputs_messaging: "blocked".to_string(),
        kms_key_arn: None,
    }
}

#[tokio::test]
async fn create_without_script_is_ready_on_first_read() {
    let api = FakeGuardrailApi::new();
    let created = api
        .create_guardrail(&config("pii"), &BTreeMap::new())
        .await
        .unwrap();

    assert_eq!(created.version, DRAFT_VERSION);
    assert!(created.arn.ends_with(&created.id));

    let got = api.get_guardrail(&created.id, DRAFT_VERSION).await.unwrap();
    assert_eq!(got.status, status::READY);
    assert_eq!(got.config.name, "pii");
}

#[tokio::test]
async fn create_script_is_served_in_order() {
    let api = FakeGuardrailApi::new();
    api.on_create(vec![
        FakeObservation::NotFound,
        FakeObservation::status(status::CREATING),
    ]);
    let created = api
        .create_guardrail(&config("pii"), &BTreeMap::new())
        .await
        .unwrap();

    let first = api.get_guardrail(&created.id, DRAFT_VERSION).await;
    let second = api.get_guardrail(&created.id, DRAFT_VERSION).await;
    let third = api.get_guardrail(&created.id, DRAFT_VERSION).await;

    assert!(first.unwrap_err().is_not_found());
    assert_eq!(second.unwrap().status, status::CREATING);
    assert_eq!(third.unwrap().status, status::READY);
    assert_eq!(api.get_count(), 3);
}

#[tokio::test]
async fn delete_removes_guardrail_after_script_drains() {
    let api = FakeGuardrailApi::new();
    let created = api
        .create_guardrail(&config("pii"), &BTreeMap::new())
        .await
        .unwrap();
    api.on_delete(vec![FakeObservation::status(status::DELETING)]);

    api.delete_guardrail(&created.id).await.unwrap();

    let during = api.get_guardrail(&created.id, DRAFT_VERSION).await.unwrap();
    assert_eq!(during.status, status::DELETING);
    let after = api.get_guardrail(&created.id, DRAFT_VERSION).await;
    assert!(after.unwrap_err().is_not_found());
    assert!(api.guardrail(&created.id).is_none());
}

#[tokio::test]
async fn delete_of_unknown_guardrail_is_not_found() {
    let api = FakeGuardrailApi::new();
    let err = api.delete_guardrail("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_replaces_config_and_enters_updating() {
    let api = FakeGuardrailApi::new();
    let created = api
        .create_guardrail(&config("pii"), &BTreeMap::new())
        .await
        .unwrap();
    api.on_update(vec![FakeObservation::status(status::UPDATING)]);

    api.update_guardrail(&created.id, &config("renamed"))
        .await
        .unwrap();

    let stored = api.guardrail(&created.id).unwrap();
    assert_eq!(stored.config.name, "renamed");
    assert_eq!(stored.status, status::UPDATING);
}

#[tokio::test]
async fn injected_failure_applies_once() {
    let api = FakeGuardrailApi::new();
    api.fail_next(Operation::Create, ApiError::Throttled("slow down".to_string()));

    let first = api.create_guardrail(&config("pii"), &BTreeMap::new()).await;
    let second = api.create_guardrail(&config("pii"), &BTreeMap::new()).await;

    assert_eq!(
        first.unwrap_err(),
        ApiError::Throttled("slow down".to_string())
    );
    assert!(second.is_ok());
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn unknown_version_is_not_found() {
    let api = FakeGuardrailApi::new();
    let created = api
        .create_guardrail(&config("pii"), &BTreeMap::new())
        .await
        .unwrap();

    let err = api.get_guardrail(&created.id, "7").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn tagging_by_arn_merges_and_removes_keys() {
    let api = FakeGuardrailApi::new();
    let created = api
        .create_guardrail(
            &config("pii"),
            &BTreeMap::from([("env".to_string(), "prod".to_string())]),
        )
        .await
        .unwrap();

    api.tag_resource(
        &created.arn,
        &BTreeMap::from([
            ("env".to_string(), "staging".to_string()),
            ("team".to_string(), "ml".to_string()),
        ]),
    )
    .await
    .unwrap();
    api.untag_resource(&created.arn, &["team".to_string()])
        .await
        .unwrap();

    let stored = api.guardrail(&created.id).unwrap();
    assert_eq!(
        stored.tags,
        BTreeMap::from([("env".to_string(), "staging".to_string())])
    );
}

#[tokio::test]
async fn tagging_unknown_arn_is_not_found() {
    let api = FakeGuardrailApi::new();

    let err = api
        .untag_resource("arn:aws:bedrock:us-east-1:123456789012:guardrail/nope", &[])
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}
