//! Permission flows through the plugin surfaces.

#![allow(clippy::arithmetic_side_effects)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::BridgeHarness;
use courier_bridge::CourierBridge;
use courier_capabilities::{
    CapabilityError, PermissionState, READ_SMS, RECEIVE_SMS, RequestCode,
};
use courier_core::Capability;
use courier_test::MockCapabilityProvider;

fn sms_permissions() -> Vec<String> {
    vec![RECEIVE_SMS.to_owned(), READ_SMS.to_owned()]
}

async fn wait_for_prompt(provider: &MockCapabilityProvider) -> RequestCode {
    for _ in 0..100 {
        if let Some(code) = provider.last_prompt_code() {
            return code;
        }
        tokio::task::yield_now().await;
    }
    panic!("no prompt was shown");
}

#[test]
fn test_listener_access_already_granted() {
    let h = BridgeHarness::with_provider(MockCapabilityProvider::new().with_listener_access());

    let response = h.bridge.notifications().request_permission().unwrap();

    assert!(response.granted);
    assert_eq!(h.provider.settings_launches(), 0);
}

#[test]
fn test_listener_access_not_granted_opens_settings_once() {
    let h = BridgeHarness::new();

    let response = h.bridge.notifications().request_permission().unwrap();

    assert!(!response.granted);
    assert_eq!(h.provider.settings_launches(), 1);
}

#[test]
fn test_listener_access_requery_after_settings() {
    let h = BridgeHarness::new();
    assert!(!h.bridge.notifications().request_permission().unwrap().granted);

    h.provider.set_listener_access(true);

    assert!(h.bridge.notifications().refresh_grant().unwrap().granted);
    assert!(h.bridge.is_granted(Capability::NotificationAccess));
    assert_eq!(h.provider.settings_launches(), 1);
}

#[test]
fn test_listener_access_without_context() {
    let h = BridgeHarness::with_provider(MockCapabilityProvider::new().without_context());

    let err = h.bridge.notifications().request_permission().unwrap_err();

    assert_eq!(err, CapabilityError::ContextUnavailable);
    assert_eq!(err.to_string(), "Context unavailable");
}

#[tokio::test]
async fn test_sms_already_granted_resolves_immediately() {
    let h = BridgeHarness::with_provider(
        MockCapabilityProvider::new()
            .with_permission(RECEIVE_SMS)
            .with_permission(READ_SMS),
    );

    let response = h.bridge.sms().request_permissions().await.unwrap();

    assert!(response.granted);
    assert!(h.provider.prompts().is_empty());
}

#[tokio::test]
async fn test_sms_mismatched_code_does_not_resolve() {
    let provider = Arc::new(MockCapabilityProvider::new());
    let (bridge, _) = CourierBridge::builder(provider.clone())
        .with_prompt_timeout(Some(Duration::from_millis(50)))
        .build();
    let bridge = Arc::new(bridge);

    let requester = Arc::clone(&bridge);
    let request = tokio::spawn(async move { requester.sms().request_permissions().await });

    let code = wait_for_prompt(&provider).await;
    let wrong = RequestCode(code.0.wrapping_add(1));
    assert!(!bridge.sms().handle_request_permissions_result(
        wrong,
        &sms_permissions(),
        &[PermissionState::Granted, PermissionState::Granted],
    ));

    let err = request.await.unwrap().unwrap_err();
    assert!(matches!(err, CapabilityError::Timeout { .. }));
}

#[tokio::test]
async fn test_sms_partial_grant_resolves_denied() {
    let provider = Arc::new(MockCapabilityProvider::new());
    let (bridge, _) = CourierBridge::builder(provider.clone()).build();
    let bridge = Arc::new(bridge);

    let requester = Arc::clone(&bridge);
    let request = tokio::spawn(async move { requester.sms().request_permissions().await });

    let code = wait_for_prompt(&provider).await;
    assert!(bridge.sms().handle_request_permissions_result(
        code,
        &sms_permissions(),
        &[PermissionState::Granted, PermissionState::Denied],
    ));

    let response = request.await.unwrap().unwrap();
    assert!(!response.granted);
}

#[tokio::test]
async fn test_sms_full_grant_resolves_granted() {
    let provider = Arc::new(MockCapabilityProvider::new());
    let (bridge, _) = CourierBridge::builder(provider.clone())
        .with_request_code(500)
        .build();
    let bridge = Arc::new(bridge);

    let requester = Arc::clone(&bridge);
    let request = tokio::spawn(async move { requester.sms().request_permissions().await });

    let code = wait_for_prompt(&provider).await;
    assert_eq!(code, RequestCode(500));
    assert!(bridge.sms().handle_request_permissions_result(
        code,
        &sms_permissions(),
        &[PermissionState::Granted, PermissionState::Granted],
    ));

    assert!(request.await.unwrap().unwrap().granted);
}

#[tokio::test]
async fn test_sms_newer_request_supersedes_older() {
    let provider = Arc::new(MockCapabilityProvider::new());
    let (bridge, _) = CourierBridge::builder(provider.clone()).build();
    let bridge = Arc::new(bridge);

    let first_requester = Arc::clone(&bridge);
    let first = tokio::spawn(async move { first_requester.sms().request_permissions().await });
    let first_code = wait_for_prompt(&provider).await;

    let second_requester = Arc::clone(&bridge);
    let second = tokio::spawn(async move { second_requester.sms().request_permissions().await });

    let err = first.await.unwrap().unwrap_err();
    assert!(matches!(err, CapabilityError::Superseded { previous, .. } if previous == first_code));

    let second_code = provider.last_prompt_code().unwrap();
    assert_ne!(second_code, first_code);
    bridge.sms().handle_request_permissions_result(
        second_code,
        &sms_permissions(),
        &[PermissionState::Granted, PermissionState::Granted],
    );
    assert!(second.await.unwrap().unwrap().granted);
}

#[tokio::test]
async fn test_sms_prompt_without_activity_fails() {
    let h = BridgeHarness::with_provider(MockCapabilityProvider::new().without_activity());

    let err = h.bridge.sms().request_permissions().await.unwrap_err();

    assert_eq!(err, CapabilityError::ActivityUnavailable);
    assert!(!h.bridge.sms().is_granted());
}
