//! End-to-end normalization: raw platform payloads in, wire payloads out.

#![allow(clippy::arithmetic_side_effects)]

mod common;

use common::BridgeHarness;
use courier_core::{NOTIFICATION_RECEIVED, RawNotification, SMS_RECEIVED};
use courier_test::{
    PduBuilder, TEST_PACKAGE, concatenated_gsm7, test_bare_notification, test_garbage_pdu,
    test_sms_batch, test_title_only_notification,
};
use serde_json::json;

#[test]
fn test_notification_without_extras_has_empty_fields() {
    let mut h = BridgeHarness::new();
    h.attach();

    h.source.notification_posted(&test_bare_notification());
    h.drain();

    let event = h.sink.last().unwrap();
    assert_eq!(event.name, NOTIFICATION_RECEIVED);
    assert_eq!(
        event.payload,
        json!({ "package": TEST_PACKAGE, "title": "", "text": "" })
    );
}

#[test]
fn test_notification_with_title_only() {
    let mut h = BridgeHarness::new();
    h.attach();

    h.source
        .notification_posted(&test_title_only_notification("Transfer received"));
    h.drain();

    let payload = h.sink.last().unwrap().payload;
    assert_eq!(payload["title"], "Transfer received");
    assert_eq!(payload["text"], "");
}

#[test]
fn test_notification_with_empty_extras_bundle() {
    let mut h = BridgeHarness::new();
    h.attach();

    h.source
        .notification_posted(&RawNotification::new("com.example.mail").with_empty_extras());
    h.drain();

    assert_eq!(
        h.sink.last().unwrap().payload,
        json!({ "package": "com.example.mail", "title": "", "text": "" })
    );
}

#[test]
fn test_sms_parts_concatenate_in_arrival_order() {
    let h = BridgeHarness::new();
    h.attach();

    h.source.sms_received(&test_sms_batch(concatenated_gsm7(
        "15551234567",
        7,
        &["Hello ", "world"],
    )));

    let event = h.sink.last().unwrap();
    assert_eq!(event.name, SMS_RECEIVED);
    assert_eq!(
        event.payload,
        json!({ "body": "Hello world", "sender": "+15551234567" })
    );
}

#[test]
fn test_sms_parts_keep_arrival_order_not_sequence() {
    let h = BridgeHarness::new();
    h.attach();

    let mut parts = concatenated_gsm7("15551234567", 9, &["one ", "two"]);
    parts.reverse();
    h.source.sms_received(&test_sms_batch(parts));

    assert_eq!(h.sink.last().unwrap().payload["body"], "twoone ");
}

#[test]
fn test_sms_all_parts_fail_produces_no_event() {
    let h = BridgeHarness::new();
    h.attach();

    h.source
        .sms_received(&test_sms_batch(vec![test_garbage_pdu(), test_garbage_pdu()]));

    assert_eq!(h.sink.count(), 0);
}

#[test]
fn test_sms_empty_body_is_still_an_event() {
    let h = BridgeHarness::new();
    h.attach();

    h.source
        .sms_received(&test_sms_batch(vec![PduBuilder::gsm7("").build()]));

    assert_eq!(
        h.sink.last().unwrap().payload,
        json!({ "body": "", "sender": "unknown" })
    );
}

#[test]
fn test_sms_sender_is_first_non_empty() {
    let h = BridgeHarness::new();
    h.attach();

    h.source.sms_received(&test_sms_batch(vec![
        PduBuilder::gsm7("no sender ").build(),
        PduBuilder::gsm7("second").from_international("447700900123").build(),
    ]));

    let payload = h.sink.last().unwrap().payload;
    assert_eq!(payload["sender"], "+447700900123");
    assert_eq!(payload["body"], "no sender second");
}

#[test]
fn test_sms_bad_part_is_skipped() {
    let h = BridgeHarness::new();
    h.attach();

    h.source.sms_received(&test_sms_batch(vec![
        test_garbage_pdu(),
        PduBuilder::ucs2("Grüße").from_alphanumeric("MyBank").build(),
    ]));

    assert_eq!(
        h.sink.last().unwrap().payload,
        json!({ "body": "Grüße", "sender": "MyBank" })
    );
}

#[test]
fn test_cdma_batch_produces_no_event() {
    let h = BridgeHarness::new();
    h.attach();

    let mut broadcast = test_sms_batch(vec![PduBuilder::gsm7("hi").build()]);
    broadcast.format = Some("3gpp2".to_owned());
    h.source.sms_received(&broadcast);

    assert_eq!(h.sink.count(), 0);
}

#[test]
fn test_missing_format_defaults_to_3gpp() {
    let h = BridgeHarness::new();
    h.attach();

    let mut broadcast = test_sms_batch(vec![
        PduBuilder::gsm7("fallback").from_international("15551234567").build(),
    ]);
    broadcast.format = None;
    h.source.sms_received(&broadcast);

    assert_eq!(h.sink.last().unwrap().payload["body"], "fallback");
}
