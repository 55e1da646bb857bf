//! Test fixtures for raw platform payloads.

use courier_core::{FORMAT_3GPP, RawNotification, RawSmsBroadcast};

use crate::pdu::PduBuilder;

/// Package name used by notification fixtures.
pub const TEST_PACKAGE: &str = "com.example.messenger";

/// International sender used by SMS fixtures, as decoded.
pub const TEST_SENDER: &str = "+15551234567";

/// A notification with both title and text.
#[must_use]
pub fn test_notification() -> RawNotification {
    RawNotification::new(TEST_PACKAGE)
        .with_title("New message")
        .with_text("See you at 6")
}

/// A notification with no extras bundle at all.
#[must_use]
pub fn test_bare_notification() -> RawNotification {
    RawNotification::new(TEST_PACKAGE)
}

/// A notification whose extras carry only a title.
#[must_use]
pub fn test_title_only_notification(title: impl Into<String>) -> RawNotification {
    RawNotification::new(TEST_PACKAGE).with_title(title)
}

/// A single-part GSM 7-bit SMS broadcast from [`TEST_SENDER`].
#[must_use]
pub fn test_sms_broadcast(text: &str) -> RawSmsBroadcast {
    RawSmsBroadcast::new(
        vec![PduBuilder::gsm7(text).from_international("15551234567").build()],
        FORMAT_3GPP,
    )
}

/// A broadcast carrying the given PDUs in the 3GPP format.
#[must_use]
pub fn test_sms_batch(pdus: Vec<Vec<u8>>) -> RawSmsBroadcast {
    RawSmsBroadcast::new(pdus, FORMAT_3GPP)
}

/// A broadcast with no PDU batch, as unrelated broadcasts arrive.
#[must_use]
pub fn test_unrelated_broadcast() -> RawSmsBroadcast {
    RawSmsBroadcast::empty()
}

/// Bytes that fail to decode as any SMS-DELIVER.
#[must_use]
pub fn test_garbage_pdu() -> Vec<u8> {
    vec![0x07, 0x91, 0x13]
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::{EXTRA_TEXT, EXTRA_TITLE};

    #[test]
    fn test_notification_fixtures() {
        let full = test_notification();
        assert_eq!(full.extra(EXTRA_TITLE), Some("New message"));
        assert_eq!(full.extra(EXTRA_TEXT), Some("See you at 6"));

        assert!(test_bare_notification().extras.is_none());
        assert!(test_title_only_notification("t").extra(EXTRA_TEXT).is_none());
    }

    #[test]
    fn test_sms_fixtures() {
        let broadcast = test_sms_broadcast("Hello");
        assert_eq!(broadcast.pdus.as_ref().map(Vec::len), Some(1));
        assert_eq!(broadcast.format.as_deref(), Some(FORMAT_3GPP));

        assert!(test_unrelated_broadcast().pdus.is_none());
        assert!(courier_pdu::decode(&test_garbage_pdu(), FORMAT_3GPP).is_err());
    }
}
