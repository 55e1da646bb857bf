//! Raw payload to event record conversion.
//!
//! Pure functions: no registry, no I/O beyond `tracing`.

use courier_core::{
    EXTRA_TEXT, EXTRA_TITLE, NotificationEvent, RawNotification, SmsEvent, UNKNOWN_SENDER,
};
use tracing::{debug, trace};

/// Convert a posted notification into its normalized form.
///
/// Never fails. A missing extras bundle, title or text becomes `""`.
#[must_use]
pub fn normalize_notification(raw: &RawNotification) -> NotificationEvent {
    NotificationEvent::new(
        raw.package_name.as_str(),
        raw.extra(EXTRA_TITLE).unwrap_or_default(),
        raw.extra(EXTRA_TEXT).unwrap_or_default(),
    )
}

/// Decode a PDU batch into one SMS event.
///
/// Parts that fail to decode are skipped. The body is every decoded part's
/// text in arrival order with no separator; the sender is the first
/// non-empty originating address, or [`UNKNOWN_SENDER`].
///
/// Returns `None` when the batch is absent, empty, or has no decodable part.
#[must_use]
pub fn normalize_sms(pdus: Option<&[Vec<u8>]>, format: &str) -> Option<SmsEvent> {
    let pdus = pdus?;
    let mut body = String::new();
    let mut sender: Option<String> = None;
    let mut decoded = 0_usize;

    for (index, pdu) in pdus.iter().enumerate() {
        match courier_pdu::decode(pdu, format) {
            Ok(part) => {
                trace!(
                    index,
                    alphabet = ?part.alphabet,
                    concat = ?part.concat,
                    "Decoded SMS part"
                );
                body.push_str(&part.body);
                if sender.is_none() {
                    sender = part.originating_address;
                }
                decoded = decoded.saturating_add(1);
            },
            Err(e) => {
                debug!(index, format, error = %e, "Skipping undecodable SMS part");
            },
        }
    }

    if decoded == 0 {
        return None;
    }

    Some(SmsEvent::new(
        body,
        sender.unwrap_or_else(|| UNKNOWN_SENDER.to_owned()),
    ))
}
