//! Normalized event records and their wire payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Event name emitted for every posted notification.
pub const NOTIFICATION_RECEIVED: &str = "notificationReceived";

/// Event name emitted for every received SMS batch.
pub const SMS_RECEIVED: &str = "onSMSReceived";

/// Sender used when no message part reports an originating address.
pub const UNKNOWN_SENDER: &str = "unknown";

/// A posted notification in normalized form.
///
/// Every field is always present. Missing title or text on the native record
/// becomes an empty string, never an absent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Identifier of the application that posted the notification.
    #[serde(rename = "package")]
    pub source_application_id: String,
    /// Notification title, or `""`.
    pub title: String,
    /// Notification text, or `""`.
    #[serde(rename = "text")]
    pub body: String,
}

impl NotificationEvent {
    /// Create a new notification event.
    #[must_use]
    pub fn new(
        source_application_id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            source_application_id: source_application_id.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Build the `notificationReceived` wire payload.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({
            "package": self.source_application_id,
            "title": self.title,
            "text": self.body,
        })
    }
}

/// A received SMS in normalized form.
///
/// `body` is the concatenation of every decoded part in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsEvent {
    /// Full message text.
    pub body: String,
    /// Originating address, or [`UNKNOWN_SENDER`].
    pub sender: String,
}

impl SmsEvent {
    /// Create a new SMS event.
    #[must_use]
    pub fn new(body: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            sender: sender.into(),
        }
    }

    /// Whether the sender could not be resolved from any part.
    #[must_use]
    pub fn has_unknown_sender(&self) -> bool {
        self.sender == UNKNOWN_SENDER
    }

    /// Build the `onSMSReceived` wire payload.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({
            "body": self.body,
            "sender": self.sender,
        })
    }
}

/// Any event the bridge can deliver to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// A posted notification.
    Notification(NotificationEvent),
    /// A received SMS.
    Sms(SmsEvent),
}

impl BridgeEvent {
    /// The wire event name consumers subscribe to.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Notification(_) => NOTIFICATION_RECEIVED,
            Self::Sms(_) => SMS_RECEIVED,
        }
    }

    /// The wire payload for this event.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Notification(event) => event.to_payload(),
            Self::Sms(event) => event.to_payload(),
        }
    }
}

impl From<NotificationEvent> for BridgeEvent {
    fn from(event: NotificationEvent) -> Self {
        Self::Notification(event)
    }
}

impl From<SmsEvent> for BridgeEvent {
    fn from(event: SmsEvent) -> Self {
        Self::Sms(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_payload_field_names() {
        let event = NotificationEvent::new("com.example.bank", "Debit", "Rs 100 spent");
        let payload = event.to_payload();

        assert_eq!(payload["package"], "com.example.bank");
        assert_eq!(payload["title"], "Debit");
        assert_eq!(payload["text"], "Rs 100 spent");
        assert_eq!(payload.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_sms_payload_field_names() {
        let event = SmsEvent::new("Hello world", "+15551234567");
        let payload = event.to_payload();

        assert_eq!(payload["body"], "Hello world");
        assert_eq!(payload["sender"], "+15551234567");
        assert_eq!(payload.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_serde_matches_payload() {
        let event = NotificationEvent::new("pkg", "", "");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, event.to_payload());
    }

    #[test]
    fn test_bridge_event_names() {
        let n = BridgeEvent::from(NotificationEvent::new("pkg", "", ""));
        let s = BridgeEvent::from(SmsEvent::new("", UNKNOWN_SENDER));

        assert_eq!(n.name(), "notificationReceived");
        assert_eq!(s.name(), "onSMSReceived");
    }

    #[test]
    fn test_unknown_sender() {
        assert!(SmsEvent::new("hi", UNKNOWN_SENDER).has_unknown_sender());
        assert!(!SmsEvent::new("hi", "+1555").has_unknown_sender());
    }
}
