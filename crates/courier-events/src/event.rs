//! The record carried on the bus.

use courier_core::BridgeEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One event as handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveredEvent {
    /// Wire event name (`"notificationReceived"`, `"onSMSReceived"`).
    pub name: String,
    /// Wire payload.
    pub payload: Value,
}

impl DeliveredEvent {
    /// Create a delivered event.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

impl From<&BridgeEvent> for DeliveredEvent {
    fn from(event: &BridgeEvent) -> Self {
        Self::new(event.name(), event.payload())
    }
}
