//! Prelude module - commonly used types for convenient import.
//!
//! Use `use courier_core::prelude::*;` to import all essential types.

// Raw native payloads
pub use crate::{RawNotification, RawSmsBroadcast};

// Normalized events
pub use crate::{BridgeEvent, NotificationEvent, SmsEvent};

// Wire contract
pub use crate::{NOTIFICATION_RECEIVED, SMS_RECEIVED, UNKNOWN_SENDER};

// Delivery
pub use crate::DeliverySink;

// Capabilities
pub use crate::{Capability, CapabilityGrant, PermissionResponse};
