//! Courier Core - Shared types for the courier event bridge.
//!
//! This crate provides:
//! - Raw native payloads as the platform hands them over ([`RawNotification`],
//!   [`RawSmsBroadcast`])
//! - Normalized, fixed-shape event records ([`NotificationEvent`], [`SmsEvent`])
//! - The wire contract with consumers (event names and payload field names)
//! - The [`DeliverySink`] trait implemented by the host runtime's event channel
//! - Capability identifiers and grant results
//!
//! # Wire contract
//!
//! Consumers receive exactly two event names. Field names are part of the
//! contract and are intentionally asymmetric between the two events:
//!
//! | Event name               | Payload                                   |
//! |--------------------------|-------------------------------------------|
//! | `"notificationReceived"` | `{ package: string, title: string, text: string }` |
//! | `"onSMSReceived"`        | `{ body: string, sender: string }`        |
//!
//! # Example
//!
//! ```rust
//! use courier_core::{BridgeEvent, NotificationEvent};
//!
//! let event = BridgeEvent::from(NotificationEvent::new("com.example.bank", "Alert", ""));
//! assert_eq!(event.name(), "notificationReceived");
//! assert_eq!(event.payload()["package"], "com.example.bank");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod capability;
mod event;
mod raw;
mod sink;

pub use capability::{Capability, CapabilityGrant, PermissionResponse};
pub use event::{
    BridgeEvent, NOTIFICATION_RECEIVED, NotificationEvent, SMS_RECEIVED, SmsEvent, UNKNOWN_SENDER,
};
pub use raw::{
    DEFAULT_SMS_FORMAT, EXTRA_TEXT, EXTRA_TITLE, FORMAT_3GPP, FORMAT_3GPP2, RawNotification,
    RawSmsBroadcast,
};
pub use sink::DeliverySink;
