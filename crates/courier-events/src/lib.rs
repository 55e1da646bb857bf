//! Courier Events - Broadcast event bus for bridged events.
//!
//! This crate provides:
//! - [`DeliveredEvent`], the `(name, payload)` record a sink receives
//! - [`EventBus`], a [`DeliverySink`](courier_core::DeliverySink) backed by a
//!   broadcast channel
//! - [`EventReceiver`], an async receiver with optional event-name filtering
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use courier_core::{DeliverySink, SmsEvent};
//! use courier_events::EventBus;
//!
//! # async fn example() {
//! let bus = Arc::new(EventBus::new());
//! let mut receiver = bus.subscribe_name("onSMSReceived");
//!
//! let event = SmsEvent::new("Hello", "+15551234567");
//! bus.deliver("onSMSReceived", event.to_payload());
//!
//! let delivered = receiver.recv().await.unwrap();
//! assert_eq!(delivered.payload["sender"], "+15551234567");
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bus;
mod event;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus, EventReceiver};
pub use event::DeliveredEvent;
