//! Courier Bridge - Listener pipeline and permission surfaces.
//!
//! Data flow for every OS callback:
//!
//! ```text
//! platform adapter -> EventSource -> {Notification|Sms}Listener
//!     -> normalize -> SinkRegistry::current_sink -> Dispatcher -> DeliverySink
//! ```
//!
//! Permission flow is separate: the host calls
//! [`NotificationPlugin::request_permission`] or
//! [`SmsPlugin::request_permissions`], and the platform feeds prompt results
//! back through [`SmsPlugin::handle_request_permissions_result`].
//!
//! # Example
//!
//! ```rust,ignore
//! let (bridge, main_loop) = CourierBridge::builder(provider).build();
//! let bus = Arc::new(EventBus::new());
//! bridge.attach(&bus);
//!
//! // Platform adapter:
//! bridge.event_source().notification_posted(&raw);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod bridge;
mod dispatch;
mod listener;
mod normalize;
mod plugin;
mod registry;
mod source;

pub use bridge::{BridgeBuilder, CourierBridge};
pub use dispatch::{Dispatcher, InlineDispatcher, MainLoop, MainLoopDispatcher, Task};
pub use listener::{DeliveryOutcome, NotificationListener, SmsListener};
pub use normalize::{normalize_notification, normalize_sms};
pub use plugin::{NotificationPlugin, SmsPlugin};
pub use registry::SinkRegistry;
pub use source::{EventSource, ListenerPipeline};
