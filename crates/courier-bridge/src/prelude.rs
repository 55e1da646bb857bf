//! Prelude module - commonly used types for convenient import.
//!
//! Use `use courier_bridge::prelude::*;` to import all essential types.

// Assembly
pub use crate::{BridgeBuilder, CourierBridge};

// Pipeline
pub use crate::{DeliveryOutcome, EventSource, SinkRegistry};

// Scheduling
pub use crate::{Dispatcher, InlineDispatcher, MainLoop};

// Permission surfaces
pub use crate::{NotificationPlugin, SmsPlugin};
