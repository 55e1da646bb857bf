use std::sync::Arc;

use courier_core::{BridgeEvent, RawNotification};
use tracing::debug;

use super::DeliveryOutcome;
use crate::dispatch::Dispatcher;
use crate::normalize::normalize_notification;
use crate::registry::SinkRegistry;

/// Receives posted notifications.
///
/// Callbacks arrive on an OS-managed background context; delivery is always
/// posted through the dispatcher, which by default targets the host's main
/// loop.
pub struct NotificationListener {
    registry: Arc<SinkRegistry>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl NotificationListener {
    /// Create a listener reading sinks from `registry`.
    #[must_use]
    pub fn new(registry: Arc<SinkRegistry>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Handle one posted notification.
    pub fn on_notification_posted(&self, raw: &RawNotification) -> DeliveryOutcome {
        let event = BridgeEvent::from(normalize_notification(raw));

        let Some(sink) = self.registry.current_sink() else {
            debug!(package = %raw.package_name, "No sink attached, dropping notification");
            return DeliveryOutcome::NoSink;
        };

        self.dispatcher.post(Box::new(move || {
            sink.deliver(event.name(), event.payload());
        }));
        DeliveryOutcome::Dispatched
    }
}
