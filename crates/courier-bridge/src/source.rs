//! The boundary between platform callbacks and the listener pipeline.

use courier_core::{RawNotification, RawSmsBroadcast};

use crate::listener::{DeliveryOutcome, NotificationListener, SmsListener};

/// Entry points the platform adapter calls, one per event kind.
///
/// The adapter converts its native callback arguments into raw payloads and
/// forwards them here; everything past this trait is free of platform types.
pub trait EventSource: Send + Sync {
    /// A notification was posted.
    fn notification_posted(&self, raw: &RawNotification) -> DeliveryOutcome;

    /// An SMS broadcast arrived.
    fn sms_received(&self, broadcast: &RawSmsBroadcast) -> DeliveryOutcome;
}

/// Routes each event kind to its listener.
pub struct ListenerPipeline {
    notifications: NotificationListener,
    sms: SmsListener,
}

impl ListenerPipeline {
    /// Create a pipeline from its two listeners.
    #[must_use]
    pub fn new(notifications: NotificationListener, sms: SmsListener) -> Self {
        Self { notifications, sms }
    }
}

impl EventSource for ListenerPipeline {
    fn notification_posted(&self, raw: &RawNotification) -> DeliveryOutcome {
        self.notifications.on_notification_posted(raw)
    }

    fn sms_received(&self, broadcast: &RawSmsBroadcast) -> DeliveryOutcome {
        self.sms.on_broadcast(broadcast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::dispatch::InlineDispatcher;
    use crate::registry::SinkRegistry;
    use courier_core::{NOTIFICATION_RECEIVED, SMS_RECEIVED};
    use courier_test::{RecordingSink, test_notification, test_sms_broadcast};

    #[test]
    fn test_routes_by_kind() {
        let registry = Arc::new(SinkRegistry::new());
        let sink = RecordingSink::shared();
        registry.attach(&sink);
        let pipeline = ListenerPipeline::new(
            NotificationListener::new(Arc::clone(&registry), Arc::new(InlineDispatcher)),
            SmsListener::new(registry, Arc::new(InlineDispatcher), "3gpp"),
        );
        let source: &dyn EventSource = &pipeline;

        source.notification_posted(&test_notification());
        source.sms_received(&test_sms_broadcast("hi"));

        let names: Vec<_> = sink.events().into_iter().map(|e| e.name).collect();
        assert_eq!(names, [NOTIFICATION_RECEIVED, SMS_RECEIVED]);
    }
}
