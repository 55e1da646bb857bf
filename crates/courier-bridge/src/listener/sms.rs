use std::sync::Arc;

use courier_core::{BridgeEvent, RawSmsBroadcast};
use tracing::debug;

use super::DeliveryOutcome;
use crate::dispatch::Dispatcher;
use crate::normalize::normalize_sms;
use crate::registry::SinkRegistry;

/// Receives SMS broadcasts.
///
/// Broadcast callbacks are assumed to already run on a context where the sink
/// may be invoked, so the default dispatcher is inline. Hosts where that does
/// not hold configure a main-loop dispatcher instead.
pub struct SmsListener {
    registry: Arc<SinkRegistry>,
    dispatcher: Arc<dyn Dispatcher>,
    default_format: String,
}

impl SmsListener {
    /// Create a listener reading sinks from `registry`.
    ///
    /// `default_format` is used for broadcasts that carry no format tag.
    #[must_use]
    pub fn new(
        registry: Arc<SinkRegistry>,
        dispatcher: Arc<dyn Dispatcher>,
        default_format: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            default_format: default_format.into(),
        }
    }

    /// Handle one broadcast.
    pub fn on_broadcast(&self, broadcast: &RawSmsBroadcast) -> DeliveryOutcome {
        let Some(pdus) = broadcast.pdus.as_deref() else {
            debug!("Broadcast carries no PDU batch, ignoring");
            return DeliveryOutcome::NoPayload;
        };
        let format = broadcast
            .format
            .as_deref()
            .unwrap_or(self.default_format.as_str());

        let Some(event) = normalize_sms(Some(pdus), format) else {
            debug!(parts = pdus.len(), format, "No decodable SMS part, dropping");
            return DeliveryOutcome::NoEvent;
        };
        let event = BridgeEvent::from(event);

        let Some(sink) = self.registry.current_sink() else {
            debug!("No sink attached, dropping SMS");
            return DeliveryOutcome::NoSink;
        };

        self.dispatcher.post(Box::new(move || {
            sink.deliver(event.name(), event.payload());
        }));
        DeliveryOutcome::Dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::InlineDispatcher;
    use courier_core::{RawSmsBroadcast, SMS_RECEIVED};
    use courier_test::{
        PduBuilder, RecordingSink, TEST_SENDER, test_garbage_pdu, test_sms_batch,
        test_sms_broadcast, test_unrelated_broadcast,
    };

    fn listener_with_sink() -> (SmsListener, Arc<RecordingSink>) {
        let registry = Arc::new(SinkRegistry::new());
        let sink = RecordingSink::shared();
        registry.attach(&sink);
        (
            SmsListener::new(registry, Arc::new(InlineDispatcher), "3gpp"),
            sink,
        )
    }

    #[test]
    fn test_delivers_inline() {
        let (listener, sink) = listener_with_sink();

        let outcome = listener.on_broadcast(&test_sms_broadcast("Hello"));

        assert!(outcome.is_dispatched());
        let event = sink.last().unwrap();
        assert_eq!(event.name, SMS_RECEIVED);
        assert_eq!(event.payload["body"], "Hello");
        assert_eq!(event.payload["sender"], TEST_SENDER);
    }

    #[test]
    fn test_unrelated_broadcast_is_ignored() {
        let (listener, sink) = listener_with_sink();
        assert_eq!(
            listener.on_broadcast(&test_unrelated_broadcast()),
            DeliveryOutcome::NoPayload
        );
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_all_parts_bad_is_no_event() {
        let (listener, sink) = listener_with_sink();
        assert_eq!(
            listener.on_broadcast(&test_sms_batch(vec![test_garbage_pdu()])),
            DeliveryOutcome::NoEvent
        );
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_missing_format_uses_default() {
        let (listener, sink) = listener_with_sink();
        let broadcast = RawSmsBroadcast {
            pdus: Some(vec![PduBuilder::gsm7("hi").build()]),
            format: None,
        };

        assert!(listener.on_broadcast(&broadcast).is_dispatched());
        assert_eq!(sink.last().unwrap().payload["sender"], "unknown");
    }

    #[test]
    fn test_no_sink_drops() {
        let listener = SmsListener::new(
            Arc::new(SinkRegistry::new()),
            Arc::new(InlineDispatcher),
            "3gpp",
        );
        assert_eq!(
            listener.on_broadcast(&test_sms_broadcast("x")),
            DeliveryOutcome::NoSink
        );
    }
}
