//! Event bus for broadcasting bridged events to subscribers.

use std::sync::Arc;

use courier_core::DeliverySink;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::event::DeliveredEvent;

/// Default channel capacity for the event bus.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting delivered events to all subscribers.
///
/// The bus is a [`DeliverySink`]: attach it to the bridge and every
/// normalized event is broadcast to the receivers created with
/// [`subscribe`](Self::subscribe). With no receivers, events are dropped.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events.
    sender: broadcast::Sender<Arc<DeliveredEvent>>,
    /// Channel capacity.
    capacity: usize,
}

impl EventBus {
    /// Create a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    pub fn publish(&self, event: DeliveredEvent) -> usize {
        let event = Arc::new(event);

        if let Ok(count) = self.sender.send(Arc::clone(&event)) {
            debug!(event_name = %event.name, receiver_count = count, "Event published");
            count
        } else {
            trace!(event_name = %event.name, "No receivers for event");
            0
        }
    }

    /// Subscribe to all events.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), None)
    }

    /// Subscribe to events with one wire name only.
    #[must_use]
    pub fn subscribe_name(&self, event_name: impl Into<String>) -> EventReceiver {
        EventReceiver::new(self.sender.subscribe(), Some(event_name.into()))
    }

    /// Get the current number of receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            capacity: self.capacity,
        }
    }
}

impl DeliverySink for EventBus {
    fn deliver(&self, event_name: &str, payload: Value) {
        self.publish(DeliveredEvent::new(event_name, payload));
    }
}

/// Receiver for events from the event bus.
pub struct EventReceiver {
    receiver: broadcast::Receiver<Arc<DeliveredEvent>>,
    /// If set, only events with this name are yielded.
    name_filter: Option<String>,
}

impl EventReceiver {
    fn new(
        receiver: broadcast::Receiver<Arc<DeliveredEvent>>,
        name_filter: Option<String>,
    ) -> Self {
        Self {
            receiver,
            name_filter,
        }
    }

    fn matches(&self, event: &DeliveredEvent) -> bool {
        self.name_filter
            .as_deref()
            .is_none_or(|name| event.name == name)
    }

    /// Receive the next event.
    ///
    /// Returns `None` once the bus and all its clones are dropped.
    pub async fn recv(&mut self) -> Option<Arc<DeliveredEvent>> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                },
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(skipped = count, "Event receiver lagged, events dropped");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Try to receive the next event without blocking.
    pub fn try_recv(&mut self) -> Option<Arc<DeliveredEvent>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                },
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    warn!(skipped = count, "Event receiver lagged, events dropped");
                },
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => return None,
            }
        }
    }
}
