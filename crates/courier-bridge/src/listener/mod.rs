//! OS-driven listeners.
//!
//! Each listener normalizes one raw payload, looks up the current sink and
//! hands the delivery to its [`Dispatcher`](crate::Dispatcher). Nothing is
//! buffered: with no sink attached the event is dropped.

mod notification;
mod sms;

pub use notification::NotificationListener;
pub use sms::SmsListener;

/// What a listener did with one OS callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The delivery was handed to the dispatcher.
    Dispatched,
    /// No sink was attached; the event was dropped.
    NoSink,
    /// The payload normalized to no event (every part failed, or empty batch).
    NoEvent,
    /// The callback carried no payload for this listener.
    NoPayload,
}

impl DeliveryOutcome {
    /// Whether a delivery was scheduled.
    #[must_use]
    pub fn is_dispatched(self) -> bool {
        matches!(self, Self::Dispatched)
    }
}
