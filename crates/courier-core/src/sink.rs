//! The consumer-side delivery channel.

use serde_json::Value;

/// The host runtime's event channel.
///
/// Delivery is fire-and-forget: the bridge never observes a result, and the
/// sink owns any ordering or queuing once invoked.
///
/// Closures of the shape `Fn(&str, Value)` are sinks too, which keeps small
/// hosts and tests free of boilerplate.
pub trait DeliverySink: Send + Sync {
    /// Receive one normalized event.
    fn deliver(&self, event_name: &str, payload: Value);
}

impl<F> DeliverySink for F
where
    F: Fn(&str, Value) + Send + Sync,
{
    fn deliver(&self, event_name: &str, payload: Value) {
        self(event_name, payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |name: &str, payload: Value| {
            seen.lock().unwrap().push((name.to_owned(), payload));
        };

        sink.deliver("onSMSReceived", serde_json::json!({"body": "x"}));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "onSMSReceived");
    }
}
