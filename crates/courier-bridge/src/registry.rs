//! Process-wide slot for the active delivery sink.

use std::sync::{Arc, Weak};

use arc_swap::ArcSwapOption;
use courier_core::DeliverySink;
use tracing::info;

/// Holds a non-owning reference to the current [`DeliverySink`].
///
/// Reads are lock-free and safe from any number of concurrent listener
/// callbacks. Writes are last-writer-wins. The registry never keeps a sink
/// alive: once the owner drops it, [`current_sink`](Self::current_sink)
/// returns `None`.
#[derive(Default)]
pub struct SinkRegistry {
    slot: ArcSwapOption<Weak<dyn DeliverySink>>,
}

impl SinkRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `sink` the current sink, replacing any previous one.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use courier_bridge::SinkRegistry;
    /// use courier_core::DeliverySink;
    ///
    /// struct Discard;
    ///
    /// impl DeliverySink for Discard {
    ///     fn deliver(&self, _event_name: &str, _payload: serde_json::Value) {}
    /// }
    ///
    /// let registry = SinkRegistry::new();
    /// let sink = Arc::new(Discard);
    /// registry.attach(&sink);
    /// assert!(registry.is_attached());
    ///
    /// drop(sink);
    /// assert!(!registry.is_attached());
    /// ```
    pub fn attach<S: DeliverySink + 'static>(&self, sink: &Arc<S>) {
        let weak = Arc::downgrade(sink);
        let weak: Weak<dyn DeliverySink> = weak;
        self.attach_weak(weak);
    }

    /// Make an already-downgraded sink the current sink.
    pub fn attach_weak(&self, sink: Weak<dyn DeliverySink>) {
        self.slot.store(Some(Arc::new(sink)));
        info!("Delivery sink attached");
    }

    /// Clear the current sink.
    pub fn detach(&self) {
        if self.slot.swap(None).is_some() {
            info!("Delivery sink detached");
        }
    }

    /// The current sink, if one is attached and still alive.
    #[must_use]
    pub fn current_sink(&self) -> Option<Arc<dyn DeliverySink>> {
        self.slot.load_full().and_then(|weak| weak.upgrade())
    }

    /// Whether a live sink is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.current_sink().is_some()
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("attached", &self.is_attached())
            .finish()
    }
}
