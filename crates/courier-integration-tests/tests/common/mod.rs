//! Shared harness for integration tests.

use std::sync::Arc;

use courier_bridge::{CourierBridge, EventSource, InlineDispatcher, MainLoop};
use courier_test::{MockCapabilityProvider, RecordingSink};

/// A bridge wired to a mock provider and a recording sink.
#[allow(dead_code)]
pub struct BridgeHarness {
    /// The assembled bridge.
    pub bridge: CourierBridge,
    /// Loop carrying notification deliveries.
    pub main_loop: MainLoop,
    /// Platform callback entry points.
    pub source: Arc<dyn EventSource>,
    /// Scripted platform.
    pub provider: Arc<MockCapabilityProvider>,
    /// Counting fake sink, not attached until [`attach`](Self::attach).
    pub sink: Arc<RecordingSink>,
}

#[allow(dead_code)]
impl BridgeHarness {
    /// Build with a default provider.
    pub fn new() -> Self {
        Self::with_provider(MockCapabilityProvider::new())
    }

    /// Build over `provider` with default dispatch (main loop for
    /// notifications, inline for SMS).
    pub fn with_provider(provider: MockCapabilityProvider) -> Self {
        courier_test::init_test_logging();
        let provider = Arc::new(provider);
        let (bridge, main_loop) = CourierBridge::builder(provider.clone()).build();
        let main_loop = main_loop.expect("default build creates a main loop");
        let source = bridge.event_source();
        Self {
            bridge,
            main_loop,
            source,
            provider,
            sink: RecordingSink::shared(),
        }
    }

    /// Build with every delivery inline.
    pub fn inline() -> Self {
        courier_test::init_test_logging();
        let provider = Arc::new(MockCapabilityProvider::new());
        let (main_loop, _unused) = MainLoop::channel();
        let (bridge, _) = CourierBridge::builder(provider.clone())
            .with_notification_dispatcher(Arc::new(InlineDispatcher))
            .build();
        let source = bridge.event_source();
        Self {
            bridge,
            main_loop,
            source,
            provider,
            sink: RecordingSink::shared(),
        }
    }

    /// Attach the recording sink.
    pub fn attach(&self) {
        self.bridge.attach(&self.sink);
    }

    /// Run queued main-loop deliveries.
    pub fn drain(&mut self) -> usize {
        self.main_loop.run_pending()
    }
}
