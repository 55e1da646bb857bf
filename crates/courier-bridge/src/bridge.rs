//! Assembly of registry, listeners and permission surfaces.

use std::sync::Arc;
use std::time::Duration;

use courier_capabilities::{
    CapabilityGate, CapabilityProvider, DEFAULT_REQUEST_CODE, DEFAULT_SMS_PERMISSIONS,
};
use courier_core::{Capability, DEFAULT_SMS_FORMAT, DeliverySink};
use tracing::debug;

use crate::dispatch::{Dispatcher, InlineDispatcher, MainLoop};
use crate::listener::{NotificationListener, SmsListener};
use crate::plugin::{NotificationPlugin, SmsPlugin};
use crate::registry::SinkRegistry;
use crate::source::{EventSource, ListenerPipeline};

/// The assembled bridge.
///
/// Owns one [`SinkRegistry`] shared by both listeners. The platform adapter
/// drives [`event_source`](Self::event_source); the host attaches its sink
/// and calls the permission surfaces.
pub struct CourierBridge {
    registry: Arc<SinkRegistry>,
    gate: Arc<CapabilityGate>,
    source: Arc<ListenerPipeline>,
    notifications: NotificationPlugin,
    sms: SmsPlugin,
}

impl CourierBridge {
    /// Start building a bridge over `provider`.
    #[must_use]
    pub fn builder(provider: Arc<dyn CapabilityProvider>) -> BridgeBuilder {
        BridgeBuilder::new(provider)
    }

    /// Make `sink` the delivery target. The bridge holds it weakly.
    pub fn attach<S: DeliverySink + 'static>(&self, sink: &Arc<S>) {
        self.registry.attach(sink);
    }

    /// Stop delivering.
    pub fn detach(&self) {
        self.registry.detach();
    }

    /// Whether a live sink is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.registry.is_attached()
    }

    /// The entry points for platform callbacks.
    #[must_use]
    pub fn event_source(&self) -> Arc<dyn EventSource> {
        Arc::clone(&self.source) as Arc<dyn EventSource>
    }

    /// The shared sink registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<SinkRegistry> {
        &self.registry
    }

    /// Notification permission surface.
    #[must_use]
    pub fn notifications(&self) -> &NotificationPlugin {
        &self.notifications
    }

    /// SMS permission surface.
    #[must_use]
    pub fn sms(&self) -> &SmsPlugin {
        &self.sms
    }

    /// Whether `capability` is granted right now.
    #[must_use]
    pub fn is_granted(&self, capability: Capability) -> bool {
        self.gate.is_granted(capability)
    }
}

/// Builder for [`CourierBridge`].
pub struct BridgeBuilder {
    provider: Arc<dyn CapabilityProvider>,
    notification_dispatcher: Option<Arc<dyn Dispatcher>>,
    sms_dispatcher: Arc<dyn Dispatcher>,
    default_format: String,
    sms_permissions: Vec<String>,
    request_code: u16,
    prompt_timeout: Option<Duration>,
}

impl BridgeBuilder {
    /// Create a builder with default settings.
    #[must_use]
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self {
            provider,
            notification_dispatcher: None,
            sms_dispatcher: Arc::new(InlineDispatcher),
            default_format: DEFAULT_SMS_FORMAT.to_owned(),
            sms_permissions: DEFAULT_SMS_PERMISSIONS
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
            request_code: DEFAULT_REQUEST_CODE,
            prompt_timeout: None,
        }
    }

    /// Dispatcher for notification deliveries.
    ///
    /// Normally the host's main loop. Without one, [`build`](Self::build)
    /// creates a [`MainLoop`] and returns it for the host to drive.
    #[must_use]
    pub fn with_notification_dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.notification_dispatcher = Some(dispatcher);
        self
    }

    /// Dispatcher for SMS deliveries. Defaults to inline.
    #[must_use]
    pub fn with_sms_dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.sms_dispatcher = dispatcher;
        self
    }

    /// Format assumed for broadcasts without a format tag.
    #[must_use]
    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    /// Permissions that together make up SMS access.
    #[must_use]
    pub fn with_sms_permissions(mut self, permissions: Vec<String>) -> Self {
        self.sms_permissions = permissions;
        self
    }

    /// First request code issued for SMS prompts.
    #[must_use]
    pub fn with_request_code(mut self, code: u16) -> Self {
        self.request_code = code;
        self
    }

    /// Bound on waiting for an SMS prompt result. `None` waits forever.
    #[must_use]
    pub fn with_prompt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.prompt_timeout = timeout;
        self
    }

    /// Assemble the bridge.
    ///
    /// Returns the [`MainLoop`] created for notification delivery when no
    /// notification dispatcher was supplied.
    #[must_use]
    pub fn build(self) -> (CourierBridge, Option<MainLoop>) {
        let (notification_dispatcher, main_loop) = match self.notification_dispatcher {
            Some(dispatcher) => (dispatcher, None),
            None => {
                let (main_loop, dispatcher) = MainLoop::channel();
                (Arc::new(dispatcher) as Arc<dyn Dispatcher>, Some(main_loop))
            },
        };

        let registry = Arc::new(SinkRegistry::new());
        let gate = Arc::new(CapabilityGate::with_sms_permissions(
            self.provider,
            self.sms_permissions,
            self.request_code,
        ));
        let source = Arc::new(ListenerPipeline::new(
            NotificationListener::new(Arc::clone(&registry), notification_dispatcher),
            SmsListener::new(
                Arc::clone(&registry),
                self.sms_dispatcher,
                self.default_format,
            ),
        ));

        debug!(
            request_code = self.request_code,
            prompt_timeout = ?self.prompt_timeout,
            "Bridge assembled"
        );

        let bridge = CourierBridge {
            registry,
            notifications: NotificationPlugin::new(Arc::clone(&gate)),
            sms: SmsPlugin::new(Arc::clone(&gate), self.prompt_timeout),
            gate,
            source,
        };
        (bridge, main_loop)
    }
}
