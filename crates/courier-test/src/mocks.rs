//! Mock implementations for testing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use courier_capabilities::{CapabilityProvider, PermissionState, ProviderError, RequestCode};
use courier_core::DeliverySink;
use serde_json::Value;

/// Application identifier reported by [`MockCapabilityProvider`].
pub const TEST_APP_ID: &str = "com.example.courier";

/// A delivery captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// Event name.
    pub name: String,
    /// Event payload.
    pub payload: Value,
}

/// Delivery sink that records every event it receives.
///
/// Uses `std::sync::Mutex` for simplicity and sync/async compatibility.
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl RecordingSink {
    /// Create a new recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording sink already wrapped for attaching.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of deliveries so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.events.lock().map(|g| g.len()).unwrap_or_default()
    }

    /// All captured events in delivery order.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Captured events with the given name.
    #[must_use]
    pub fn events_named(&self, name: &str) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .map(|g| g.iter().filter(|e| e.name == name).cloned().collect())
            .unwrap_or_default()
    }

    /// The most recent delivery.
    #[must_use]
    pub fn last(&self) -> Option<RecordedEvent> {
        self.events.lock().ok().and_then(|g| g.last().cloned())
    }

    /// Forget everything captured so far.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.events.lock() {
            guard.clear();
        }
    }
}

impl DeliverySink for RecordingSink {
    fn deliver(&self, event_name: &str, payload: Value) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(RecordedEvent {
                name: event_name.to_owned(),
                payload,
            });
        }
    }
}

/// Scripted platform permission state.
///
/// Grant state can be changed between calls to simulate the user acting on
/// a settings screen or prompt. Every side effect is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockCapabilityProvider {
    no_context: Arc<Mutex<bool>>,
    no_activity: Arc<Mutex<bool>>,
    listeners: Arc<Mutex<HashSet<String>>>,
    granted: Arc<Mutex<HashSet<String>>>,
    settings_launches: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<(Vec<String>, RequestCode)>>>,
}

impl MockCapabilityProvider {
    /// Create a provider with nothing granted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with this application in the approved-listener list.
    #[must_use]
    pub fn with_listener_access(self) -> Self {
        self.set_listener_access(true);
        self
    }

    /// Start with `permission` granted.
    #[must_use]
    pub fn with_permission(self, permission: &str) -> Self {
        self.grant_permission(permission);
        self
    }

    /// Start with no application context available.
    #[must_use]
    pub fn without_context(self) -> Self {
        if let Ok(mut guard) = self.no_context.lock() {
            *guard = true;
        }
        self
    }

    /// Start with no foreground activity available to host prompts.
    #[must_use]
    pub fn without_activity(self) -> Self {
        if let Ok(mut guard) = self.no_activity.lock() {
            *guard = true;
        }
        self
    }

    /// Add or remove this application from the approved-listener list.
    pub fn set_listener_access(&self, enabled: bool) {
        if let Ok(mut guard) = self.listeners.lock() {
            if enabled {
                guard.insert(TEST_APP_ID.to_owned());
            } else {
                guard.remove(TEST_APP_ID);
            }
        }
    }

    /// Grant one runtime permission.
    pub fn grant_permission(&self, permission: &str) {
        if let Ok(mut guard) = self.granted.lock() {
            guard.insert(permission.to_owned());
        }
    }

    /// Revoke one runtime permission.
    pub fn revoke_permission(&self, permission: &str) {
        if let Ok(mut guard) = self.granted.lock() {
            guard.remove(permission);
        }
    }

    /// How many times the listener settings screen was opened.
    #[must_use]
    pub fn settings_launches(&self) -> usize {
        self.settings_launches.lock().map(|g| *g).unwrap_or_default()
    }

    /// Every prompt shown, with its permissions and request code.
    #[must_use]
    pub fn prompts(&self) -> Vec<(Vec<String>, RequestCode)> {
        self.prompts.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Code of the most recent prompt.
    #[must_use]
    pub fn last_prompt_code(&self) -> Option<RequestCode> {
        self.prompts
            .lock()
            .ok()
            .and_then(|g| g.last().map(|(_, code)| *code))
    }

    fn has_context(&self) -> bool {
        !self.no_context.lock().map(|g| *g).unwrap_or(false)
    }
}

impl CapabilityProvider for MockCapabilityProvider {
    fn application_id(&self) -> Result<String, ProviderError> {
        if self.has_context() {
            Ok(TEST_APP_ID.to_owned())
        } else {
            Err(ProviderError::ContextUnavailable)
        }
    }

    fn enabled_listener_packages(&self) -> Result<HashSet<String>, ProviderError> {
        self.listeners
            .lock()
            .map(|g| g.clone())
            .map_err(|e| ProviderError::Platform(e.to_string()))
    }

    fn open_listener_settings(&self) -> Result<(), ProviderError> {
        if !self.has_context() {
            return Err(ProviderError::ContextUnavailable);
        }
        if let Ok(mut guard) = self.settings_launches.lock() {
            *guard = guard.saturating_add(1);
        }
        Ok(())
    }

    fn check_permission(&self, permission: &str) -> PermissionState {
        self.granted
            .lock()
            .map(|g| g.contains(permission))
            .unwrap_or(false)
            .into()
    }

    fn request_permissions(
        &self,
        permissions: &[String],
        request_code: RequestCode,
    ) -> Result<(), ProviderError> {
        if self.no_activity.lock().map(|g| *g).unwrap_or(false) {
            return Err(ProviderError::ActivityUnavailable);
        }
        if let Ok(mut guard) = self.prompts.lock() {
            guard.push((permissions.to_vec(), request_code));
        }
        Ok(())
    }
}
