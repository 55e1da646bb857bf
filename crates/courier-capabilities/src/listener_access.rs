//! List-membership gate for notification access.

use std::sync::Arc;

use courier_core::{Capability, CapabilityGrant};
use tracing::{debug, info};

use crate::error::CapabilityResult;
use crate::provider::CapabilityProvider;

/// Gate for capabilities granted by membership in an OS-maintained list.
///
/// There is no callback: after [`request`](Self::request) opens the settings
/// screen, the caller has to query again (for example when the application
/// returns to the foreground) to learn the outcome.
pub struct ListenerAccessGate {
    provider: Arc<dyn CapabilityProvider>,
}

impl ListenerAccessGate {
    /// Create a gate backed by `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self { provider }
    }

    /// Whether this application is in the approved-listener list.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no application context or the list
    /// cannot be read.
    pub fn is_granted(&self) -> CapabilityResult<bool> {
        let app_id = self.provider.application_id()?;
        let granted = self.provider.enabled_listener_packages()?.contains(&app_id);
        debug!(app_id = %app_id, granted, "Queried notification listener access");
        Ok(granted)
    }

    /// Report the current state, opening the settings screen if not granted.
    ///
    /// The returned grant reflects the state *before* the user acts on the
    /// settings screen.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no application context to query or to
    /// launch the settings screen from.
    pub fn request(&self) -> CapabilityResult<CapabilityGrant> {
        let granted = self.is_granted()?;
        if !granted {
            self.provider.open_listener_settings()?;
            info!("Opened notification listener settings");
        }
        Ok(CapabilityGrant::new(Capability::NotificationAccess, granted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CapabilityError;
    use crate::testing::{APP_ID, FakeProvider};

    #[test]
    fn test_granted_does_not_open_settings() {
        let provider = Arc::new(FakeProvider::with_listener_access());
        let gate = ListenerAccessGate::new(provider.clone());

        let grant = gate.request().unwrap();

        assert!(grant.granted);
        assert_eq!(grant.capability, Capability::NotificationAccess);
        assert_eq!(*provider.settings_opened.lock().unwrap(), 0);
    }

    #[test]
    fn test_not_granted_opens_settings_once() {
        let provider = Arc::new(FakeProvider::default());
        let gate = ListenerAccessGate::new(provider.clone());

        let grant = gate.request().unwrap();

        assert!(!grant.granted);
        assert_eq!(*provider.settings_opened.lock().unwrap(), 1);
    }

    #[test]
    fn test_requery_sees_later_grant() {
        let provider = Arc::new(FakeProvider::default());
        let gate = ListenerAccessGate::new(provider.clone());

        assert!(!gate.is_granted().unwrap());
        provider.listeners.lock().unwrap().insert(APP_ID.to_owned());
        assert!(gate.is_granted().unwrap());
    }

    #[test]
    fn test_other_listener_does_not_count() {
        let provider = Arc::new(FakeProvider::default());
        provider
            .listeners
            .lock()
            .unwrap()
            .insert("com.other.app".to_owned());
        let gate = ListenerAccessGate::new(provider);

        assert!(!gate.is_granted().unwrap());
    }

    #[test]
    fn test_no_context_rejects() {
        let provider = Arc::new(FakeProvider {
            no_context: true,
            ..FakeProvider::default()
        });
        let gate = ListenerAccessGate::new(provider.clone());

        assert_eq!(gate.request().unwrap_err(), CapabilityError::ContextUnavailable);
        assert_eq!(*provider.settings_opened.lock().unwrap(), 0);
    }
}
