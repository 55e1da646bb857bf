//! Permission surfaces exposed to the host runtime.

use std::sync::Arc;
use std::time::Duration;

use courier_capabilities::{
    CapabilityError, CapabilityGate, CapabilityResult, GrantRequest, PermissionState, RequestCode,
};
use courier_core::{Capability, CapabilityGrant, PermissionResponse};
use tracing::{info, warn};

/// Notification-access surface.
///
/// Notification access is granted outside this process, in the OS settings
/// screen, and nothing calls back when the user acts on it. The host calls
/// [`refresh_grant`](Self::refresh_grant) whenever the application returns
/// to the foreground to learn the current state.
pub struct NotificationPlugin {
    gate: Arc<CapabilityGate>,
}

impl NotificationPlugin {
    /// Create the surface over `gate`.
    #[must_use]
    pub fn new(gate: Arc<CapabilityGate>) -> Self {
        Self { gate }
    }

    /// Report current access, opening the settings screen if not granted.
    ///
    /// Resolves immediately; it does not wait for the user.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::ContextUnavailable`] when there is no
    /// application context to query or launch from.
    pub fn request_permission(&self) -> CapabilityResult<PermissionResponse> {
        let grant = self
            .gate
            .listener_access()
            .request()
            .inspect_err(|e| warn!(error = %e, "Notification permission request failed"))?;
        Ok(grant.into())
    }

    /// Re-read access from the OS.
    ///
    /// Call on every return to the foreground. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the approved-listener list cannot be read.
    pub fn refresh_grant(&self) -> CapabilityResult<CapabilityGrant> {
        let granted = self.gate.listener_access().is_granted()?;
        info!(granted, "Refreshed notification access");
        Ok(CapabilityGrant::new(Capability::NotificationAccess, granted))
    }

    /// Whether access is granted right now.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.gate.is_granted(Capability::NotificationAccess)
    }
}

/// SMS-access surface.
pub struct SmsPlugin {
    gate: Arc<CapabilityGate>,
    prompt_timeout: Option<Duration>,
}

impl SmsPlugin {
    /// Create the surface over `gate`.
    ///
    /// With `prompt_timeout` of `None`, [`request_permissions`] waits as
    /// long as the platform takes, which may be forever.
    ///
    /// [`request_permissions`]: Self::request_permissions
    #[must_use]
    pub fn new(gate: Arc<CapabilityGate>, prompt_timeout: Option<Duration>) -> Self {
        Self {
            gate,
            prompt_timeout,
        }
    }

    /// Ensure every SMS permission is granted, prompting if needed.
    ///
    /// Resolves immediately when already granted, otherwise once the
    /// correlated result arrives through
    /// [`handle_request_permissions_result`](Self::handle_request_permissions_result).
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::ActivityUnavailable`] if the prompt cannot
    /// be shown, [`CapabilityError::Superseded`] if a newer request replaced
    /// this one, and [`CapabilityError::Timeout`] if the configured bound
    /// elapses.
    pub async fn request_permissions(&self) -> CapabilityResult<PermissionResponse> {
        let pending = match self.gate.request_grant(Capability::SmsAccess) {
            Ok(GrantRequest::Granted(grant)) => return Ok(grant.into()),
            Ok(GrantRequest::Pending(pending)) => pending,
            Err(e) => {
                warn!(error = %e, "SMS permission request failed");
                return Err(e);
            },
        };

        let code = pending.code();
        match pending.wait_for(self.prompt_timeout).await {
            Ok(grant) => Ok(grant.into()),
            Err(e @ CapabilityError::Timeout { .. }) => {
                self.gate.sms().cancel(code);
                warn!(code = %code, "SMS permission prompt timed out");
                Err(e)
            },
            Err(e) => Err(e),
        }
    }

    /// Platform callback carrying the prompt result.
    ///
    /// Returns `true` if it resolved the outstanding request.
    pub fn handle_request_permissions_result(
        &self,
        code: RequestCode,
        permissions: &[String],
        results: &[PermissionState],
    ) -> bool {
        self.gate
            .handle_permission_result(code, permissions, results)
    }

    /// Whether every SMS permission is granted right now.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.gate.is_granted(Capability::SmsAccess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_capabilities::{READ_SMS, RECEIVE_SMS};
    use courier_test::MockCapabilityProvider;

    fn gate(provider: &Arc<MockCapabilityProvider>) -> Arc<CapabilityGate> {
        Arc::new(CapabilityGate::new(Arc::clone(provider) as _))
    }

    #[test]
    fn test_request_permission_granted_skips_settings() {
        let provider = Arc::new(MockCapabilityProvider::new().with_listener_access());
        let plugin = NotificationPlugin::new(gate(&provider));

        let response = plugin.request_permission().unwrap();

        assert!(response.granted);
        assert_eq!(provider.settings_launches(), 0);
    }

    #[test]
    fn test_request_permission_opens_settings_once() {
        let provider = Arc::new(MockCapabilityProvider::new());
        let plugin = NotificationPlugin::new(gate(&provider));

        let response = plugin.request_permission().unwrap();

        assert!(!response.granted);
        assert_eq!(provider.settings_launches(), 1);
    }

    #[test]
    fn test_request_permission_without_context() {
        let provider = Arc::new(MockCapabilityProvider::new().without_context());
        let plugin = NotificationPlugin::new(gate(&provider));

        let err = plugin.request_permission().unwrap_err();
        assert_eq!(err.to_string(), "Context unavailable");
    }

    #[test]
    fn test_refresh_grant_sees_settings_change() {
        let provider = Arc::new(MockCapabilityProvider::new());
        let plugin = NotificationPlugin::new(gate(&provider));
        assert!(!plugin.refresh_grant().unwrap().granted);

        provider.set_listener_access(true);
        assert!(plugin.refresh_grant().unwrap().granted);
        assert!(plugin.is_granted());

        provider.set_listener_access(false);
        assert!(!plugin.refresh_grant().unwrap().granted);
    }

    #[tokio::test]
    async fn test_request_permissions_already_granted() {
        let provider = Arc::new(
            MockCapabilityProvider::new()
                .with_permission(RECEIVE_SMS)
                .with_permission(READ_SMS),
        );
        let plugin = SmsPlugin::new(gate(&provider), None);

        assert!(plugin.request_permissions().await.unwrap().granted);
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_request_permissions_resolves_on_callback() {
        let provider = Arc::new(MockCapabilityProvider::new());
        let plugin = Arc::new(SmsPlugin::new(gate(&provider), None));

        let waiter = {
            let plugin = Arc::clone(&plugin);
            tokio::spawn(async move { plugin.request_permissions().await })
        };
        while provider.last_prompt_code().is_none() {
            tokio::task::yield_now().await;
        }
        let code = provider.last_prompt_code().unwrap();

        assert!(plugin.handle_request_permissions_result(
            code,
            &[RECEIVE_SMS.to_owned(), READ_SMS.to_owned()],
            &[PermissionState::Granted, PermissionState::Granted],
        ));

        assert!(waiter.await.unwrap().unwrap().granted);
    }

    #[tokio::test]
    async fn test_request_permissions_timeout_clears_prompt() {
        let provider = Arc::new(MockCapabilityProvider::new());
        let plugin = SmsPlugin::new(gate(&provider), Some(Duration::from_millis(10)));

        let err = plugin.request_permissions().await.unwrap_err();

        assert!(matches!(err, CapabilityError::Timeout { .. }));
        assert!(plugin.gate.sms().pending_code().is_none());
    }

    #[tokio::test]
    async fn test_request_permissions_without_activity() {
        let provider = Arc::new(MockCapabilityProvider::new().without_activity());
        let plugin = SmsPlugin::new(gate(&provider), None);

        let err = plugin.request_permissions().await.unwrap_err();
        assert_eq!(err, CapabilityError::ActivityUnavailable);
    }
}
