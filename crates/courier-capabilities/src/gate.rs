//! Uniform grant interface over both permission models.

use std::sync::Arc;

use courier_core::Capability;
use tracing::warn;

use crate::error::CapabilityResult;
use crate::listener_access::ListenerAccessGate;
use crate::prompt::{DEFAULT_REQUEST_CODE, GrantRequest, PromptGate, RequestCode};
use crate::provider::{CapabilityProvider, DEFAULT_SMS_PERMISSIONS, PermissionState};

/// Answers "is capability X granted?" and "request capability X" for every
/// [`Capability`], whichever model backs it.
pub struct CapabilityGate {
    listener_access: ListenerAccessGate,
    sms: PromptGate,
}

impl CapabilityGate {
    /// Create a gate with the default SMS permission set and request codes.
    #[must_use]
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self::with_sms_permissions(
            provider,
            DEFAULT_SMS_PERMISSIONS.iter().map(|p| (*p).to_owned()).collect(),
            DEFAULT_REQUEST_CODE,
        )
    }

    /// Create a gate requiring `sms_permissions` for SMS access, issuing
    /// request codes from `first_code`.
    #[must_use]
    pub fn with_sms_permissions(
        provider: Arc<dyn CapabilityProvider>,
        sms_permissions: Vec<String>,
        first_code: u16,
    ) -> Self {
        Self {
            listener_access: ListenerAccessGate::new(Arc::clone(&provider)),
            sms: PromptGate::new(provider, Capability::SmsAccess, sms_permissions, first_code),
        }
    }

    /// Whether `capability` is granted right now.
    ///
    /// Query failures are logged and reported as not granted.
    #[must_use]
    pub fn is_granted(&self, capability: Capability) -> bool {
        match capability {
            Capability::NotificationAccess => {
                self.listener_access.is_granted().unwrap_or_else(|e| {
                    warn!(capability = %capability, error = %e, "Grant query failed");
                    false
                })
            },
            Capability::SmsAccess => self.sms.is_granted(),
        }
    }

    /// Start a request for `capability`.
    ///
    /// Notification access always resolves immediately with the state before
    /// the user acts on the settings screen. SMS access resolves immediately
    /// when already granted, otherwise it is pending on the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot query or prompt.
    pub fn request_grant(&self, capability: Capability) -> CapabilityResult<GrantRequest> {
        match capability {
            Capability::NotificationAccess => {
                self.listener_access.request().map(GrantRequest::Granted)
            },
            Capability::SmsAccess => self.sms.request(),
        }
    }

    /// Route a prompt result callback to the SMS prompt gate.
    ///
    /// Returns `true` if it resolved the outstanding prompt.
    pub fn handle_permission_result(
        &self,
        code: RequestCode,
        permissions: &[String],
        results: &[PermissionState],
    ) -> bool {
        self.sms.handle_result(code, permissions, results)
    }

    /// The list-membership gate.
    #[must_use]
    pub fn listener_access(&self) -> &ListenerAccessGate {
        &self.listener_access
    }

    /// The prompt gate for SMS access.
    #[must_use]
    pub fn sms(&self) -> &PromptGate {
        &self.sms
    }
}
