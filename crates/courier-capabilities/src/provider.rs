//! The platform seam for permission state.

use std::collections::HashSet;

use thiserror::Error;

use crate::prompt::RequestCode;

/// Runtime permission to receive SMS broadcasts.
pub const RECEIVE_SMS: &str = "android.permission.RECEIVE_SMS";

/// Runtime permission to read SMS content.
pub const READ_SMS: &str = "android.permission.READ_SMS";

/// Permissions that together make up SMS access.
pub const DEFAULT_SMS_PERMISSIONS: [&str; 2] = [RECEIVE_SMS, READ_SMS];

/// State of one runtime permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The permission is granted.
    Granted,
    /// The permission is denied or not yet requested.
    Denied,
}

impl PermissionState {
    /// Whether this is [`PermissionState::Granted`].
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for PermissionState {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// Failures reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No application context is available.
    #[error("application context unavailable")]
    ContextUnavailable,
    /// No foreground activity is available.
    #[error("activity unavailable")]
    ActivityUnavailable,
    /// Any other platform failure.
    #[error("{0}")]
    Platform(String),
}

/// Platform operations the capability gates depend on.
///
/// Implemented by the concrete platform adapter; mocked in tests.
pub trait CapabilityProvider: Send + Sync {
    /// Identifier of this application.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ContextUnavailable`] when there is no
    /// application context.
    fn application_id(&self) -> Result<String, ProviderError>;

    /// Applications currently approved as notification listeners.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be read.
    fn enabled_listener_packages(&self) -> Result<HashSet<String>, ProviderError>;

    /// Open the OS notification-listener settings screen.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no context to launch from.
    fn open_listener_settings(&self) -> Result<(), ProviderError>;

    /// Current state of one runtime permission.
    fn check_permission(&self, permission: &str) -> PermissionState;

    /// Show the runtime prompt for `permissions`.
    ///
    /// The answer arrives later through
    /// [`PromptGate::handle_result`](crate::PromptGate::handle_result) with
    /// the same `request_code`, or never if the user dismisses the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown.
    fn request_permissions(
        &self,
        permissions: &[String],
        request_code: RequestCode,
    ) -> Result<(), ProviderError>;
}
