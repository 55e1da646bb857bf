//! Capability identifiers and grant results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A gated OS-level permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Access to posted notifications (list-membership model).
    NotificationAccess,
    /// Access to incoming SMS (prompt/response model).
    SmsAccess,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotificationAccess => write!(f, "notification_access"),
            Self::SmsAccess => write!(f, "sms_access"),
        }
    }
}

/// The state of one capability at the moment it was queried.
///
/// Never cached: the OS is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityGrant {
    /// Which capability was queried.
    pub capability: Capability,
    /// Whether it is granted.
    pub granted: bool,
}

impl CapabilityGrant {
    /// Create a grant result.
    #[must_use]
    pub fn new(capability: Capability, granted: bool) -> Self {
        Self {
            capability,
            granted,
        }
    }

    /// A granted result.
    #[must_use]
    pub fn granted(capability: Capability) -> Self {
        Self::new(capability, true)
    }

    /// A denied result.
    #[must_use]
    pub fn denied(capability: Capability) -> Self {
        Self::new(capability, false)
    }
}

/// The `{ granted: boolean }` result returned by permission request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResponse {
    /// Whether the capability is granted.
    pub granted: bool,
}

impl From<CapabilityGrant> for PermissionResponse {
    fn from(grant: CapabilityGrant) -> Self {
        Self {
            granted: grant.granted,
        }
    }
}
