//! Prelude module - commonly used types for convenient import.
//!
//! Use `use courier_capabilities::prelude::*;` to import all essential types.

// Errors
pub use crate::{CapabilityError, CapabilityResult};

// Gates
pub use crate::{CapabilityGate, GrantRequest, ListenerAccessGate, PendingGrant, PromptGate};

// Platform seam
pub use crate::{CapabilityProvider, PermissionState, ProviderError, RequestCode};
