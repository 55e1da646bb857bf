//! Courier Capabilities - Permission gating for listeners.
//!
//! Two permission models sit behind one contract:
//!
//! - **List membership** ([`ListenerAccessGate`]): notification access is
//!   granted iff this application appears in the OS list of approved
//!   listeners. Requesting it can only open a settings screen; the caller
//!   learns nothing until it queries again.
//! - **Prompt/response** ([`PromptGate`]): SMS access is granted iff every
//!   required permission is granted. Requesting it shows a runtime prompt
//!   whose answer arrives later as a callback correlated by a
//!   [`RequestCode`].
//!
//! The platform side is abstracted as a [`CapabilityProvider`]. Nothing here
//! caches a grant decision; every query goes back to the provider.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod gate;
mod listener_access;
mod prompt;
mod provider;

pub use error::{CapabilityError, CapabilityResult};
pub use gate::CapabilityGate;
pub use listener_access::ListenerAccessGate;
pub use prompt::{DEFAULT_REQUEST_CODE, GrantRequest, PendingGrant, PromptGate, RequestCode};
pub use provider::{
    CapabilityProvider, DEFAULT_SMS_PERMISSIONS, PermissionState, ProviderError, READ_SMS,
    RECEIVE_SMS,
};

#[cfg(test)]
mod testing;
