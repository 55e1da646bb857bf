//! Capability provider for running without a platform.

use std::collections::HashSet;

use courier_capabilities::{CapabilityProvider, PermissionState, ProviderError, RequestCode};

/// A provider with no application context. Nothing is ever granted.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HeadlessProvider;

impl CapabilityProvider for HeadlessProvider {
    fn application_id(&self) -> Result<String, ProviderError> {
        Err(ProviderError::ContextUnavailable)
    }

    fn enabled_listener_packages(&self) -> Result<HashSet<String>, ProviderError> {
        Ok(HashSet::new())
    }

    fn open_listener_settings(&self) -> Result<(), ProviderError> {
        Err(ProviderError::ContextUnavailable)
    }

    fn check_permission(&self, _permission: &str) -> PermissionState {
        PermissionState::Denied
    }

    fn request_permissions(
        &self,
        _permissions: &[String],
        _request_code: RequestCode,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::ActivityUnavailable)
    }
}
