//! In-crate fake provider for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::prompt::RequestCode;
use crate::provider::{CapabilityProvider, PermissionState, ProviderError};

pub(crate) const APP_ID: &str = "com.example.courier";

#[derive(Default)]
pub(crate) struct FakeProvider {
    pub(crate) no_context: bool,
    pub(crate) listeners: Mutex<HashSet<String>>,
    pub(crate) granted: Mutex<HashSet<String>>,
    pub(crate) settings_opened: Mutex<usize>,
    pub(crate) prompts: Mutex<Vec<(Vec<String>, RequestCode)>>,
    pub(crate) prompt_error: Option<ProviderError>,
}

impl FakeProvider {
    pub(crate) fn with_listener_access() -> Self {
        let provider = Self::default();
        provider.listeners.lock().unwrap().insert(APP_ID.to_owned());
        provider
    }

    pub(crate) fn grant(&self, permission: &str) {
        self.granted.lock().unwrap().insert(permission.to_owned());
    }
}

impl CapabilityProvider for FakeProvider {
    fn application_id(&self) -> Result<String, ProviderError> {
        if self.no_context {
            Err(ProviderError::ContextUnavailable)
        } else {
            Ok(APP_ID.to_owned())
        }
    }

    fn enabled_listener_packages(&self) -> Result<HashSet<String>, ProviderError> {
        Ok(self.listeners.lock().unwrap().clone())
    }

    fn open_listener_settings(&self) -> Result<(), ProviderError> {
        if self.no_context {
            return Err(ProviderError::ContextUnavailable);
        }
        let mut opened = self.settings_opened.lock().unwrap();
        *opened = opened.saturating_add(1);
        Ok(())
    }

    fn check_permission(&self, permission: &str) -> PermissionState {
        self.granted.lock().unwrap().contains(permission).into()
    }

    fn request_permissions(
        &self,
        permissions: &[String],
        request_code: RequestCode,
    ) -> Result<(), ProviderError> {
        if let Some(err) = &self.prompt_error {
            return Err(err.clone());
        }
        self.prompts
            .lock()
            .unwrap()
            .push((permissions.to_vec(), request_code));
        Ok(())
    }
}
