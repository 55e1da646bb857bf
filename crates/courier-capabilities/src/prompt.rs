//! Prompt/response gate for SMS access.
//!
//! A prompt is tracked as one [`PendingPrompt`] holding the issued
//! [`RequestCode`] and the completion side of a oneshot channel. The
//! platform's result callback resolves it exactly once, and only when its
//! code matches. Issuing a new prompt while one is outstanding rejects the
//! old one with [`CapabilityError::Superseded`].

use std::fmt;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use courier_core::{Capability, CapabilityGrant};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::error::{CapabilityError, CapabilityResult};
use crate::provider::{CapabilityProvider, PermissionState};

/// First request code issued by a [`PromptGate`] unless configured otherwise.
pub const DEFAULT_REQUEST_CODE: u16 = 10101;

/// Correlation token tying a prompt to its result callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestCode(pub u16);

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct PendingPrompt {
    code: RequestCode,
    permissions: Vec<String>,
    tx: oneshot::Sender<CapabilityResult<CapabilityGrant>>,
}

/// A prompt that has been shown and not yet answered.
///
/// Await [`wait`](Self::wait) for the result. There is no built-in timeout:
/// if the user dismisses the prompt without the platform calling back, the
/// future never completes.
#[derive(Debug)]
pub struct PendingGrant {
    code: RequestCode,
    rx: oneshot::Receiver<CapabilityResult<CapabilityGrant>>,
}

impl PendingGrant {
    /// The code the result callback must carry.
    #[must_use]
    pub fn code(&self) -> RequestCode {
        self.code
    }

    /// Wait for the correlated result.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::Superseded`] if a newer prompt replaced
    /// this one, or [`CapabilityError::Cancelled`] if the gate dropped it.
    pub async fn wait(self) -> CapabilityResult<CapabilityGrant> {
        let code = self.code;
        self.rx.await.map_err(|_| CapabilityError::Cancelled(code))?
    }

    /// Wait for the correlated result, giving up after `timeout`.
    ///
    /// `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// As [`wait`](Self::wait), plus [`CapabilityError::Timeout`] when the
    /// bound elapses first.
    pub async fn wait_for(self, timeout: Option<Duration>) -> CapabilityResult<CapabilityGrant> {
        let Some(limit) = timeout else {
            return self.wait().await;
        };
        let code = self.code;
        tokio::time::timeout(limit, self.wait())
            .await
            .map_err(|_| CapabilityError::Timeout {
                code,
                timeout_secs: limit.as_secs(),
            })?
    }
}

/// Gate for capabilities granted through a runtime prompt.
pub struct PromptGate {
    provider: Arc<dyn CapabilityProvider>,
    capability: Capability,
    permissions: Vec<String>,
    next_code: AtomicU16,
    pending: Mutex<Option<PendingPrompt>>,
}

impl PromptGate {
    /// Create a gate requiring every permission in `permissions`.
    ///
    /// Request codes are issued starting at `first_code`, wrapping.
    #[must_use]
    pub fn new(
        provider: Arc<dyn CapabilityProvider>,
        capability: Capability,
        permissions: Vec<String>,
        first_code: u16,
    ) -> Self {
        Self {
            provider,
            capability,
            permissions,
            next_code: AtomicU16::new(first_code),
            pending: Mutex::new(None),
        }
    }

    /// The permissions this gate requires.
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Whether every required permission is currently granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.permissions
            .iter()
            .all(|p| self.provider.check_permission(p).is_granted())
    }

    /// Code of the outstanding prompt, if any.
    #[must_use]
    pub fn pending_code(&self) -> Option<RequestCode> {
        self.lock().as_ref().map(|p| p.code)
    }

    /// Resolve immediately if already granted, otherwise show the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot show the prompt.
    pub fn request(&self) -> CapabilityResult<GrantRequest> {
        if self.is_granted() {
            debug!(capability = %self.capability, "Already granted, no prompt needed");
            return Ok(GrantRequest::Granted(CapabilityGrant::granted(
                self.capability,
            )));
        }

        let code = RequestCode(self.next_code.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = oneshot::channel();

        let previous = self.lock().replace(PendingPrompt {
            code,
            permissions: self.permissions.clone(),
            tx,
        });
        if let Some(previous) = previous {
            warn!(
                previous = %previous.code,
                next = %code,
                "Superseding outstanding permission prompt"
            );
            let _ = previous.tx.send(Err(CapabilityError::Superseded {
                previous: previous.code,
                next: code,
            }));
        }

        if let Err(e) = self.provider.request_permissions(&self.permissions, code) {
            self.cancel(code);
            return Err(e.into());
        }

        info!(capability = %self.capability, code = %code, "Permission prompt shown");
        Ok(GrantRequest::Pending(PendingGrant { code, rx }))
    }

    /// Deliver the platform's result callback.
    ///
    /// `permissions` and `results` are parallel arrays as reported by the
    /// platform. The capability is granted iff every required permission
    /// appears with a granted result; an empty report (interrupted prompt)
    /// resolves as denied.
    ///
    /// Returns `true` if the callback resolved the outstanding prompt. A
    /// callback with no outstanding prompt or a different code is ignored
    /// and leaves the outstanding prompt in place.
    pub fn handle_result(
        &self,
        code: RequestCode,
        permissions: &[String],
        results: &[PermissionState],
    ) -> bool {
        let pending = {
            let mut slot = self.lock();
            match slot.as_ref().map(|p| p.code) {
                None => {
                    debug!(code = %code, "Permission result with no outstanding prompt, ignoring");
                    return false;
                },
                Some(expected) if expected != code => {
                    warn!(
                        expected = %expected,
                        received = %code,
                        "Permission result for a different request, ignoring"
                    );
                    return false;
                },
                Some(_) => slot.take(),
            }
        };
        let Some(pending) = pending else {
            return false;
        };

        let granted = pending.permissions.iter().all(|required| {
            permissions
                .iter()
                .zip(results)
                .any(|(p, state)| p == required && state.is_granted())
        });

        info!(capability = %self.capability, code = %code, granted, "Permission prompt resolved");
        let _ = pending
            .tx
            .send(Ok(CapabilityGrant::new(self.capability, granted)));
        true
    }

    /// Drop the outstanding prompt if it carries `code`.
    ///
    /// Its [`PendingGrant`] resolves with [`CapabilityError::Cancelled`].
    pub fn cancel(&self, code: RequestCode) -> bool {
        let mut slot = self.lock();
        if slot.as_ref().is_some_and(|p| p.code == code) {
            slot.take();
            debug!(code = %code, "Permission prompt cancelled");
            true
        } else {
            false
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<PendingPrompt>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outcome of starting a permission request.
#[derive(Debug)]
pub enum GrantRequest {
    /// The answer is known now; no prompt is outstanding.
    Granted(CapabilityGrant),
    /// A prompt was shown and its result is pending.
    Pending(PendingGrant),
}

impl GrantRequest {
    /// Resolve to a grant, waiting on the prompt if one is outstanding.
    ///
    /// # Errors
    ///
    /// See [`PendingGrant::wait_for`].
    pub async fn resolve(self, timeout: Option<Duration>) -> CapabilityResult<CapabilityGrant> {
        match self {
            Self::Granted(grant) => Ok(grant),
            Self::Pending(pending) => pending.wait_for(timeout).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{READ_SMS, RECEIVE_SMS};
    use crate::testing::FakeProvider;

    fn sms_permissions() -> Vec<String> {
        vec![RECEIVE_SMS.to_owned(), READ_SMS.to_owned()]
    }

    fn gate(provider: Arc<FakeProvider>) -> PromptGate {
        PromptGate::new(
            provider,
            Capability::SmsAccess,
            sms_permissions(),
            DEFAULT_REQUEST_CODE,
        )
    }

    fn expect_pending(outcome: GrantRequest) -> PendingGrant {
        match outcome {
            GrantRequest::Pending(p) => p,
            GrantRequest::Granted(_) => panic!("expected a pending prompt"),
        }
    }

    #[tokio::test]
    async fn test_already_granted_resolves_without_prompt() {
        let provider = Arc::new(FakeProvider::default());
        provider.grant(RECEIVE_SMS);
        provider.grant(READ_SMS);
        let gate = gate(provider.clone());

        let outcome = gate.request().unwrap();

        assert!(matches!(outcome, GrantRequest::Granted(g) if g.granted));
        assert!(provider.prompts.lock().unwrap().is_empty());
        assert!(gate.pending_code().is_none());
    }

    #[tokio::test]
    async fn test_partial_grant_still_prompts() {
        let provider = Arc::new(FakeProvider::default());
        provider.grant(RECEIVE_SMS);
        let gate = gate(provider.clone());

        let pending = expect_pending(gate.request().unwrap());

        assert_eq!(pending.code(), RequestCode(DEFAULT_REQUEST_CODE));
        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, sms_permissions());
    }

    #[tokio::test]
    async fn test_matching_code_resolves() {
        let provider = Arc::new(FakeProvider::default());
        let gate = gate(provider);
        let pending = expect_pending(gate.request().unwrap());
        let code = pending.code();

        assert!(gate.handle_result(
            code,
            &sms_permissions(),
            &[PermissionState::Granted, PermissionState::Granted],
        ));

        let grant = pending.wait().await.unwrap();
        assert!(grant.granted);
        assert_eq!(grant.capability, Capability::SmsAccess);
        assert!(gate.pending_code().is_none());
    }

    #[tokio::test]
    async fn test_mismatched_code_is_ignored() {
        let provider = Arc::new(FakeProvider::default());
        let gate = gate(provider);
        let pending = expect_pending(gate.request().unwrap());
        let code = pending.code();

        assert!(!gate.handle_result(
            RequestCode(1),
            &sms_permissions(),
            &[PermissionState::Granted, PermissionState::Granted],
        ));
        assert_eq!(gate.pending_code(), Some(code));

        let mut wait = Box::pin(pending.wait());
        let not_yet = tokio::time::timeout(std::time::Duration::from_millis(20), &mut wait).await;
        assert!(not_yet.is_err());

        assert!(gate.handle_result(
            code,
            &sms_permissions(),
            &[PermissionState::Granted, PermissionState::Granted],
        ));
        assert!(wait.await.unwrap().granted);
    }

    #[tokio::test]
    async fn test_partial_result_denies() {
        let provider = Arc::new(FakeProvider::default());
        let gate = gate(provider);
        let pending = expect_pending(gate.request().unwrap());

        gate.handle_result(
            pending.code(),
            &sms_permissions(),
            &[PermissionState::Granted, PermissionState::Denied],
        );

        assert!(!pending.wait().await.unwrap().granted);
    }

    #[tokio::test]
    async fn test_empty_result_denies() {
        let provider = Arc::new(FakeProvider::default());
        let gate = gate(provider);
        let pending = expect_pending(gate.request().unwrap());

        gate.handle_result(pending.code(), &[], &[]);

        assert!(!pending.wait().await.unwrap().granted);
    }

    #[tokio::test]
    async fn test_result_order_does_not_matter() {
        let provider = Arc::new(FakeProvider::default());
        let gate = gate(provider);
        let pending = expect_pending(gate.request().unwrap());

        gate.handle_result(
            pending.code(),
            &[READ_SMS.to_owned(), RECEIVE_SMS.to_owned()],
            &[PermissionState::Granted, PermissionState::Granted],
        );

        assert!(pending.wait().await.unwrap().granted);
    }

    #[tokio::test]
    async fn test_result_without_pending_is_ignored() {
        let gate = gate(Arc::new(FakeProvider::default()));
        assert!(!gate.handle_result(RequestCode(DEFAULT_REQUEST_CODE), &[], &[]));
    }

    #[tokio::test]
    async fn test_new_prompt_supersedes_old() {
        let provider = Arc::new(FakeProvider::default());
        let gate = gate(provider);
        let first = expect_pending(gate.request().unwrap());
        let second = expect_pending(gate.request().unwrap());

        assert_ne!(first.code(), second.code());
        let err = first.wait().await.unwrap_err();
        assert_eq!(
            err,
            CapabilityError::Superseded {
                previous: RequestCode(DEFAULT_REQUEST_CODE),
                next: second.code(),
            }
        );

        // The stale code no longer resolves anything.
        assert!(!gate.handle_result(
            RequestCode(DEFAULT_REQUEST_CODE),
            &sms_permissions(),
            &[PermissionState::Granted, PermissionState::Granted],
        ));
        assert_eq!(gate.pending_code(), Some(second.code()));
    }

    #[tokio::test]
    async fn test_prompt_failure_clears_pending() {
        let provider = Arc::new(FakeProvider {
            prompt_error: Some(crate::ProviderError::ActivityUnavailable),
            ..FakeProvider::default()
        });
        let gate = gate(provider);

        let err = gate.request().unwrap_err();

        assert_eq!(err, CapabilityError::ActivityUnavailable);
        assert!(gate.pending_code().is_none());
    }

    #[tokio::test]
    async fn test_cancel_resolves_cancelled() {
        let gate = gate(Arc::new(FakeProvider::default()));
        let pending = expect_pending(gate.request().unwrap());
        let code = pending.code();

        assert!(!gate.cancel(RequestCode(0)));
        assert!(gate.cancel(code));
        assert_eq!(
            pending.wait().await.unwrap_err(),
            CapabilityError::Cancelled(code)
        );
    }

    #[tokio::test]
    async fn test_wait_for_times_out() {
        let gate = gate(Arc::new(FakeProvider::default()));
        let request = gate.request().unwrap();

        let err = request
            .resolve(Some(Duration::from_millis(10)))
            .await
            .unwrap_err();

        assert!(matches!(err, CapabilityError::Timeout { code, .. } if code == RequestCode(DEFAULT_REQUEST_CODE)));
    }

    #[test]
    fn test_request_code_wraps() {
        let gate = PromptGate::new(
            Arc::new(FakeProvider::default()),
            Capability::SmsAccess,
            sms_permissions(),
            u16::MAX,
        );
        let first = expect_pending(gate.request().unwrap());
        let second = expect_pending(gate.request().unwrap());
        assert_eq!(first.code(), RequestCode(u16::MAX));
        assert_eq!(second.code(), RequestCode(0));
    }
}
