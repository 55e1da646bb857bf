//! Capability error types.

use thiserror::Error;

use crate::prompt::RequestCode;
use crate::provider::ProviderError;

/// Errors surfaced by permission requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    /// No application context is available to query or launch anything.
    #[error("Context unavailable")]
    ContextUnavailable,

    /// No foreground activity is available to host a prompt.
    #[error("Activity unavailable")]
    ActivityUnavailable,

    /// The platform rejected the operation.
    #[error("platform error: {0}")]
    Provider(String),

    /// A newer prompt replaced this one before it resolved.
    #[error("permission request {previous} superseded by request {next}")]
    Superseded {
        /// Code of the replaced request.
        previous: RequestCode,
        /// Code of the request that replaced it.
        next: RequestCode,
    },

    /// The pending request was dropped without a result.
    #[error("permission request {0} was cancelled")]
    Cancelled(RequestCode),

    /// No result arrived within the configured bound.
    #[error("permission request {code} timed out after {timeout_secs}s")]
    Timeout {
        /// Code of the request that timed out.
        code: RequestCode,
        /// The bound that elapsed.
        timeout_secs: u64,
    },
}

impl From<ProviderError> for CapabilityError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ContextUnavailable => Self::ContextUnavailable,
            ProviderError::ActivityUnavailable => Self::ActivityUnavailable,
            ProviderError::Platform(msg) => Self::Provider(msg),
        }
    }
}

/// Result type for capability operations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;
