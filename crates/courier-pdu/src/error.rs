//! PDU decoding errors.

use thiserror::Error;

/// Errors that can occur while decoding a PDU.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PduError {
    /// The declared format is not one this crate decodes.
    #[error("unsupported PDU format: {0}")]
    UnsupportedFormat(String),

    /// The PDU ended before a field was complete.
    #[error("PDU truncated while reading {field}")]
    Truncated {
        /// The field being read.
        field: &'static str,
    },

    /// The PDU is not an SMS-DELIVER.
    #[error("unexpected message type indicator {0:#04b}")]
    UnexpectedMessageType(u8),

    /// The data coding scheme is reserved or unknown.
    #[error("unsupported data coding scheme {0:#04x}")]
    UnsupportedDataCoding(u8),

    /// The user data is compressed.
    #[error("compressed user data is not supported")]
    Compressed,

    /// The user data header is inconsistent.
    #[error("malformed user data header: {0}")]
    MalformedHeader(String),

    /// The user data is inconsistent with its declared length or alphabet.
    #[error("malformed user data: {0}")]
    MalformedUserData(String),
}

/// Result type for PDU decoding.
pub type PduResult<T> = Result<T, PduError>;
