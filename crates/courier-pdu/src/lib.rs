//! Courier PDU - SMS protocol data unit decoding.
//!
//! Decodes 3GPP TS 23.040 SMS-DELIVER PDUs as handed over by the radio
//! layer in an SMS-received broadcast. Each PDU is one message part; a long
//! message arrives as several parts carrying a concatenation header.
//!
//! Only the GSM (`"3gpp"`) format is decoded. CDMA (`"3gpp2"`) PDUs are
//! reported as [`PduError::UnsupportedFormat`] so callers can skip them.
//!
//! # Example
//!
//! ```rust
//! use courier_pdu::decode;
//!
//! let pdu = [
//!     0x07, 0x91, 0x13, 0x26, 0x04, 0x00, 0x00, 0xF0, 0x04, 0x0B, 0x91, 0x13, 0x46, 0x61,
//!     0x00, 0x89, 0xF6, 0x00, 0x00, 0x20, 0x80, 0x62, 0x91, 0x73, 0x14, 0x08, 0x0C, 0xC8,
//!     0xF7, 0x1D, 0x14, 0x96, 0x97, 0x41, 0xF9, 0x77, 0xFD, 0x07,
//! ];
//!
//! let part = decode(&pdu, "3gpp").unwrap();
//! assert_eq!(part.originating_address.as_deref(), Some("+31641600986"));
//! assert_eq!(part.body, "How are you?");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod address;
pub mod alphabet;
pub mod dcs;
pub mod deliver;
pub mod udh;

mod error;
mod reader;

pub use dcs::Alphabet;
pub use deliver::{SmsDeliver, SmsPart};
pub use error::{PduError, PduResult};
pub use udh::{ConcatInfo, InformationElement, UserDataHeader};

/// PDU format declared by an SMS broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// GSM / UMTS / LTE (`"3gpp"`).
    Gsm,
    /// CDMA (`"3gpp2"`).
    Cdma,
}

impl std::str::FromStr for Format {
    type Err = PduError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3gpp" => Ok(Self::Gsm),
            "3gpp2" => Ok(Self::Cdma),
            other => Err(PduError::UnsupportedFormat(other.to_owned())),
        }
    }
}

/// Decode one message part using the declared format tag.
///
/// # Errors
///
/// Returns a [`PduError`] if the format is not supported or the PDU is
/// malformed. Callers decoding a batch skip the failing part.
pub fn decode(pdu: &[u8], format: &str) -> PduResult<SmsPart> {
    match format.parse::<Format>()? {
        Format::Gsm => SmsDeliver::parse(pdu).map(SmsPart::from),
        Format::Cdma => Err(PduError::UnsupportedFormat(format.to_owned())),
    }
}
