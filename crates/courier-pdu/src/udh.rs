//! User data header information elements.

use crate::error::{PduError, PduResult};

/// IEI: concatenated short message, 8-bit reference.
pub const IEI_CONCAT_8BIT: u8 = 0x00;

/// IEI: concatenated short message, 16-bit reference.
pub const IEI_CONCAT_16BIT: u8 = 0x08;

/// One information element from a user data header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationElement {
    /// Information element identifier.
    pub id: u8,
    /// Element payload.
    pub data: Vec<u8>,
}

/// Concatenation details of one part of a multi-part message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcatInfo {
    /// Reference shared by all parts of the message.
    pub reference: u16,
    /// Total number of parts.
    pub total: u8,
    /// One-based sequence number of this part.
    pub sequence: u8,
}

/// A parsed user data header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDataHeader {
    /// Information elements in header order.
    pub elements: Vec<InformationElement>,
}

impl UserDataHeader {
    /// Parse header bytes (excluding the leading UDHL octet).
    ///
    /// # Errors
    ///
    /// Returns [`PduError::MalformedHeader`] if an element overruns the header.
    pub fn parse(bytes: &[u8]) -> PduResult<Self> {
        let mut elements = Vec::new();
        let mut rest = bytes;

        while let [id, len, tail @ ..] = rest {
            let len = usize::from(*len);
            let data = tail.get(..len).ok_or_else(|| {
                PduError::MalformedHeader(format!(
                    "element {id:#04x} declares {len} octets, {} remain",
                    tail.len()
                ))
            })?;
            elements.push(InformationElement {
                id: *id,
                data: data.to_vec(),
            });
            rest = tail.get(len..).unwrap_or_default();
        }

        if !rest.is_empty() {
            return Err(PduError::MalformedHeader(
                "dangling octet after last element".to_owned(),
            ));
        }

        Ok(Self { elements })
    }

    /// Find the first element with the given identifier.
    #[must_use]
    pub fn element(&self, id: u8) -> Option<&InformationElement> {
        self.elements.iter().find(|ie| ie.id == id)
    }

    /// Concatenation details, if this part belongs to a multi-part message.
    #[must_use]
    pub fn concat(&self) -> Option<ConcatInfo> {
        self.elements.iter().find_map(|ie| match (ie.id, ie.data.as_slice()) {
            (IEI_CONCAT_8BIT, [reference, total, sequence]) => Some(ConcatInfo {
                reference: u16::from(*reference),
                total: *total,
                sequence: *sequence,
            }),
            (IEI_CONCAT_16BIT, [hi, lo, total, sequence]) => Some(ConcatInfo {
                reference: u16::from_be_bytes([*hi, *lo]),
                total: *total,
                sequence: *sequence,
            }),
            _ => None,
        })
    }
}
