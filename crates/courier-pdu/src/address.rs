//! TP-OA originating address decoding.

use crate::alphabet;
use crate::error::PduResult;
use crate::reader::Reader;

/// Type-of-number: international (`+` prefix).
pub const TON_INTERNATIONAL: u8 = 0b001;

/// Type-of-number: alphanumeric, GSM 7-bit packed.
pub const TON_ALPHANUMERIC: u8 = 0b101;

/// A decoded address field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// The address as displayed (digits, optional `+`, or alphanumeric text).
    pub value: String,
    /// Raw type-of-address octet.
    pub type_of_address: u8,
}

impl Address {
    /// The type-of-number bits of the type-of-address octet.
    #[must_use]
    pub fn type_of_number(&self) -> u8 {
        (self.type_of_address >> 4) & 0x07
    }
}

fn bcd_digit(nibble: u8) -> Option<char> {
    match nibble {
        0..=9 => char::from_digit(u32::from(nibble), 10),
        0x0A => Some('*'),
        0x0B => Some('#'),
        0x0C => Some('a'),
        0x0D => Some('b'),
        0x0E => Some('c'),
        _ => None,
    }
}

/// Decode semi-octet digits, stopping after `digits` digits or at a filler nibble.
pub(crate) fn decode_semi_octets(bytes: &[u8], digits: usize) -> String {
    let mut out = String::with_capacity(digits);
    for nibble in bytes.iter().flat_map(|b| [b & 0x0F, b >> 4]) {
        if out.len() >= digits {
            break;
        }
        match bcd_digit(nibble) {
            Some(c) => out.push(c),
            None => break,
        }
    }
    out
}

/// Read an address field: length in semi-octets, type-of-address, value.
pub(crate) fn read(reader: &mut Reader<'_>) -> PduResult<Address> {
    let semi_octets = usize::from(reader.u8("address length")?);
    let type_of_address = reader.u8("type of address")?;
    let bytes = reader.take(semi_octets.div_ceil(2), "address value")?;

    let ton = (type_of_address >> 4) & 0x07;
    let value = if ton == TON_ALPHANUMERIC {
        let septets = semi_octets.saturating_mul(4) / 7;
        alphabet::decode_septets(&alphabet::unpack_septets(bytes, 0, septets)?)
    } else {
        let digits = decode_semi_octets(bytes, semi_octets);
        if ton == TON_INTERNATIONAL && !digits.is_empty() {
            format!("+{digits}")
        } else {
            digits
        }
    };

    Ok(Address {
        value,
        type_of_address,
    })
}
