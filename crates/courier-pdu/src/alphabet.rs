//! GSM 03.38 default alphabet and septet packing.

use crate::error::{PduError, PduResult};

/// Escape septet introducing a character from the extension table.
pub const ESCAPE: u8 = 0x1B;

/// GSM 7-bit default alphabet, indexed by septet value.
///
/// The escape slot (`0x1B`) never reaches this table during decoding.
const BASIC: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', ' ', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

/// Extension table entries reached through [`ESCAPE`].
const EXTENSION: [(u8, char); 10] = [
    (0x0A, '\u{0C}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

fn basic(septet: u8) -> char {
    BASIC
        .get(usize::from(septet & 0x7F))
        .copied()
        .unwrap_or(' ')
}

fn extension(septet: u8) -> Option<char> {
    EXTENSION
        .iter()
        .find(|(code, _)| *code == septet)
        .map(|(_, c)| *c)
}

/// Decode unpacked septets into text.
///
/// Unknown extension codes fall back to the basic-table character. A
/// trailing escape with nothing after it is dropped.
#[must_use]
pub fn decode_septets(septets: &[u8]) -> String {
    let mut out = String::with_capacity(septets.len());
    let mut escaped = false;

    for &septet in septets {
        if escaped {
            out.push(extension(septet).unwrap_or_else(|| basic(septet)));
            escaped = false;
        } else if septet == ESCAPE {
            escaped = true;
        } else {
            out.push(basic(septet));
        }
    }

    out
}

/// Encode text as septets, escaping extension characters.
///
/// Returns `None` if any character has no GSM 7-bit representation.
#[must_use]
pub fn encode_septets(text: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());

    for c in text.chars() {
        if let Some(idx) = BASIC
            .iter()
            .enumerate()
            .position(|(i, b)| *b == c && i != usize::from(ESCAPE))
        {
            out.push(u8::try_from(idx).ok()?);
        } else if let Some((code, _)) = EXTENSION.iter().find(|(_, e)| *e == c) {
            out.push(ESCAPE);
            out.push(*code);
        } else {
            return None;
        }
    }

    Some(out)
}

/// Read `count` septets starting `bit_offset` bits into `data`.
///
/// # Errors
///
/// Returns [`PduError::Truncated`] if `data` holds fewer bits than needed.
#[allow(clippy::cast_possible_truncation)]
pub fn unpack_septets(data: &[u8], bit_offset: usize, count: usize) -> PduResult<Vec<u8>> {
    const FIELD: &str = "user data";

    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let bit = i
            .checked_mul(7)
            .and_then(|b| b.checked_add(bit_offset))
            .ok_or(PduError::Truncated { field: FIELD })?;
        let byte = bit / 8;
        let shift = bit % 8;

        let lo = *data.get(byte).ok_or(PduError::Truncated { field: FIELD })?;
        let mut value = u16::from(lo) >> shift;
        if shift > 1 {
            let hi = byte
                .checked_add(1)
                .and_then(|next| data.get(next))
                .ok_or(PduError::Truncated { field: FIELD })?;
            value |= u16::from(*hi) << (8_usize.saturating_sub(shift));
        }
        out.push((value & 0x7F) as u8);
    }

    Ok(out)
}

/// Pack septets into octets, leaving `fill_bits` zero bits in front.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn pack_septets(septets: &[u8], fill_bits: usize) -> Vec<u8> {
    let total_bits = septets
        .len()
        .saturating_mul(7)
        .saturating_add(fill_bits);
    let mut out = vec![0_u8; total_bits.div_ceil(8)];

    for (i, &septet) in septets.iter().enumerate() {
        let bit = i.saturating_mul(7).saturating_add(fill_bits);
        let byte = bit / 8;
        let shift = bit % 8;
        let value = u16::from(septet & 0x7F) << shift;

        if let Some(slot) = out.get_mut(byte) {
            *slot |= (value & 0xFF) as u8;
        }
        if shift > 1 {
            if let Some(slot) = out.get_mut(byte.saturating_add(1)) {
                *slot |= (value >> 8) as u8;
            }
        }
    }

    out
}
