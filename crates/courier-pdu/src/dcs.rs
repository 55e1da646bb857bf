//! TP-DCS data coding scheme.

use crate::error::{PduError, PduResult};

/// Character set of the user data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// GSM 7-bit default alphabet, septet packed.
    Gsm7,
    /// 8-bit data.
    EightBit,
    /// UCS-2 (UTF-16BE).
    Ucs2,
}

impl Alphabet {
    /// Resolve the alphabet from a data coding scheme octet.
    ///
    /// # Errors
    ///
    /// Returns [`PduError::Compressed`] for compressed text and
    /// [`PduError::UnsupportedDataCoding`] for reserved coding groups.
    pub fn from_dcs(dcs: u8) -> PduResult<Self> {
        match dcs >> 4 {
            // General data coding (with or without auto-deletion).
            0x0..=0x7 => {
                if dcs & 0x20 != 0 {
                    return Err(PduError::Compressed);
                }
                Ok(match (dcs >> 2) & 0x03 {
                    0b01 => Self::EightBit,
                    0b10 => Self::Ucs2,
                    // 0b11 is reserved; handsets treat it as the default alphabet.
                    _ => Self::Gsm7,
                })
            },
            // Message waiting indication, discard or store.
            0xC | 0xD => Ok(Self::Gsm7),
            0xE => Ok(Self::Ucs2),
            // Data coding / message class.
            0xF => Ok(if dcs & 0x04 == 0 {
                Self::Gsm7
            } else {
                Self::EightBit
            }),
            _ => Err(PduError::UnsupportedDataCoding(dcs)),
        }
    }

    /// Whether TP-UDL counts septets rather than octets.
    #[must_use]
    pub fn counts_septets(self) -> bool {
        matches!(self, Self::Gsm7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_group() {
        assert_eq!(Alphabet::from_dcs(0x00).unwrap(), Alphabet::Gsm7);
        assert_eq!(Alphabet::from_dcs(0x04).unwrap(), Alphabet::EightBit);
        assert_eq!(Alphabet::from_dcs(0x08).unwrap(), Alphabet::Ucs2);
        assert_eq!(Alphabet::from_dcs(0x18).unwrap(), Alphabet::Ucs2);
        assert_eq!(Alphabet::from_dcs(0x48).unwrap(), Alphabet::Ucs2);
    }

    #[test]
    fn test_compressed() {
        assert_eq!(Alphabet::from_dcs(0x20).unwrap_err(), PduError::Compressed);
    }

    #[test]
    fn test_message_waiting_groups() {
        assert_eq!(Alphabet::from_dcs(0xC0).unwrap(), Alphabet::Gsm7);
        assert_eq!(Alphabet::from_dcs(0xD8).unwrap(), Alphabet::Gsm7);
        assert_eq!(Alphabet::from_dcs(0xE0).unwrap(), Alphabet::Ucs2);
    }

    #[test]
    fn test_message_class_group() {
        assert_eq!(Alphabet::from_dcs(0xF0).unwrap(), Alphabet::Gsm7);
        assert_eq!(Alphabet::from_dcs(0xF4).unwrap(), Alphabet::EightBit);
    }

    #[test]
    fn test_reserved_group() {
        assert_eq!(
            Alphabet::from_dcs(0x80).unwrap_err(),
            PduError::UnsupportedDataCoding(0x80)
        );
    }
}
