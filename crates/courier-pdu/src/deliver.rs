//! SMS-DELIVER parsing.
//!
//! Layout (3GPP TS 23.040 9.2.2.1), after the length-prefixed SMSC address:
//!
//! ```text
//! first octet | TP-OA | TP-PID | TP-DCS | TP-SCTS (7) | TP-UDL | TP-UD
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::address::{self, Address};
use crate::alphabet;
use crate::dcs::Alphabet;
use crate::error::{PduError, PduResult};
use crate::reader::Reader;
use crate::udh::{ConcatInfo, UserDataHeader};

/// TP-MTI value for SMS-DELIVER.
const MTI_DELIVER: u8 = 0b00;

/// TP-UDHI bit in the first octet.
const UDHI: u8 = 0x40;

/// A fully parsed SMS-DELIVER PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsDeliver {
    /// First octet (message type and flags).
    pub first_octet: u8,
    /// Originating address.
    pub originating_address: Address,
    /// TP-PID protocol identifier.
    pub protocol_id: u8,
    /// TP-DCS data coding scheme.
    pub data_coding: u8,
    /// Resolved alphabet.
    pub alphabet: Alphabet,
    /// Raw TP-SCTS octets.
    pub timestamp_octets: [u8; 7],
    /// User data header, if TP-UDHI is set.
    pub header: Option<UserDataHeader>,
    /// Decoded message text.
    pub text: String,
}

impl SmsDeliver {
    /// Parse an SMS-DELIVER PDU including its SMSC prefix.
    ///
    /// # Errors
    ///
    /// Returns a [`PduError`] if any field is truncated or inconsistent.
    pub fn parse(pdu: &[u8]) -> PduResult<Self> {
        let mut reader = Reader::new(pdu);

        let smsc_len = usize::from(reader.u8("smsc length")?);
        reader.take(smsc_len, "smsc address")?;

        let first_octet = reader.u8("first octet")?;
        let mti = first_octet & 0x03;
        if mti != MTI_DELIVER {
            return Err(PduError::UnexpectedMessageType(mti));
        }

        let originating_address = address::read(&mut reader)?;
        let protocol_id = reader.u8("protocol identifier")?;
        let data_coding = reader.u8("data coding scheme")?;
        let mut timestamp_octets = [0_u8; 7];
        timestamp_octets.copy_from_slice(reader.take(7, "service centre timestamp")?);
        let user_data_len = usize::from(reader.u8("user data length")?);

        let alphabet = Alphabet::from_dcs(data_coding)?;
        let (header, text) = decode_user_data(
            reader.rest(),
            user_data_len,
            first_octet & UDHI != 0,
            alphabet,
        )?;

        Ok(Self {
            first_octet,
            originating_address,
            protocol_id,
            data_coding,
            alphabet,
            timestamp_octets,
            header,
            text,
        })
    }

    /// The service centre timestamp, if the octets form a valid date.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        decode_timestamp(&self.timestamp_octets)
    }
}

/// One decoded message part, reduced to what the bridge consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsPart {
    /// Originating address, `None` when the field is empty.
    pub originating_address: Option<String>,
    /// Text of this part.
    pub body: String,
    /// Alphabet the text was decoded from.
    pub alphabet: Alphabet,
    /// Concatenation details for multi-part messages.
    pub concat: Option<ConcatInfo>,
    /// Service centre timestamp.
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl From<SmsDeliver> for SmsPart {
    fn from(deliver: SmsDeliver) -> Self {
        let timestamp = deliver.timestamp();
        let concat = deliver.header.as_ref().and_then(UserDataHeader::concat);
        let address = deliver.originating_address.value;
        Self {
            originating_address: (!address.is_empty()).then_some(address),
            body: deliver.text,
            alphabet: deliver.alphabet,
            concat,
            timestamp,
        }
    }
}

fn decode_user_data(
    data: &[u8],
    udl: usize,
    has_header: bool,
    alphabet: Alphabet,
) -> PduResult<(Option<UserDataHeader>, String)> {
    let octets = if alphabet.counts_septets() {
        udl.saturating_mul(7).div_ceil(8)
    } else {
        udl
    };
    let data = data
        .get(..octets)
        .ok_or(PduError::Truncated { field: "user data" })?;

    let (header, header_octets) = if has_header {
        let udhl = usize::from(*data.first().ok_or_else(|| {
            PduError::MalformedHeader("header indicated but user data is empty".to_owned())
        })?);
        let bytes = data.get(1..=udhl).ok_or_else(|| {
            PduError::MalformedHeader(format!("header length {udhl} exceeds user data"))
        })?;
        (Some(UserDataHeader::parse(bytes)?), udhl.saturating_add(1))
    } else {
        (None, 0)
    };

    let text = match alphabet {
        Alphabet::Gsm7 => {
            let header_septets = header_octets.saturating_mul(8).div_ceil(7);
            let body_septets = udl.checked_sub(header_septets).ok_or_else(|| {
                PduError::MalformedUserData(format!(
                    "{udl} septets cannot hold a {header_octets}-octet header"
                ))
            })?;
            let septets =
                alphabet::unpack_septets(data, header_septets.saturating_mul(7), body_septets)?;
            alphabet::decode_septets(&septets)
        },
        Alphabet::Ucs2 => {
            let body = data.get(header_octets..).unwrap_or_default();
            if body.len() % 2 != 0 {
                return Err(PduError::MalformedUserData(format!(
                    "UCS-2 body has odd length {}",
                    body.len()
                )));
            }
            let units: Vec<u16> = body
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        },
        Alphabet::EightBit => data
            .get(header_octets..)
            .unwrap_or_default()
            .iter()
            .map(|&b| char::from(b))
            .collect(),
    };

    Ok((header, text))
}

fn swapped_bcd(octet: u8) -> u32 {
    u32::from(octet & 0x0F)
        .saturating_mul(10)
        .saturating_add(u32::from(octet >> 4))
}

fn decode_timestamp(octets: &[u8; 7]) -> Option<DateTime<FixedOffset>> {
    let [year, month, day, hour, minute, second, tz] = *octets;

    let yy = i32::try_from(swapped_bcd(year)).ok()?;
    let century = if yy >= 90 { 1900_i32 } else { 2000_i32 };
    let year = century.checked_add(yy)?;
    let date = NaiveDate::from_ymd_opt(year, swapped_bcd(month), swapped_bcd(day))?;
    let naive = date.and_hms_opt(swapped_bcd(hour), swapped_bcd(minute), swapped_bcd(second))?;

    // Quarter hours; bit 3 of the first semi-octet is the sign.
    let quarters = i32::try_from(swapped_bcd(tz & 0xF7)).ok()?;
    let offset_secs = quarters.checked_mul(15 * 60)?;
    let offset_secs = if tz & 0x08 == 0 {
        offset_secs
    } else {
        offset_secs.checked_neg()?
    };
    let offset = FixedOffset::east_opt(offset_secs)?;

    naive.and_local_timezone(offset).single()
}
