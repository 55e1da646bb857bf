//! SMS-DELIVER fixture encoder.

use courier_pdu::alphabet;

/// Service centre timestamp used by every built PDU: 2023-04-15 17:00:00 UTC.
pub const TEST_TIMESTAMP: [u8; 7] = [0x32, 0x40, 0x51, 0x71, 0x00, 0x00, 0x00];

#[derive(Debug, Clone)]
enum Sender {
    None,
    International(String),
    National(String),
    Alphanumeric(String),
}

#[derive(Debug, Clone, Copy)]
enum Coding {
    Gsm7,
    Ucs2,
}

/// Builds SMS-DELIVER PDUs for tests.
///
/// ```rust
/// use courier_test::PduBuilder;
///
/// let pdu = PduBuilder::gsm7("Hi").from_international("15551234567").build();
/// let part = courier_pdu::decode(&pdu, "3gpp").unwrap();
/// assert_eq!(part.body, "Hi");
/// assert_eq!(part.originating_address.as_deref(), Some("+15551234567"));
/// ```
#[derive(Debug, Clone)]
pub struct PduBuilder {
    text: String,
    coding: Coding,
    sender: Sender,
    concat: Option<(u8, u8, u8)>,
}

impl PduBuilder {
    /// A GSM 7-bit message. Text must be representable in the GSM alphabet.
    #[must_use]
    pub fn gsm7(text: impl Into<String>) -> Self {
        Self::new(text.into(), Coding::Gsm7)
    }

    /// A UCS-2 message.
    #[must_use]
    pub fn ucs2(text: impl Into<String>) -> Self {
        Self::new(text.into(), Coding::Ucs2)
    }

    fn new(text: String, coding: Coding) -> Self {
        Self {
            text,
            coding,
            sender: Sender::None,
            concat: None,
        }
    }

    /// International sender; `digits` without the leading `+`.
    #[must_use]
    pub fn from_international(mut self, digits: impl Into<String>) -> Self {
        self.sender = Sender::International(digits.into());
        self
    }

    /// National-format numeric sender.
    #[must_use]
    pub fn from_national(mut self, digits: impl Into<String>) -> Self {
        self.sender = Sender::National(digits.into());
        self
    }

    /// Alphanumeric sender such as a bank's short name.
    #[must_use]
    pub fn from_alphanumeric(mut self, name: impl Into<String>) -> Self {
        self.sender = Sender::Alphanumeric(name.into());
        self
    }

    /// Mark this PDU as part `sequence` of `total` of message `reference`.
    #[must_use]
    pub fn part_of(mut self, reference: u8, total: u8, sequence: u8) -> Self {
        self.concat = Some((reference, total, sequence));
        self
    }

    /// Encode the PDU.
    ///
    /// # Panics
    ///
    /// Panics if GSM 7-bit text or an alphanumeric sender contains a
    /// character outside the GSM alphabet, or if the user data overflows.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let header: Vec<u8> = self
            .concat
            .map(|(reference, total, sequence)| vec![0x05, 0x00, 0x03, reference, total, sequence])
            .unwrap_or_default();

        let first_octet = if header.is_empty() { 0x04 } else { 0x44 };
        let mut pdu = vec![0x00, first_octet];
        pdu.extend(self.encode_sender());
        pdu.push(0x00);
        pdu.push(match self.coding {
            Coding::Gsm7 => 0x00,
            Coding::Ucs2 => 0x08,
        });
        pdu.extend_from_slice(&TEST_TIMESTAMP);

        match self.coding {
            Coding::Gsm7 => {
                let septets =
                    alphabet::encode_septets(&self.text).expect("text must be GSM 7-bit encodable");
                let header_septets = (header.len() * 8).div_ceil(7);
                let fill_bits = header_septets * 7 - header.len() * 8;
                let udl = header_septets + septets.len();
                pdu.push(u8::try_from(udl).expect("user data too long"));
                pdu.extend_from_slice(&header);
                pdu.extend(alphabet::pack_septets(&septets, fill_bits));
            },
            Coding::Ucs2 => {
                let body: Vec<u8> = self
                    .text
                    .encode_utf16()
                    .flat_map(u16::to_be_bytes)
                    .collect();
                let udl = header.len() + body.len();
                pdu.push(u8::try_from(udl).expect("user data too long"));
                pdu.extend_from_slice(&header);
                pdu.extend(body);
            },
        }

        pdu
    }

    /// Encode the PDU as uppercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.build())
    }

    fn encode_sender(&self) -> Vec<u8> {
        match &self.sender {
            Sender::None => vec![0x00, 0x81],
            Sender::International(digits) => semi_octet_address(0x91, digits),
            Sender::National(digits) => semi_octet_address(0x81, digits),
            Sender::Alphanumeric(name) => {
                let septets = alphabet::encode_septets(name)
                    .expect("sender must be GSM 7-bit encodable");
                let semi_octets = (septets.len() * 7).div_ceil(4);
                let mut out = vec![
                    u8::try_from(semi_octets).expect("sender too long"),
                    0xD0,
                ];
                out.extend(alphabet::pack_septets(&septets, 0));
                out
            },
        }
    }
}

fn semi_octet_address(type_of_address: u8, digits: &str) -> Vec<u8> {
    let nibbles: Vec<u8> = digits
        .chars()
        .map(|c| match c {
            '*' => 0x0A,
            '#' => 0x0B,
            c => u8::try_from(c.to_digit(10).expect("address digits must be decimal"))
                .expect("digit fits in a nibble"),
        })
        .collect();

    let mut out = vec![
        u8::try_from(nibbles.len()).expect("address too long"),
        type_of_address,
    ];
    out.extend(
        nibbles
            .chunks(2)
            .map(|pair| pair[0] | pair.get(1).copied().unwrap_or(0x0F) << 4),
    );
    out
}

/// Build the parts of a concatenated GSM 7-bit message, one PDU per chunk.
#[must_use]
pub fn concatenated_gsm7(sender: &str, reference: u8, chunks: &[&str]) -> Vec<Vec<u8>> {
    let total = u8::try_from(chunks.len()).expect("too many parts");
    chunks
        .iter()
        .zip(1..=total)
        .map(|(chunk, sequence)| {
            PduBuilder::gsm7(*chunk)
                .from_international(sender)
                .part_of(reference, total, sequence)
                .build()
        })
        .collect()
}
