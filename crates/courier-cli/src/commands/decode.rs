//! Decode command.

use anyhow::{Context, Result};
use colored::Colorize;
use courier_bridge::normalize_sms;
use courier_core::SMS_RECEIVED;

/// Parse hex arguments into PDUs.
pub(crate) fn parse_hex_pdus(args: &[String]) -> Result<Vec<Vec<u8>>> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            let cleaned: String = arg.chars().filter(|c| !c.is_whitespace()).collect();
            hex::decode(&cleaned).with_context(|| format!("PDU {} is not valid hex", i.saturating_add(1)))
        })
        .collect()
}

/// Decode `args` as one SMS broadcast and print the resulting event.
pub(crate) fn run_decode(format: &str, args: &[String]) -> Result<()> {
    let pdus = parse_hex_pdus(args)?;

    for (i, pdu) in pdus.iter().enumerate() {
        let index = i.saturating_add(1);
        match courier_pdu::decode(pdu, format) {
            Ok(part) => {
                let concat = part
                    .concat
                    .map(|c| format!(" part {}/{} ref {}", c.sequence, c.total, c.reference))
                    .unwrap_or_default();
                eprintln!(
                    "  {} part {index}: {:?}{concat}",
                    "ok".green(),
                    part.alphabet
                );
            },
            Err(e) => eprintln!("  {} part {index}: {e}", "skipped".yellow()),
        }
    }

    match normalize_sms(Some(pdus.as_slice()), format) {
        Some(event) => {
            println!("{SMS_RECEIVED} {}", serde_json::to_string(&event.to_payload())?);
        },
        None => println!("{}", "no event".dimmed()),
    }

    Ok(())
}
