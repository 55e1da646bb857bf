//! Replay command.
//!
//! Each input line is one recorded platform callback:
//!
//! ```text
//! {"kind":"notification","package_name":"com.example.bank","extras":{"android.title":"Alert"}}
//! {"kind":"sms","pdus":["0004..."],"format":"3gpp"}
//! ```

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use courier_config::Config;
use courier_core::{RawNotification, RawSmsBroadcast};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::commands::decode::parse_hex_pdus;
use crate::headless::HeadlessProvider;
use crate::settings;

/// One recorded callback.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum RecordedEvent {
    /// A posted notification.
    Notification(RawNotification),
    /// An SMS broadcast with hex-encoded PDUs.
    Sms(RecordedSms),
}

/// An SMS broadcast as recorded.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordedSms {
    #[serde(default)]
    pdus: Option<Vec<String>>,
    #[serde(default)]
    format: Option<String>,
}

impl RecordedSms {
    fn into_raw(self) -> Result<RawSmsBroadcast> {
        let pdus = self.pdus.as_deref().map(parse_hex_pdus).transpose()?;
        Ok(RawSmsBroadcast {
            pdus,
            format: self.format,
        })
    }
}

/// Parse recorded events, skipping blank lines and `#` comments.
pub(crate) fn parse_recording(input: &str) -> Result<Vec<RecordedEvent>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("line {}: invalid recorded event", i.saturating_add(1)))
        })
        .collect()
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        return Ok(input);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

/// Feed every recorded event through a bridge and print each delivered
/// event. Returns how many events were delivered.
///
/// The sink forwards into an unbounded channel, so a slow printer never
/// loses deliveries.
pub(crate) async fn replay(config: &Config, recording: Vec<RecordedEvent>) -> Result<usize> {
    let (builder, main_loop) = settings::to_bridge_builder(config, Arc::new(HeadlessProvider))?;
    let (bridge, _) = builder.build();

    let (tx, mut rx) = mpsc::unbounded_channel::<(String, Value)>();
    let sink = Arc::new(move |name: &str, payload: Value| {
        if tx.send((name.to_owned(), payload)).is_err() {
            debug!(event_name = name, "Printer gone, dropping event");
        }
    });
    bridge.attach(&sink);

    let printer = tokio::spawn(async move {
        let mut delivered = 0_usize;
        while let Some((name, payload)) = rx.recv().await {
            println!("{} {payload}", name.cyan());
            delivered = delivered.saturating_add(1);
        }
        delivered
    });
    let main_loop = tokio::spawn(main_loop.run());

    let source = bridge.event_source();
    let total = recording.len();
    for event in recording {
        let outcome = match event {
            RecordedEvent::Notification(raw) => source.notification_posted(&raw),
            RecordedEvent::Sms(sms) => source.sms_received(&sms.into_raw()?),
        };
        if !outcome.is_dispatched() {
            debug!(?outcome, "Recorded event not delivered");
        }
    }

    // Closing every dispatcher ends the main loop once queued deliveries ran.
    drop(source);
    drop(bridge);
    main_loop.await?;

    // The sink owns the only sender; dropping it ends the printer.
    drop(sink);
    let delivered = printer.await?;
    if delivered == 0 && total > 0 {
        warn!(total, "No recorded event produced a delivery");
    }
    eprintln!("{}", format!("{delivered} of {total} events delivered").dimmed());

    Ok(delivered)
}

/// Replay the recording in `file` (or stdin for `-`).
pub(crate) async fn run_replay(config: &Config, file: &Path) -> Result<usize> {
    let recording = parse_recording(&read_input(file)?)?;
    replay(config, recording).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_test::PduBuilder;

    #[test]
    fn test_parse_recording() {
        let input = r#"
# captured on device
{"kind":"notification","package_name":"com.example.bank","extras":{"android.title":"Alert"}}
{"kind":"sms","pdus":["00"],"format":"3gpp"}
{"kind":"sms"}
"#;
        let events = parse_recording(input).unwrap();
        assert_eq!(events.len(), 3);

        let RecordedEvent::Notification(raw) = &events[0] else {
            panic!("expected a notification");
        };
        assert_eq!(raw.package_name, "com.example.bank");
        assert_eq!(raw.extra("android.title"), Some("Alert"));
    }

    #[test]
    fn test_recorded_sms_without_pdus() {
        let raw = RecordedSms {
            pdus: None,
            format: None,
        }
        .into_raw()
        .unwrap();
        assert!(raw.pdus.is_none());
        assert_eq!(raw.format_or_default(), "3gpp");
    }

    #[test]
    fn test_parse_recording_reports_line() {
        let err = parse_recording("{\"kind\":\"notification\",\"package_name\":\"a\"}\nnot json")
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    fn sms_line(text: &str) -> String {
        format!(
            "{{\"kind\":\"sms\",\"pdus\":[\"{}\"],\"format\":\"3gpp\"}}",
            PduBuilder::ucs2(text).from_international("15551234567").to_hex()
        )
    }

    #[tokio::test]
    async fn test_replay_file_counts_deliveries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let lines = [
            "{\"kind\":\"notification\",\"package_name\":\"com.example.bank\"}".to_owned(),
            "{\"kind\":\"sms\",\"pdus\":[\"073191\"]}".to_owned(),
            sms_line("hello"),
        ];
        std::fs::write(&path, lines.join("\n")).unwrap();

        // The garbage PDU decodes to nothing.
        assert_eq!(run_replay(&Config::default(), &path).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_replay_large_recording_loses_nothing() {
        let input: Vec<String> = (0..2000).map(|i| sms_line(&format!("msg {i}"))).collect();
        let recording = parse_recording(&input.join("\n")).unwrap();

        assert_eq!(replay(&Config::default(), recording).await.unwrap(), 2000);
    }
}
