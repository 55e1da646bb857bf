//! Raw native payloads as delivered by the platform.
//!
//! These mirror the shapes the OS hands to listeners: a notification record
//! with an optional extras bundle, and an SMS broadcast with an optional
//! batch of protocol data units. Any part of them may be missing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Extras key holding the notification title.
pub const EXTRA_TITLE: &str = "android.title";

/// Extras key holding the notification text.
pub const EXTRA_TEXT: &str = "android.text";

/// Format tag for GSM (3GPP) PDUs.
pub const FORMAT_3GPP: &str = "3gpp";

/// Format tag for CDMA (3GPP2) PDUs.
pub const FORMAT_3GPP2: &str = "3gpp2";

/// Format assumed when a broadcast carries no format tag.
pub const DEFAULT_SMS_FORMAT: &str = FORMAT_3GPP;

/// A posted notification record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNotification {
    /// Identifier of the posting application. Always present.
    pub package_name: String,
    /// Optional extras bundle (`android.title`, `android.text`, ...).
    #[serde(default)]
    pub extras: Option<HashMap<String, String>>,
}

impl RawNotification {
    /// Create a record with no extras bundle.
    #[must_use]
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            extras: None,
        }
    }

    /// Set an extras entry, creating the bundle if needed.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the title extra.
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_extra(EXTRA_TITLE, title)
    }

    /// Set the text extra.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_extra(EXTRA_TEXT, text)
    }

    /// Attach an empty extras bundle.
    #[must_use]
    pub fn with_empty_extras(mut self) -> Self {
        self.extras.get_or_insert_with(HashMap::new);
        self
    }

    /// Look up an extras entry.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras.as_ref()?.get(key).map(String::as_str)
    }
}

/// An SMS broadcast payload.
///
/// Unrelated broadcasts routed to the same receiver carry no PDU batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSmsBroadcast {
    /// Ordered batch of protocol data units.
    #[serde(default)]
    pub pdus: Option<Vec<Vec<u8>>>,
    /// Declared PDU format (`"3gpp"` or `"3gpp2"`).
    #[serde(default)]
    pub format: Option<String>,
}

impl RawSmsBroadcast {
    /// Create a broadcast carrying a PDU batch with the given format tag.
    #[must_use]
    pub fn new(pdus: Vec<Vec<u8>>, format: impl Into<String>) -> Self {
        Self {
            pdus: Some(pdus),
            format: Some(format.into()),
        }
    }

    /// Create a broadcast with no SMS payload at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The declared format, falling back to [`DEFAULT_SMS_FORMAT`].
    #[must_use]
    pub fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_SMS_FORMAT)
    }
}
