//! Configuration types.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header produces a working
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Dispatch mode: deliver on the host's main loop.
pub const DISPATCH_MAIN: &str = "main";

/// Dispatch mode: deliver on the listener's own context.
pub const DISPATCH_INLINE: &str = "inline";

/// Log target: standard error.
pub const LOG_TARGET_STDERR: &str = "stderr";

/// Log target: standard output.
pub const LOG_TARGET_STDOUT: &str = "stdout";

/// Log target: rolling files under `logging.directory`.
pub const LOG_TARGET_FILE: &str = "file";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notification listener settings.
    pub notifications: NotificationsSection,
    /// SMS listener and permission prompt settings.
    pub sms: SmsSection,
    /// Logging and tracing settings.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// NotificationsSection
// ---------------------------------------------------------------------------

/// Notification listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsSection {
    /// `"main"` or `"inline"`.
    pub dispatch: String,
}

impl Default for NotificationsSection {
    fn default() -> Self {
        Self {
            dispatch: DISPATCH_MAIN.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// SmsSection
// ---------------------------------------------------------------------------

/// SMS listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsSection {
    /// `"main"` or `"inline"`.
    pub dispatch: String,
    /// Format assumed for broadcasts without a format tag.
    pub default_format: String,
    /// Permissions that together make up SMS access.
    pub permissions: Vec<String>,
    /// First request code issued for permission prompts.
    pub request_code: u16,
    /// Bound on waiting for a prompt result, in seconds. `0` waits forever.
    pub prompt_timeout_secs: u64,
}

impl SmsSection {
    /// The prompt bound, `None` when unbounded.
    #[must_use]
    pub fn prompt_timeout(&self) -> Option<Duration> {
        (self.prompt_timeout_secs > 0).then(|| Duration::from_secs(self.prompt_timeout_secs))
    }
}

impl Default for SmsSection {
    fn default() -> Self {
        Self {
            dispatch: DISPATCH_INLINE.to_owned(),
            default_format: "3gpp".to_owned(),
            permissions: vec![
                "android.permission.RECEIVE_SMS".to_owned(),
                "android.permission.READ_SMS".to_owned(),
            ],
            request_code: 10101,
            prompt_timeout_secs: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["courier_pdu=trace"]`).
    pub directives: Vec<String>,
    /// Where logs go: `"stderr"`, `"stdout"`, or `"file"`.
    pub target: String,
    /// Directory for the `"file"` target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// File name prefix for the `"file"` target.
    pub file_prefix: String,
    /// Rotation for the `"file"` target: `"daily"`, `"hourly"`, or `"never"`.
    pub rotation: String,
    /// Whether to use ANSI colors. Always off for the `"file"` target.
    pub ansi: bool,
    /// Whether to include timestamps.
    pub timestamps: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            target: LOG_TARGET_STDERR.to_owned(),
            directory: None,
            file_prefix: "courier".to_owned(),
            rotation: "daily".to_owned(),
            ansi: true,
            timestamps: true,
        }
    }
}
