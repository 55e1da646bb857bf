#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for the courier bridge.
//!
//! # Usage
//!
//! ```rust,no_run
//! use courier_config::Config;
//!
//! let resolved = Config::load(None).unwrap();
//! println!("SMS dispatch: {}", resolved.config.sms.dispatch);
//! ```
//!
//! # Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Config file** (explicit path, else `COURIER_CONFIG`)
//! 2. **Environment variables** (`COURIER_LOG_LEVEL`, `COURIER_LOG_FORMAT`),
//!    fallback only: applied to fields the file leaves unset
//! 3. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! This crate has no dependencies on other courier crates. Conversion into
//! bridge and telemetry settings happens at the binary.

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file loading.
pub mod loader;
/// Deep merging of TOML trees.
pub mod merge;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration: defaults, then `path` or `COURIER_CONFIG`, then
    /// environment fallbacks.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is unreadable or malformed, or
    /// the merged configuration fails validation.
    pub fn load(path: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(path, &env::collect_env_vars())
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if serialization fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }
}
