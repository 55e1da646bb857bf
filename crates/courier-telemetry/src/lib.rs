//! Courier Telemetry - Logging for the courier event bridge.
//!
//! # Example
//!
//! ```rust,no_run
//! use courier_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), courier_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("courier_pdu=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("Bridge starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
