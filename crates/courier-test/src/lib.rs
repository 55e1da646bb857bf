//! Courier Test - Shared test utilities for the courier event bridge.
//!
//! This crate provides mock implementations and fixtures that can be used
//! across multiple courier crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! courier-test.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use courier_test::{PduBuilder, RecordingSink};
//!
//!     #[test]
//!     fn test_sms_delivery() {
//!         let sink = RecordingSink::new();
//!         let pdu = PduBuilder::gsm7("Hello").from_international("15551234567").build();
//!         // feed `pdu` through a listener attached to `sink` ...
//!         assert_eq!(sink.count(), 1);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![allow(clippy::arithmetic_side_effects)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;
pub mod pdu;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
pub use pdu::*;
