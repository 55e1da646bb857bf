//! Prelude module - commonly used test utilities.
//!
//! Use `use courier_test::prelude::*;` to import all essential types.

pub use crate::{
    MockCapabilityProvider, PduBuilder, RecordedEvent, RecordingSink, TEST_APP_ID, TEST_PACKAGE,
    TEST_SENDER, init_test_logging,
};
