//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod decode;
pub(crate) mod replay;
