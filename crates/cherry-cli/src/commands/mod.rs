//! CLI command implementations.

pub(crate) mod config;
