//! CLI command implementations.

pub mod sanitize;
pub mod trace;
