//! Secret masking infrastructure
//!
//! Adapter for the `SecretMasker` port:
//! - Literal secret values
//! - Regular-expression patterns (with optional `secret` capture group)
//! - Value encoders (JSON, URI, backslash, base64)

pub mod encoders;
pub mod regex_masker;

pub use regex_masker::{RegexSecretMasker, MASK};
