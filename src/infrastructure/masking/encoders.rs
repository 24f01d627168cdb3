//! Built-in value encoders.
//!
//! A secret that appears in a log line is often not verbatim: it was
//! JSON-escaped, percent-encoded, or base64'd on the way. Registering these
//! encoders makes the masker also look for those forms.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Escape the value the way it would appear inside a JSON string literal.
pub fn json_string_escape(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub fn uri_data_escape(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Double every backslash.
pub fn backslash_escape(value: &str) -> String {
    value.replace('\\', "\\\\")
}

/// Standard padded base64.
pub fn base64_encode(value: &str) -> String {
    BASE64.encode(value)
}
