//! Log-command sanitizer
//!
//! Untrusted text (captured process output, build logs) may carry agent
//! control directives of the form `##vso[area.action]...`. Before such text
//! reaches anything that interprets directives, the marker is defused by
//! turning `##vso` into `**vso`. The keyword keeps its case and every other
//! byte is left alone, so a second pass finds nothing to change.
//!
//! Directives can also be smuggled inside a base64 payload. When the whole
//! input is canonical base64 over UTF-8 text (line breaks allowed), the
//! decoded text is sanitized recursively and encoded again.

use std::borrow::Cow;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use regex::Regex;

use crate::domain::errors::SanitizeError;

/// Case-insensitive directive marker.
static DIRECTIVE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)##(vso)").expect("directive marker pattern is valid"));

/// Result of trying to read a string as base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedPayload {
    /// The decoded bytes
    Decoded(Vec<u8>),
    /// The input is not a base64 payload
    NotBase64,
}

/// Decode `input` as standard, padded, canonical base64.
///
/// ASCII whitespace is ignored, so payloads wrapped across lines decode.
/// Non-canonical trailing bits are rejected.
pub fn decode_base64(input: &str) -> DecodedPayload {
    let compact: Cow<'_, str> = if input.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(input.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(input)
    };

    BASE64
        .decode(compact.as_bytes())
        .map_or(DecodedPayload::NotBase64, DecodedPayload::Decoded)
}

/// Defuse every control-directive marker in `input`.
///
/// Never fails: input that is not base64 (or whose payload is not UTF-8) is
/// scrubbed literally.
///
/// # Examples
///
/// ```
/// use agent_trace::services::log_sanitizer::sanitize;
///
/// assert_eq!(sanitize("##vso[task.setvariable]x"), "**vso[task.setvariable]x");
/// assert_eq!(sanitize("plain output"), "plain output");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    sanitize_base64(input).unwrap_or_else(|_| scrub(input))
}

/// [`sanitize`] for optional input; `None` maps to an empty string.
pub fn sanitize_opt(input: Option<&str>) -> String {
    input.map(sanitize).unwrap_or_default()
}

/// Treat `input` as a base64 payload: decode it, sanitize the text and
/// encode it again.
///
/// A payload with nothing to defuse is returned exactly as given, line
/// breaks included. A rewritten payload is encoded on a single line.
///
/// # Errors
/// [`SanitizeError::NotBase64`] when `input` is not canonical base64 and
/// [`SanitizeError::NotUtf8`] when the payload is not text. Both are
/// informational for callers that only care about encoded input.
pub fn sanitize_base64(input: &str) -> Result<String, SanitizeError> {
    if input.is_empty() {
        return Ok(String::new());
    }

    let DecodedPayload::Decoded(bytes) = decode_base64(input) else {
        return Err(SanitizeError::NotBase64);
    };
    let decoded = String::from_utf8(bytes).map_err(|_| SanitizeError::NotUtf8)?;

    let sanitized = sanitize(&decoded);
    if sanitized == decoded {
        return Ok(input.to_string());
    }
    Ok(BASE64.encode(sanitized))
}

/// Whether `input` carries a live directive marker in plain text.
pub fn contains_directive(input: &str) -> bool {
    DIRECTIVE_MARKER.is_match(input)
}

fn scrub(input: &str) -> String {
    DIRECTIVE_MARKER.replace_all(input, "**$1").into_owned()
}
