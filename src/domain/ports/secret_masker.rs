//! Secret masking port.

use crate::domain::errors::MaskError;

/// Transforms a secret value into an alternate representation that should
/// also be masked (JSON-escaped, URI-escaped, base64, ...).
pub type ValueEncoder = fn(&str) -> String;

/// Port for redacting secrets from trace text.
///
/// The channel write path only calls [`mask`](SecretMasker::mask).
/// Registration is done by the owning process at startup.
///
/// # Thread Safety
///
/// A single masker is shared by every channel of a registry and is called
/// concurrently; implementations handle their own locking.
pub trait SecretMasker: Send + Sync {
    /// Replace every known secret in `input` with a placeholder.
    fn mask(&self, input: &str) -> Result<String, MaskError>;

    /// Register a literal secret value.
    fn add_value(&self, value: &str, origin: &str);

    /// Register a regular expression whose matches are secrets.
    fn add_pattern(&self, pattern: &str, origin: &str) -> Result<(), MaskError>;

    /// Register an encoder; every secret value is also masked in its encoded form.
    fn add_encoder(&self, encoder: ValueEncoder, origin: &str);
}
