//! base64url-without-padding helpers used by the wire format.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

/// Encode bytes as base64url without padding.
#[must_use]
pub fn b64_encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode a base64url-no-pad string. Returns `None` for any invalid input,
/// including padded or non-URL-safe alphabets.
#[must_use]
pub fn b64_decode(encoded: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(encoded).ok()
}
