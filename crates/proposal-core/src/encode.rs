//! Inline data URL encoding.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Marker prefix of an already-embedded reference.
pub const DATA_URL_PREFIX: &str = "data:";

/// Encode `bytes` as `data:<mime>;base64,<payload>`.
///
/// Standard alphabet, padded, no line wrapping. The MIME type is passed
/// through as given.
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    let payload = STANDARD.encode(bytes);
    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + mime.len() + 8 + payload.len());
    url.push_str(DATA_URL_PREFIX);
    url.push_str(mime);
    url.push_str(";base64,");
    url.push_str(&payload);
    url
}

/// Whether a reference is already in embedded form.
pub fn is_embedded(src: &str) -> bool {
    src.get(..DATA_URL_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(DATA_URL_PREFIX))
}
