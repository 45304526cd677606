// Data-URL helpers for the content part codec. Pure, no I/O.

use base64::Engine;

/// Encode raw bytes to a base64 string using the STANDARD alphabet.
pub fn base64_encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Build a data URL from a MIME type and already-base64-encoded data:
/// `data:{media_type};base64,{data}`.
pub fn encode_data_url(media_type: &str, base64_data: &str) -> String {
    format!("data:{media_type};base64,{base64_data}")
}

/// True when the string is already a `data:` URL.
pub fn is_data_url(s: &str) -> bool {
    s.starts_with("data:")
}

/// Split a data URL back into `(media_type, bytes)`.
///
/// Only the `;base64,` form is accepted; anything else is `None`.
pub fn decode_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (media_type, payload) = rest.split_once(";base64,")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some((media_type.to_string(), bytes))
}
