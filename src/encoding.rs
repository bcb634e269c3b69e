//! Character encoding detection for fetched pages.
//!
//! The charset is taken from, in order:
//! 1. the `Content-Type` response header
//! 2. `<meta charset="...">` in the first 1024 bytes
//! 3. `<meta http-equiv="Content-Type" content="...; charset=...">`
//! 4. UTF-8
//!
//! A byte-order mark overrides all of these when decoding.

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;

/// `charset=` parameter of a `Content-Type` value.
static HEADER_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).unwrap());

static META_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_CONTENT_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).unwrap()
});

fn capture_label<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn encoding_for(label: Option<&str>) -> Option<&'static Encoding> {
    label.and_then(|l| Encoding::for_label(l.as_bytes()))
}

/// Pick the encoding for a response body.
///
/// # Arguments
///
/// * `body` - Raw response bytes
/// * `content_type` - The `Content-Type` header value, if any
///
/// # Returns
///
/// The first recognised declaration, or UTF-8 when there is none.
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) =
        encoding_for(content_type.and_then(|ct| capture_label(&HEADER_CHARSET_RE, ct)))
    {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(1024)]);
    encoding_for(capture_label(&META_CHARSET_RE, &head))
        .or_else(|| encoding_for(capture_label(&META_CONTENT_TYPE_RE, &head)))
        .unwrap_or(UTF_8)
}

/// Decode a response body to a `String`, replacing malformed sequences.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    let (decoded, used, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!(encoding = used.name(), "Body contained malformed sequences");
    }
    decoded.into_owned()
}
