//! Byte input decoding.
//!
//! Pages are usually UTF-8, but mirrors of the site are served as Shift_JIS
//! or GBK. The charset comes from a byte order mark or the first charset
//! declaration in the page head; anything else is read as UTF-8.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use tracing::debug;

/// Bytes of the page head searched for a charset declaration.
const HEAD_SCAN_LIMIT: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex"));

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
        .expect("valid regex")
});

/// Detects the character encoding of page bytes.
///
/// Order: byte order mark, `<meta charset>`, `<meta http-equiv>` content
/// type, UTF-8. Unknown labels are skipped.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(HEAD_SCAN_LIMIT)]);
    for re in [&*CHARSET_META_RE, &*CONTENT_TYPE_CHARSET_RE] {
        if let Some(encoding) = charset_label(re, &head).and_then(|label| Encoding::for_label(label.as_bytes())) {
            return encoding;
        }
    }
    UTF_8
}

fn charset_label<'h>(re: &Regex, head: &'h str) -> Option<&'h str> {
    re.captures(head).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Decodes page bytes to UTF-8 text.
///
/// Malformed sequences become U+FFFD; decoding never fails.
///
/// # Examples
///
/// ```
/// use rsc_comics::encoding::transcode_to_utf8;
///
/// let html = b"<html><script>self.__next_f.push([1,\"0:[]\\n\"])</script></html>";
/// assert!(transcode_to_utf8(html).contains("__next_f"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    // Strips a BOM of the detected encoding, if present.
    let (decoded, _, had_errors): (Cow<'_, str>, _, bool) = encoding.decode(html);
    if had_errors {
        debug!(encoding = encoding.name(), "malformed byte sequences replaced");
    }
    decoded.into_owned()
}
