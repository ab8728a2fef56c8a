//! Byte input decoding.
//!
//! Pages handed over as raw bytes are sniffed for a byte-order mark first,
//! then for a charset declared in a `<meta>` tag near the top of the page.
//! Anything undeclared is read as UTF-8. Undecodable sequences become U+FFFD;
//! decoding never fails.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// How far into the page a charset declaration is looked for.
const SNIFF_LIMIT: usize = 2048;

/// `<meta charset=...>` or the `charset=` parameter of an http-equiv content type.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).expect("valid regex")
});

/// Charset label declared in the page head, as written.
fn declared_charset(head: &str) -> Option<&str> {
    META_CHARSET_RE
        .captures(head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Pick the encoding for `html`: BOM, then `<meta>` declaration, then UTF-8.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);
    declared_charset(&head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        // A page that declares UTF-16 in ASCII meta markup is not UTF-16.
        .map(|enc| if enc.output_encoding() == UTF_8 { UTF_8 } else { enc })
        .unwrap_or(UTF_8)
}

/// Decode `html` to a string with the sniffed encoding.
///
/// Returns the text together with the encoding used and whether any byte
/// sequence had to be replaced.
#[must_use]
pub fn decode_html(html: &[u8]) -> (String, &'static Encoding, bool) {
    let encoding = sniff_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    (decoded.into_owned(), used, had_errors)
}
