//! URL Utility Functions
//!
//! Resolution of image `src` values against the page URL, plus the small
//! checks the image heuristics run on raw URL strings.

use url::Url;

use crate::error::{Error, Result};

/// Schemes that are never joined onto a base URL.
const OPAQUE_PREFIXES: [&str; 4] = ["data:", "javascript:", "mailto:", "tel:"];

/// Extensions an anchor `href` may end with to count as pointing at an image.
const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".gif", ".png"];

/// Parse `s` if it is an absolute http(s) URL with a host.
#[must_use]
pub fn parse_url(s: &str) -> Option<Url> {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }
    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Check if a string is a valid absolute URL.
#[must_use]
pub fn is_absolute_url(s: &str) -> bool {
    parse_url(s).is_some()
}

/// Parse the configured page URL, rejecting anything that cannot serve as a base.
pub fn parse_base_url(page_url: &str) -> Result<Url> {
    parse_url(page_url).ok_or_else(|| Error::InvalidUrl(page_url.to_string()))
}

/// Convert a relative or absolute URL to absolute form.
///
/// Special URIs (`data:`, `javascript:`, ...) come back unchanged, as does
/// anything the base cannot resolve.
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    if OPAQUE_PREFIXES.iter().any(|p| url_str.starts_with(p)) || is_absolute_url(url_str) {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Absolute form of `raw` when a base is known, otherwise `raw` as written.
#[must_use]
pub fn resolve(raw: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) => create_absolute_url(raw, base),
        None => raw.trim().to_string(),
    }
}

/// Inline `data:image/...` payloads are never article images.
#[must_use]
pub fn is_inline_image(src: &str) -> bool {
    src.trim_start()
        .get(..11)
        .is_some_and(|head| head.eq_ignore_ascii_case("data:image/"))
}

/// The href ends with a common image extension.
#[must_use]
pub fn ends_with_image_extension(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// The href names an image file followed by a query string (`photo.jpg?w=800`).
#[must_use]
pub fn has_image_extension_with_query(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.contains(&format!("{ext}?")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        match Url::parse("https://news.example.com/2019/06/12/story.html") {
            Ok(url) => url,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_parse_url_requires_http_and_host() {
        assert!(parse_url("https://example.com/a").is_some());
        assert!(parse_url("  http://example.com  ").is_some());
        assert!(parse_url("ftp://example.com/file").is_none());
        assert!(parse_url("/relative/path").is_none());
        assert!(parse_url("").is_none());
    }

    #[test]
    fn test_parse_base_url_reports_invalid_input() {
        assert!(parse_base_url("https://example.com").is_ok());
        match parse_base_url("not a url") {
            Err(Error::InvalidUrl(raw)) => assert_eq!(raw, "not a url"),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_create_absolute_url_relative() {
        let base = base();
        assert_eq!(
            create_absolute_url("/img/photo.jpg", &base),
            "https://news.example.com/img/photo.jpg"
        );
        assert_eq!(
            create_absolute_url("photo.jpg", &base),
            "https://news.example.com/2019/06/12/photo.jpg"
        );
        assert_eq!(
            create_absolute_url("//cdn.example.net/p.png", &base),
            "https://cdn.example.net/p.png"
        );
    }

    #[test]
    fn test_create_absolute_url_keeps_absolute_and_special() {
        let base = base();
        assert_eq!(
            create_absolute_url("http://other.org/x.gif", &base),
            "http://other.org/x.gif"
        );
        assert_eq!(
            create_absolute_url("data:image/png;base64,AAAA", &base),
            "data:image/png;base64,AAAA"
        );
        assert_eq!(create_absolute_url("   ", &base), "");
    }

    #[test]
    fn test_resolve_without_base_keeps_raw() {
        assert_eq!(resolve(" img/a.jpg ", None), "img/a.jpg");
        assert_eq!(
            resolve("img/a.jpg", Some(&base())),
            "https://news.example.com/2019/06/12/img/a.jpg"
        );
    }

    #[test]
    fn test_inline_image_detection() {
        assert!(is_inline_image("data:image/gif;base64,R0lGOD"));
        assert!(is_inline_image("DATA:IMAGE/png;base64,x"));
        assert!(!is_inline_image("data:"));
        assert!(!is_inline_image("/images/data-image.png"));
    }

    #[test]
    fn test_image_extension_checks() {
        assert!(ends_with_image_extension("https://x.org/big/photo.JPG"));
        assert!(!ends_with_image_extension("https://x.org/photo.jpg?w=800"));
        assert!(has_image_extension_with_query("https://x.org/photo.jpg?w=800"));
        assert!(!has_image_extension_with_query("https://x.org/story.html"));
    }
}
