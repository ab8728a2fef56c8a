//! # rs-readability-img
//!
//! Heuristic extraction of the main article and its illustrative images
//! from noisy HTML.
//!
//! Pages are scored the Readability way: paragraphs vote for their
//! containers, link-heavy and boilerplate-named blocks lose, and the winner
//! plus its prose siblings become the article. A second engine scores every
//! `<img>` by its ancestor chain, keywords, dimensions and URL date, and
//! keeps the ones that sit with the article.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_readability_img::{extract_with_options, Options};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><div class="post"><p>Main content here, long enough to count as a paragraph.</p>
//! <img src="/2024/05/01/photo.jpg" width="800" height="600"></div></body></html>"#;
//!
//! let options = Options {
//!     url: Some("https://example.com/2024/05/01/story.html".to_string()),
//!     ..Options::default()
//! };
//! let result = extract_with_options(html, &options)?;
//! println!("Title: {:?}", result.title);
//! println!("Content: {}", result.content_text);
//! println!("Images: {:?}", result.images);
//! # Ok::<(), rs_readability_img::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Article Extraction**: Candidate scoring, sibling inclusion and cleanup
//! - **Image Selection**: Ancestor-chain scoring with a co-depth bonus
//! - **Graceful Degradation**: One retry with unlikely candidates kept, then a placeholder
//! - **Configurable**: Thresholds, injectable patterns and date signal

mod error;
mod extract;
mod options;
mod result;

/// DOM operations adapter over `dom_query` node handles.
pub mod dom;

/// Per-run score side tables keyed by node id.
pub mod scores;

/// Compiled regex registry.
pub mod patterns;

/// Script/style removal and break/font rewriting.
pub mod preprocess;

/// Article body extraction passes.
pub mod extractor;

/// Illustrative image scoring and selection.
pub mod images;

/// Link density of a node.
pub mod link_density;

/// Publication dates found in URLs.
pub mod date_signal;

/// Title heuristic from `<title>` and `<h1>`.
pub mod title;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use date_signal::{DateSignal, UrlDateSignal};
pub use error::{Error, Result};
pub use extract::{Extractor, PLACEHOLDER_TEXT};
pub use options::Options;
pub use patterns::Patterns;
pub use result::ExtractResult;

/// Extracts the article and its images using default options.
///
/// # Example
///
/// ```rust
/// use rs_readability_img::extract;
///
/// let html = "<html><body><div><p>A paragraph that is long enough to be scored.</p></div></body></html>";
/// let result = extract(html)?;
/// println!("{}", result.content_text);
/// # Ok::<(), rs_readability_img::Error>(())
/// ```
pub fn extract(html: &str) -> Result<ExtractResult> {
    extract_with_options(html, &Options::default())
}

/// Extracts the article and its images with custom options.
///
/// Only fails on bad options: an invalid `url` yields [`Error::InvalidUrl`].
/// Pages without usable content come back `degraded`, not as errors.
///
/// # Example
///
/// ```rust
/// use rs_readability_img::{extract_with_options, Options};
///
/// let html = "<html><body><article>Content</article></body></html>";
/// let options = Options {
///     include_images: false,
///     retry_on_empty: false,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// assert!(result.images.is_empty());
/// # Ok::<(), rs_readability_img::Error>(())
/// ```
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractResult> {
    let extractor = Extractor::new(options.clone())?;
    Ok(extractor.extract(html))
}

/// Extracts from HTML bytes with automatic encoding detection.
///
/// # Character Encoding
///
/// The function detects encoding from:
/// - A byte-order mark
/// - `<meta charset="...">`
/// - `<meta http-equiv="Content-Type" content="...; charset=...">`
/// - Defaults to UTF-8 if no declaration found
///
/// Invalid characters are replaced with � (Unicode replacement character)
/// rather than causing errors.
///
/// # Example
///
/// ```rust
/// use rs_readability_img::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div><p>Caf\xE9 au lait, served every morning with bread.</p></div></body></html>";
/// let result = extract_bytes(html)?;
/// assert!(result.content_text.contains("Café"));
/// # Ok::<(), rs_readability_img::Error>(())
/// ```
pub fn extract_bytes(html: &[u8]) -> Result<ExtractResult> {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts from HTML bytes with custom options and automatic encoding detection.
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<ExtractResult> {
    let (html_str, encoding, had_errors) = encoding::decode_html(html);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced undecodable bytes");
    }
    extract_with_options(&html_str, options)
}
