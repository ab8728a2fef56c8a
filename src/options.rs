//! Configuration options for extraction.
//!
//! The `Options` struct controls the fallback behaviour of the text engine,
//! whether images are scored at all, and the thresholds the image engine
//! uses when deciding what to emit.

use chrono::NaiveDate;

/// Configuration options for extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_readability_img::Options;
///
/// let options = Options {
///     url: Some("https://example.com/2024/05/01/story.html".to_string()),
///     include_images: true,
///     ..Options::default()
/// };
/// assert_eq!(options.min_image_score, 30);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Page URL.
    ///
    /// Used as the base for resolving relative image URLs and as the source
    /// of the page date in the image recency heuristic.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Keep nodes whose class/id look like boilerplate (comments, menus,
    /// sidebars) instead of pruning them before scoring.
    ///
    /// The extractor switches to this mode by itself when the first attempt
    /// produces no text; setting it up front skips the first attempt.
    ///
    /// Default: `false`
    pub preserve_unlikely: bool,

    /// Re-run extraction once with `preserve_unlikely` when the first
    /// attempt yields an empty article.
    ///
    /// Default: `true`
    pub retry_on_empty: bool,

    /// Score images and report the illustrative ones.
    ///
    /// Default: `true`
    pub include_images: bool,

    /// Date compared against image URL dates when the page URL carries no
    /// date of its own.
    ///
    /// Default: `None` (today's local date)
    pub reference_date: Option<NaiveDate>,

    /// Minimum score the best image needs before any image is considered.
    ///
    /// Default: `30`
    pub min_image_score: i32,

    /// The best image must score strictly above this for anything to be emitted.
    ///
    /// Default: `50`
    pub image_emit_threshold: i32,

    /// Trace every candidate score at `debug` level.
    ///
    /// Default: `false`
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            preserve_unlikely: false,
            retry_on_empty: true,
            include_images: true,
            reference_date: None,
            min_image_score: 30,
            image_emit_threshold: 50,
            debug: false,
        }
    }
}

impl Options {
    /// The date recency is measured against when no page date is available.
    #[must_use]
    pub fn effective_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert!(opts.url.is_none());
        assert!(!opts.preserve_unlikely);
        assert!(opts.retry_on_empty);
        assert!(opts.include_images);
        assert!(opts.reference_date.is_none());
        assert_eq!(opts.min_image_score, 30);
        assert_eq!(opts.image_emit_threshold, 50);
        assert!(!opts.debug);
    }

    #[test]
    fn test_reference_date_override() {
        let date = NaiveDate::from_ymd_opt(2019, 6, 12);
        let opts = Options {
            reference_date: date,
            ..Options::default()
        };

        assert_eq!(Some(opts.effective_reference_date()), date);
    }

    #[test]
    fn test_boolean_options_can_be_toggled() {
        let opts = Options {
            preserve_unlikely: true,
            retry_on_empty: false,
            include_images: false,
            ..Options::default()
        };

        assert!(opts.preserve_unlikely);
        assert!(!opts.retry_on_empty);
        assert!(!opts.include_images);
    }
}
