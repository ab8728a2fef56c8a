//! Compiled regex patterns for content and image scoring.
//!
//! Every pattern lives in one read-only [`Patterns`] registry. The registry is
//! compiled once (`Patterns::shared`) and handed to the extractor, so no
//! scoring code reaches for a global of its own.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;

static SHARED: LazyLock<Patterns> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Patterns::compile(DEFAULT_VIDEO).expect("built-in patterns compile")
});

/// Embed hosts whose iframes/embeds survive cleanup.
const DEFAULT_VIDEO: &str = r"(?i)(https?:)?//([a-z0-9-]+\.)?(youtube(-nocookie)?|vimeo)\.com";

/// Registry of every regex the extractor uses.
#[derive(Debug, Clone)]
pub struct Patterns {
    // =========================================================================
    // Text-body patterns
    // =========================================================================
    /// class+id text of nodes pruned before scoring.
    pub unlikely_candidates: Regex,
    /// class+id text that rescues an otherwise unlikely node.
    pub maybe_candidate: Regex,
    /// class or id earning +25 content weight.
    pub positive: Regex,
    /// class or id earning -25 content weight.
    pub negative: Regex,
    /// Allowed video embeds (matched against serialized markup or `src`).
    pub video: Regex,
    /// A short paragraph that ends a sentence.
    pub sentence_end: Regex,

    // =========================================================================
    // Image patterns
    // =========================================================================
    /// Centered alignment in `style` or `align`.
    pub centered: Regex,
    /// Hidden element in `style`.
    pub display_none: Regex,
    /// Positive keywords in class/id/src/alt.
    pub positive_img: Regex,
    /// Negative keywords in class/id/src/alt.
    pub negative_img: Regex,
    /// Advertising, logo and share-button markers.
    pub remove_img: Regex,

    // =========================================================================
    // Markup rewriting
    // =========================================================================
    /// Two or more consecutive `<br>` tags.
    pub br_runs: Regex,
    /// Opening or closing `<font>` tag.
    pub font_tags: Regex,
    /// One or more `<br>` tags with trailing whitespace or `&nbsp;`.
    pub kill_breaks: Regex,
    /// A `<br>` directly before a paragraph.
    pub br_before_paragraph: Regex,
}

impl Patterns {
    /// The process-wide registry with the built-in video allow-list.
    #[must_use]
    pub fn shared() -> &'static Patterns {
        &SHARED
    }

    /// A registry whose video allow-list is `pattern` instead of YouTube/Vimeo.
    pub fn with_video_pattern(pattern: &str) -> Result<Self> {
        let mut patterns = SHARED.clone();
        patterns.video = Regex::new(pattern)?;
        Ok(patterns)
    }

    fn compile(video: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            unlikely_candidates: Regex::new(
                r"(?i)combx|comment|disqus|foot|header|menu|meta|nav|rss|shoutbox|sidebar|sponsor",
            )?,
            maybe_candidate: Regex::new(r"(?i)and|article|body|column|main")?,
            positive: Regex::new(r"(?i)blog|content|entry|hentry|main|page|pagination|post|story|text")?,
            negative: Regex::new(
                r"(?i)combx|comment|contact|foot|footer|footnote|link|media|meta|promo|related|scan|scroll|share|shoutbox|sponsor|tags|widget",
            )?,
            video: Regex::new(video)?,
            sentence_end: Regex::new(r"\.( |$)")?,

            centered: Regex::new(r"(?i)center|text-align\s?:\s?center")?,
            display_none: Regex::new(r"(?i)display\s?:\s?none")?,
            positive_img: Regex::new(
                r"(?i)article|body|content|entry|hentry|image-container|main|news|page|photo|post|text",
            )?,
            negative_img: Regex::new(
                r"(?i)bar|combx|cursor|link|pointer|promo|related|scroll|share|shoutbox|uppage|widget",
            )?,
            remove_img: Regex::new(
                r"(?i)ad1|ad2|^[a-z]ads|advertise|comment|contact|flashplayer|foot|icon|logo|meta|qq|qrcode|scan|sina|social|sponsor|tags|vote|weibo|weixin|点赞|分享",
            )?,

            br_runs: Regex::new(r"(?i)(<br[^>]*>[ \n\r\t]*){2,}")?,
            font_tags: Regex::new(r"(?i)<(/?)font[^>]*>")?,
            kill_breaks: Regex::new(r"(?i)(<br\s*/?>(\s|&nbsp;?)*)+")?,
            br_before_paragraph: Regex::new(r"(?i)<br[^>]*>\s*<p")?,
        })
    }
}
