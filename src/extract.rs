//! Core extraction pipeline.
//!
//! Preprocess, prune, score, pick the body, score images on the annotated
//! tree, then move the body and its siblings into the article container and
//! clean it. An attempt that yields no text is retried once with unlikely
//! candidates preserved; a second failure degrades to a placeholder.

use chrono::NaiveDate;
use dom_query::{Document, NodeRef};
use tracing::{debug, warn};
use url::Url;

use crate::date_signal::{DateSignal, UrlDateSignal};
use crate::dom;
use crate::error::Result;
use crate::extractor::{cleanup, pruning, scoring, siblings};
use crate::images::{self, ImageContext, ImageSelection, ImageThresholds};
use crate::options::Options;
use crate::patterns::Patterns;
use crate::preprocess;
use crate::result::ExtractResult;
use crate::scores::ScoreTable;
use crate::title;
use crate::url_utils;

/// Text of the paragraph emitted when nothing could be extracted.
pub const PLACEHOLDER_TEXT: &str = "Sorry, unable to parse this page for content.";

/// Output of one pass over a freshly parsed document.
#[derive(Debug, Default)]
struct Attempt {
    content_html: String,
    content_text: String,
    top_score: Option<i32>,
    images: ImageSelection,
}

/// Reusable extraction engine.
///
/// Holds the options, the compiled pattern registry and the date
/// collaborator. Each [`Extractor::extract`] call parses its own tree and
/// keeps its own score tables, so one extractor can serve many threads.
///
/// # Example
///
/// ```rust
/// use rs_readability_img::{Extractor, Options};
///
/// let extractor = Extractor::new(Options::default())?;
/// let result = extractor.extract("<html><body><p>Hello.</p></body></html>");
/// assert!(result.content_html.starts_with("<div id=\"readability-content\">"));
/// # Ok::<(), rs_readability_img::Error>(())
/// ```
pub struct Extractor {
    options: Options,
    patterns: Patterns,
    date_signal: Box<dyn DateSignal>,
    base_url: Option<Url>,
}

impl Extractor {
    /// Build an extractor with the built-in patterns and URL date signal.
    ///
    /// Fails with [`crate::Error::InvalidUrl`] when `options.url` is set but
    /// is not an absolute http(s) URL.
    pub fn new(options: Options) -> Result<Self> {
        let base_url = options
            .url
            .as_deref()
            .map(url_utils::parse_base_url)
            .transpose()?;

        Ok(Self {
            options,
            patterns: Patterns::shared().clone(),
            date_signal: Box::new(UrlDateSignal::new()),
            base_url,
        })
    }

    /// Replace the pattern registry, e.g. one built with
    /// [`Patterns::with_video_pattern`].
    #[must_use]
    pub fn with_patterns(mut self, patterns: Patterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Replace the date collaborator used by the image recency heuristic.
    #[must_use]
    pub fn with_date_signal(mut self, date_signal: impl DateSignal + 'static) -> Self {
        self.date_signal = Box::new(date_signal);
        self
    }

    /// Run the full pipeline on one document.
    ///
    /// Never fails: an unreadable page yields a degraded result carrying the
    /// placeholder paragraph.
    #[must_use]
    pub fn extract(&self, html: &str) -> ExtractResult {
        let page_date = self
            .options
            .url
            .as_deref()
            .and_then(|url| self.date_signal.date_from_url(url));
        let reference_date = self.options.effective_reference_date();
        let title = title::article_title(&dom::parse(html));

        let mut preserve = self.options.preserve_unlikely;
        let mut attempt = self.attempt(html, preserve, page_date, reference_date);

        if attempt.content_text.is_empty() && !preserve && self.options.retry_on_empty {
            debug!("no text with unlikely candidates pruned, retrying with them preserved");
            preserve = true;
            attempt = self.attempt(html, preserve, page_date, reference_date);
        }

        let mut warnings = attempt.images.warnings;
        let degraded = attempt.content_text.is_empty();
        if degraded {
            let message = format!("no article content found (preserve_unlikely: {preserve})");
            warn!("{message}");
            warnings.push(message);
            attempt.content_html = format!(
                r#"<div id="{}"><p>{PLACEHOLDER_TEXT}</p></div>"#,
                siblings::CONTAINER_ID
            );
            attempt.content_text = PLACEHOLDER_TEXT.to_string();
        }

        ExtractResult {
            content_html: attempt.content_html,
            content_text: attempt.content_text,
            images: attempt.images.urls,
            title,
            top_candidate_score: attempt.top_score,
            degraded,
            warnings,
        }
    }

    fn attempt(
        &self,
        html: &str,
        preserve_unlikely: bool,
        page_date: Option<NaiveDate>,
        reference_date: NaiveDate,
    ) -> Attempt {
        let patterns = &self.patterns;
        let doc = dom::parse(html);
        preprocess::prepare(&doc, patterns);

        let removed = pruning::prune_and_normalize(&doc, patterns, preserve_unlikely);
        debug!(removed, preserve_unlikely, "pruned unlikely candidates");

        let mut scores = ScoreTable::new();
        let candidates = scoring::score_paragraphs(&doc, &mut scores.content, patterns);
        let top = scoring::select_top_candidate(&candidates, &mut scores.content, self.options.debug);

        let images = if self.options.include_images {
            let ctx = ImageContext {
                patterns,
                date_signal: self.date_signal.as_ref(),
                base_url: self.base_url.as_ref(),
                page_date,
                reference_date,
            };
            let thresholds = ImageThresholds {
                min_score: self.options.min_image_score,
                emit_threshold: self.options.image_emit_threshold,
            };
            images::extract_images(&doc, top, &mut scores, &ctx, thresholds)
        } else {
            ImageSelection::default()
        };

        let Some(top) = top
            .filter(|t| !dom::has_tag(t, "body"))
            .or_else(|| wrap_body(&doc, &mut scores, patterns))
        else {
            return Attempt {
                images,
                ..Attempt::default()
            };
        };

        let top_score = Some(scores.content.value(top.id));
        let article = siblings::build_container(&top, &scores.content, patterns);
        cleanup::prep_article(&article, patterns);

        Attempt {
            content_html: dom::outer_html(&article),
            content_text: dom::inner_text(&article, true),
            top_score,
            images,
        }
    }
}

/// Move the whole body into a fresh `div` and score it like a candidate.
fn wrap_body<'a>(
    doc: &'a Document,
    scores: &mut ScoreTable,
    patterns: &Patterns,
) -> Option<NodeRef<'a>> {
    let body = dom::body(doc)?;
    let markup = dom::inner_html(&body);
    dom::set_inner_html(&body, &format!("<div>{markup}</div>"));

    let wrapper = dom::element_children(&body).into_iter().next()?;
    scoring::initialize_node(&wrapper, &mut scores.content, patterns);
    debug!("no usable candidate, wrapped the whole body");
    Some(wrapper)
}
