//! Image and image-ancestor scoring.
//!
//! An `<img>` is judged on its own attributes (src keywords, URL date,
//! declared size, alignment) and on the three elements above it, whose
//! scores are initialized once and then reused by every image below them.

use chrono::NaiveDate;
use dom_query::NodeRef;
use url::Url;

use crate::date_signal::DateSignal;
use crate::dom;
use crate::patterns::Patterns;
use crate::scores::ScoreTable;
use crate::url_utils;

/// Everything the image scorer reads besides the tree and the score tables.
pub struct ImageContext<'a> {
    pub patterns: &'a Patterns,
    pub date_signal: &'a dyn DateSignal,
    pub base_url: Option<&'a Url>,
    /// Date parsed from the page URL.
    pub page_date: Option<NaiveDate>,
    /// "Today" when the page URL carries no date.
    pub reference_date: NaiveDate,
}

/// The three ancestors whose scores feed into an image.
#[derive(Debug, Clone, Copy)]
pub struct AncestorChain<'a> {
    pub parent: NodeRef<'a>,
    pub grandparent: NodeRef<'a>,
    pub great_grandparent: Option<NodeRef<'a>>,
}

/// A `<strong>` wrapper is skipped in favour of its own parent.
fn skip_strong<'a>(node: NodeRef<'a>) -> NodeRef<'a> {
    if dom::has_tag(&node, "strong") {
        if let Some(parent) = dom::parent_element(&node) {
            return parent;
        }
    }
    node
}

/// `upper` when it merely repeats `lower` (same tag and attributes), its parent instead.
fn skip_duplicate<'a>(lower: &NodeRef<'a>, upper: NodeRef<'a>) -> NodeRef<'a> {
    if dom::same_tag_and_attributes(lower, &upper) {
        dom::parent_element(&upper).unwrap_or(upper)
    } else {
        upper
    }
}

/// Ancestor chain used while scoring an image.
///
/// `None` when the image sits too close to the document root to have a
/// parent and grandparent.
#[must_use]
pub fn scoring_chain<'a>(image: &NodeRef<'a>) -> Option<AncestorChain<'a>> {
    let parent = skip_strong(dom::parent_element(image)?);
    let grandparent = skip_strong(dom::parent_element(&parent)?);
    let grandparent = skip_duplicate(&parent, grandparent);
    let great_grandparent =
        dom::parent_element(&grandparent).map(|ggp| skip_duplicate(&grandparent, ggp));

    Some(AncestorChain {
        parent,
        grandparent,
        great_grandparent,
    })
}

/// Ancestor chain used for the co-depth bonus: no `<strong>` skipping.
#[must_use]
pub fn structural_chain<'a>(image: &NodeRef<'a>) -> Option<AncestorChain<'a>> {
    let parent = dom::parent_element(image)?;
    let grandparent = skip_duplicate(&parent, dom::parent_element(&parent)?);
    let great_grandparent =
        dom::parent_element(&grandparent).map(|ggp| skip_duplicate(&grandparent, ggp));

    Some(AncestorChain {
        parent,
        grandparent,
        great_grandparent,
    })
}

/// `data-src` when set, `src` otherwise.
#[must_use]
pub fn raw_source(image: &NodeRef) -> Option<String> {
    let data_src = dom::attr(image, "data-src");
    if !data_src.trim().is_empty() {
        return Some(data_src);
    }
    let src = dom::attr(image, "src");
    (!src.trim().is_empty()).then_some(src)
}

/// Whether the image has a usable, non-inline source at all.
#[must_use]
pub fn is_eligible(image: &NodeRef) -> bool {
    ["src", "data-src"].iter().any(|name| {
        let value = dom::attr(image, name);
        !value.trim().is_empty() && !url_utils::is_inline_image(&value)
    })
}

/// Resolved source URL of an image.
#[must_use]
pub fn image_source(image: &NodeRef, base: Option<&Url>) -> Option<String> {
    raw_source(image).map(|raw| url_utils::resolve(&raw, base))
}

/// Tag contribution to an ancestor's image score.
fn ancestor_tag_weight(node: &NodeRef) -> i32 {
    match dom::tag_name(node).as_deref() {
        Some("p") => 7,
        Some("div" | "span" | "figure" | "article") => 5,
        Some(
            "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" | "td" | "blockquote"
            | "pre" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "noscript",
        ) => -10,
        Some("a") => anchor_weight(node),
        _ => 0,
    }
}

/// How much an `<a>` around an image looks like a link to the full-size picture.
fn anchor_weight(anchor: &NodeRef) -> i32 {
    let href = dom::attr(anchor, "href");
    if href.trim().is_empty() {
        return 0;
    }
    let links_to_inner_image = dom::descendant_elements(anchor)
        .iter()
        .any(|d| dom::attr(d, "src") == href);

    if links_to_inner_image {
        20
    } else if url_utils::ends_with_image_extension(&href) {
        10
    } else if url_utils::has_image_extension_with_query(&href) {
        5
    } else {
        -150
    }
}

/// Style, align and class/id contribution to an ancestor's image score.
fn ancestor_attribute_weight(node: &NodeRef, patterns: &Patterns) -> i32 {
    let mut weight = 0;

    let style = dom::attr(node, "style");
    if !style.is_empty() {
        if patterns.centered.is_match(&style) {
            weight += 10;
        }
        if patterns.display_none.is_match(&style) {
            weight -= 200;
        }
    }

    let align = dom::attr(node, "align");
    if !align.is_empty() {
        weight += if patterns.centered.is_match(&align) { 10 } else { -10 };
    }

    let class_and_id = dom::class_and_id(node);
    if !class_and_id.is_empty() {
        if patterns.negative_img.is_match(&class_and_id) {
            weight -= 15;
        }
        if patterns.positive_img.is_match(&class_and_id) {
            weight += 15;
        }
        if patterns.remove_img.is_match(&class_and_id) {
            weight -= 40;
        }
    }

    weight
}

/// Initialize an ancestor's image score once; `<body>` always scores 0.
pub fn initialize_ancestor(node: &NodeRef, scores: &mut ScoreTable, patterns: &Patterns) {
    if scores.image.is_scored(node.id) {
        return;
    }
    if dom::has_tag(node, "body") {
        scores.image.init(node.id, 0);
        return;
    }
    let score = ancestor_tag_weight(node)
        + ancestor_attribute_weight(node, patterns)
        + scores.content.value(node.id);
    scores.image.init(node.id, score);
}

/// Image score of an ancestor, initializing it on first read.
pub fn ancestor_score(node: &NodeRef, scores: &mut ScoreTable, patterns: &Patterns) -> i32 {
    initialize_ancestor(node, scores, patterns);
    scores.image.value(node.id)
}

/// Bonus or penalty for how far the image date lies before the page date.
///
/// Against the reference date instead of a page date, penalties are halved.
#[must_use]
pub fn recency_weight(days_before_page: i64, against_page_date: bool) -> i32 {
    let d = days_before_page;
    let score = if d > 15 && d < 30 {
        if against_page_date {
            -d
        } else {
            -d / 2
        }
    } else if d > 30 {
        if against_page_date {
            -40
        } else {
            -20
        }
    } else if (0..1).contains(&d) {
        30
    } else if (0..3).contains(&d) {
        20
    } else if (0..7).contains(&d) {
        10
    } else {
        0
    };
    score as i32
}

/// A declared `width`/`height` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Missing,
    Percent,
    Pixels(f64),
}

impl Dimension {
    /// Parse an attribute value: `auto` is ignored, `px` stripped, junk is `Missing`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let value = raw.replace("auto", "");
        let value = value.trim();
        if value.is_empty() {
            return Self::Missing;
        }
        if value.contains('%') {
            return Self::Percent;
        }
        let digits = value
            .strip_suffix("px")
            .or_else(|| value.strip_suffix("PX"))
            .or_else(|| value.strip_suffix("Px"))
            .or_else(|| value.strip_suffix("pX"))
            .unwrap_or(value)
            .trim();
        digits.parse::<f64>().map_or(Self::Missing, Self::Pixels)
    }
}

/// Score from declared dimensions. Small pictures are icons, large ones illustrations.
#[must_use]
pub fn dimension_weight(width: Dimension, height: Dimension) -> i32 {
    use Dimension::{Missing, Percent, Pixels};

    match (width, height) {
        (Pixels(w), Pixels(h)) => {
            if w < 100.0 && h < 100.0 {
                -40
            } else if w < 100.0 || h < 100.0 {
                -25
            } else if w < 150.0 && h < 150.0 {
                -20
            } else if w < 150.0 || h < 150.0 {
                -10
            } else if w < 200.0 && h < 200.0 {
                -10
            } else if w > 400.0 && h > 400.0 {
                25
            } else if w > 350.0 && h > 350.0 {
                20
            } else if w > 300.0 && h > 300.0 {
                15
            } else if w > 300.0 || h > 300.0 {
                10
            } else {
                0
            }
        }
        (Pixels(side), _) | (_, Pixels(side)) => {
            if side < 100.0 {
                -25
            } else if side < 150.0 {
                -15
            } else if side > 400.0 {
                15
            } else {
                0
            }
        }
        (Percent, _) | (_, Percent) => -100,
        (Missing, Missing) => 0,
    }
}

/// The image's own score from its source, date, text, size, alignment and href.
#[must_use]
pub fn image_tag_score(image: &NodeRef, ctx: &ImageContext) -> i32 {
    let patterns = ctx.patterns;
    let mut score = 0;

    let source = image_source(image, ctx.base_url);
    match &source {
        Some(src) => {
            if patterns.negative_img.is_match(src) {
                score -= 25;
            }
            if patterns.positive_img.is_match(src) {
                score += 25;
            }
            if patterns.remove_img.is_match(src) {
                score -= 60;
            }
            if let Some(image_date) = ctx.date_signal.date_from_url(src) {
                score += match ctx.page_date {
                    Some(page) => recency_weight((page - image_date).num_days(), true),
                    None => recency_weight((ctx.reference_date - image_date).num_days(), false),
                };
            }
        }
        None => score -= 500,
    }

    let mut alt_title = dom::attr(image, "alt");
    alt_title.push_str(&dom::attr(image, "title"));
    if !alt_title.is_empty() && alt_title.chars().count() < 30 {
        if patterns.negative_img.is_match(&alt_title) {
            score -= 10;
        }
        if patterns.positive_img.is_match(&alt_title) {
            score += 10;
        }
        if patterns.remove_img.is_match(&alt_title) {
            score -= 30;
        }
    }

    score += dimension_weight(
        Dimension::parse(&dom::attr(image, "width")),
        Dimension::parse(&dom::attr(image, "height")),
    );

    let align = dom::attr(image, "align");
    if !align.is_empty() {
        score += if patterns.centered.is_match(&align) { 10 } else { -10 };
    }

    if !dom::attr(image, "href").is_empty() {
        score -= 200;
    }

    score
}
