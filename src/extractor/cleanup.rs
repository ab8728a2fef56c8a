//! Article cleanup.
//!
//! Runs on the article container after sibling inclusion: drops inline
//! styles, forms and stray headings, embeds that are not videos, link-heavy
//! or image-heavy blocks, and empty paragraphs.

use dom_query::NodeRef;
use tracing::debug;

use crate::dom;
use crate::extractor::scoring::class_weight;
use crate::link_density::link_density;
use crate::patterns::Patterns;

/// Elements at or above this many commas are kept by conditional cleaning.
const COMMA_KEEP_THRESHOLD: usize = 10;

/// Clean the article container in place.
pub fn prep_article(article: &NodeRef, patterns: &Patterns) {
    clean_styles(article);
    kill_breaks(article, patterns);

    for tag in ["form", "object", "h1"] {
        clean(article, tag, patterns);
    }
    if dom::elements_by_tag(article, "h2").len() == 1 {
        clean(article, "h2", patterns);
    }
    clean(article, "iframe", patterns);

    clean_headers(article, patterns);

    for tag in ["table", "ul", "div"] {
        clean_conditionally(article, tag, patterns);
    }

    remove_empty_paragraphs(article);

    let html = dom::inner_html(article);
    let rewritten = patterns.br_before_paragraph.replace_all(&html, "<p");
    if rewritten != html.as_str() {
        dom::set_inner_html(article, &rewritten);
    }
}

/// Remove `style` from `node` and every descendant element.
pub fn clean_styles(node: &NodeRef) {
    dom::remove_attribute(node, "style");
    for element in dom::descendant_elements(node) {
        dom::remove_attribute(&element, "style");
    }
}

/// Collapse every run of `<br>` (with `&nbsp;` padding) into one.
fn kill_breaks(node: &NodeRef, patterns: &Patterns) {
    let html = dom::inner_html(node);
    let collapsed = patterns.kill_breaks.replace_all(&html, "<br />");
    if collapsed != html.as_str() {
        dom::set_inner_html(node, &collapsed);
    }
}

/// Remove every `tag` below `node`. `iframe`s pointing at an allowed
/// video host survive.
pub fn clean(node: &NodeRef, tag: &str, patterns: &Patterns) {
    let keeps_video = tag == "iframe";
    for target in dom::elements_by_tag(node, tag) {
        if keeps_video && patterns.video.is_match(&dom::outer_html(&target)) {
            continue;
        }
        dom::remove(&target);
    }
}

/// Remove headings with a negative class weight or mostly link text.
pub fn clean_headers(node: &NodeRef, patterns: &Patterns) {
    for level in 1..=6 {
        let tag = format!("h{level}");
        for header in dom::elements_by_tag(node, &tag) {
            if class_weight(&header, patterns) < 0 || link_density(&header) > 0.33 {
                dom::remove(&header);
            }
        }
    }
}

/// Counts the conditional cleaner looks at.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct BlockStats {
    paragraphs: usize,
    images: usize,
    list_items: usize,
    inputs: usize,
    foreign_embeds: usize,
    text_length: usize,
    link_density: f64,
}

impl BlockStats {
    fn collect(node: &NodeRef, patterns: &Patterns) -> Self {
        let text = dom::inner_text(node, true);
        let foreign_embeds = dom::elements_by_tag(node, "embed")
            .iter()
            .filter(|embed| !patterns.video.is_match(&dom::attr(embed, "src")))
            .count();

        Self {
            paragraphs: dom::elements_by_tag(node, "p").len(),
            images: dom::elements_by_tag(node, "img").len(),
            list_items: dom::elements_by_tag(node, "li").len(),
            inputs: dom::elements_by_tag(node, "input").len(),
            foreign_embeds,
            text_length: text.chars().count(),
            link_density: link_density(node),
        }
    }
}

/// Whether a block with these stats and class weight looks like boilerplate.
fn looks_like_boilerplate(tag: &str, weight: i32, stats: &BlockStats) -> bool {
    let is_list = tag == "ul" || tag == "ol";

    stats.images > stats.paragraphs
        || (stats.list_items.saturating_sub(100) > stats.paragraphs && !is_list)
        || stats.inputs > stats.paragraphs / 3
        || (stats.text_length < 25 && (stats.images == 0 || stats.images > 2))
        || (weight < 25 && stats.link_density > 0.2)
        || (weight >= 25 && stats.link_density > 0.5)
        || (stats.foreign_embeds == 1 && stats.text_length < 75)
        || stats.foreign_embeds > 1
}

/// Remove `tag` elements below `node` that look like boilerplate.
///
/// Negative class weight always removes; otherwise only comma-poor blocks
/// are judged on their image, list, form, embed and link statistics.
pub fn clean_conditionally(node: &NodeRef, tag: &str, patterns: &Patterns) {
    let root = *node;
    for target in dom::elements_by_tag(node, tag) {
        if !dom::is_attached(&target, &root) {
            continue;
        }

        let weight = class_weight(&target, patterns);
        if weight < 0 {
            debug!(tag, class_and_id = %dom::class_and_id(&target), "removing negatively weighted block");
            dom::remove(&target);
            continue;
        }

        if dom::comma_count(&dom::inner_text(&target, true)) >= COMMA_KEEP_THRESHOLD {
            continue;
        }

        let stats = BlockStats::collect(&target, patterns);
        if looks_like_boilerplate(tag, weight, &stats) {
            debug!(tag, class_and_id = %dom::class_and_id(&target), ?stats, "removing boilerplate block");
            dom::remove(&target);
        }
    }
}

/// Drop `<p>`s with no text and no image, embed or object.
fn remove_empty_paragraphs(node: &NodeRef) {
    for paragraph in dom::elements_by_tag(node, "p") {
        let has_media = ["img", "embed", "object"]
            .iter()
            .any(|tag| !dom::elements_by_tag(&paragraph, tag).is_empty());
        if !has_media && dom::inner_text(&paragraph, false).is_empty() {
            dom::remove(&paragraph);
        }
    }
}
