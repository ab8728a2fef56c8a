//! Paragraph scoring and top-candidate selection.
//!
//! Every substantial paragraph votes for its parent (full increment) and its
//! grandparent (half). Candidates are then discounted by link density and the
//! highest scorer becomes the article body.

use dom_query::{Document, NodeRef};
use tracing::debug;

use crate::dom;
use crate::link_density::link_density;
use crate::patterns::Patterns;
use crate::scores::ScoreChannel;

/// Paragraphs shorter than this (normalized characters) cast no vote.
pub const MIN_PARAGRAPH_LENGTH: usize = 25;

/// Base content weight of a tag.
#[must_use]
pub fn tag_weight(node: &NodeRef) -> i32 {
    match dom::tag_name(node).as_deref() {
        Some("div") => 5,
        Some("pre" | "td" | "blockquote") => 3,
        Some("address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form") => -3,
        Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "noscript") => -5,
        _ => 0,
    }
}

/// ±25 for positive/negative keywords, checked on class and id separately.
#[must_use]
pub fn class_weight(node: &NodeRef, patterns: &Patterns) -> i32 {
    [dom::attr(node, "class"), dom::attr(node, "id")]
        .iter()
        .filter(|value| !value.is_empty())
        .map(|value| {
            let mut weight = 0;
            if patterns.negative.is_match(value) {
                weight -= 25;
            }
            if patterns.positive.is_match(value) {
                weight += 25;
            }
            weight
        })
        .sum()
}

/// Initialize `node` from its tag and class/id weights. No-op once scored.
pub fn initialize_node(node: &NodeRef, scores: &mut ScoreChannel, patterns: &Patterns) -> bool {
    scores.init(node.id, tag_weight(node) + class_weight(node, patterns))
}

/// The vote a paragraph with this text casts.
#[must_use]
pub fn paragraph_increment(text: &str) -> i32 {
    let length = text.chars().count();
    let commas = dom::comma_count(text);
    1 + commas as i32 + (length / 100).min(3) as i32
}

/// Score every qualifying `<p>` into its parent and grandparent.
///
/// Returns the candidates in first-scored order; a node never appears twice.
pub fn score_paragraphs<'a>(
    doc: &'a Document,
    scores: &mut ScoreChannel,
    patterns: &Patterns,
) -> Vec<NodeRef<'a>> {
    let mut candidates = Vec::new();

    for paragraph in doc.select("p").nodes() {
        let Some(parent) = dom::parent_element(paragraph) else {
            continue;
        };
        let text = dom::inner_text(paragraph, true);
        if text.chars().count() < MIN_PARAGRAPH_LENGTH {
            continue;
        }

        let grandparent = dom::parent_element(&parent);

        if initialize_node(&parent, scores, patterns) {
            candidates.push(parent);
        }
        if let Some(gp) = grandparent {
            if initialize_node(&gp, scores, patterns) {
                candidates.push(gp);
            }
        }

        let increment = paragraph_increment(&text);
        scores.add(parent.id, increment);
        if let Some(gp) = grandparent {
            scores.add(gp.id, increment / 2);
        }
    }

    candidates
}

/// Scale each candidate by `1 - link density` and return the best one.
///
/// Ties keep the earlier candidate.
pub fn select_top_candidate<'a>(
    candidates: &[NodeRef<'a>],
    scores: &mut ScoreChannel,
    trace: bool,
) -> Option<NodeRef<'a>> {
    let mut top: Option<NodeRef<'a>> = None;

    for candidate in candidates {
        scores.scale(candidate.id, 1.0 - link_density(candidate));
        let score = scores.value(candidate.id);
        if trace {
            debug!(
                tag = %dom::tag_name(candidate).unwrap_or_default(),
                class_and_id = %dom::class_and_id(candidate),
                score,
                "content candidate"
            );
        }
        if top.is_none_or(|t| score > scores.value(t.id)) {
            top = Some(*candidate);
        }
    }

    top
}
