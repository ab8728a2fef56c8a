//! Candidate pruning and paragraph normalization.
//!
//! Removes nodes whose class/id reads like boilerplate (comments, menus,
//! sidebars) and retags `div`s that hold no block content as `p`, so the
//! scoring pass sees them as paragraphs.

use dom_query::{Document, NodeRef};
use tracing::debug;

use crate::dom;
use crate::patterns::Patterns;

/// Descendants that make a `div` more than a paragraph.
const BLOCK_TAGS: [&str; 10] = [
    "a", "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul",
];

/// Whether class+id marks `node` as boilerplate that is safe to drop.
#[must_use]
pub fn is_unlikely_candidate(node: &NodeRef, patterns: &Patterns) -> bool {
    if dom::has_tag(node, "body") {
        return false;
    }
    let class_and_id = dom::class_and_id(node);
    patterns.unlikely_candidates.is_match(&class_and_id)
        && !patterns.maybe_candidate.is_match(&class_and_id)
}

/// A `div` whose descendants include no block-level element.
#[must_use]
pub fn is_paragraph_div(node: &NodeRef) -> bool {
    dom::has_tag(node, "div")
        && !dom::descendant_elements(node).iter().any(|d| {
            dom::tag_name(d).is_some_and(|t| BLOCK_TAGS.contains(&t.as_str()))
        })
}

/// Prune unlikely candidates (unless `preserve_unlikely`) and retag
/// paragraph-like `div`s. Returns the number of removed nodes.
pub fn prune_and_normalize(doc: &Document, patterns: &Patterns, preserve_unlikely: bool) -> usize {
    let root = doc.root();
    let snapshot = dom::descendant_elements(&root);
    let mut removed = 0;

    for node in &snapshot {
        if !dom::is_attached(node, &root) {
            continue;
        }

        if !preserve_unlikely && is_unlikely_candidate(node, patterns) {
            debug!(class_and_id = %dom::class_and_id(node), "removing unlikely candidate");
            dom::remove(node);
            removed += 1;
            continue;
        }

        if is_paragraph_div(node) {
            dom::rename(node, "p");
        }
    }

    removed
}
