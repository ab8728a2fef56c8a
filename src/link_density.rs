//! Link Density
//!
//! The share of a node's visible text that sits inside `<a>` elements. Used to
//! scale candidate scores, to admit short sibling paragraphs, and to drop
//! link-heavy headings and containers during cleanup.

use dom_query::NodeRef;

use crate::dom;

/// Collect the total trimmed text length of the links below `element`.
fn collect_link_length(element: &NodeRef) -> usize {
    dom::elements_by_tag(element, "a")
        .iter()
        .map(dom::text_length)
        .sum()
}

/// Link text length divided by the element's text length.
///
/// An element without text has density 0.0: never NaN and never negative.
/// The value can exceed 1.0 when nested anchors count the same text twice.
#[must_use]
pub fn link_density(element: &NodeRef) -> f64 {
    let text_length = dom::text_length(element);
    if text_length == 0 {
        return 0.0;
    }
    collect_link_length(element) as f64 / text_length as f64
}
