//! Sibling inclusion around the top candidate.
//!
//! Articles are often split across several siblings (lead paragraph, body,
//! a trailing note). Siblings that score well enough, or that read like
//! prose, join the top candidate in the article container.

use dom_query::NodeRef;
use tracing::debug;

use crate::dom;
use crate::link_density::link_density;
use crate::patterns::Patterns;
use crate::scores::ScoreChannel;

/// Id of the element wrapping the extracted article.
pub const CONTAINER_ID: &str = "readability-content";

/// Minimum score a sibling needs, relative to the top candidate's.
#[must_use]
pub fn sibling_threshold(top_score: i32) -> i32 {
    10.max((f64::from(top_score) * 0.2) as i32)
}

/// Whether `sibling` of `top` belongs in the article.
#[must_use]
pub fn is_included(
    sibling: &NodeRef,
    top: &NodeRef,
    scores: &ScoreChannel,
    patterns: &Patterns,
) -> bool {
    if sibling.id == top.id {
        return true;
    }
    if scores.value(sibling.id) >= sibling_threshold(scores.value(top.id)) {
        return true;
    }
    if !dom::has_tag(sibling, "p") {
        return false;
    }

    let density = link_density(sibling);
    let text = dom::inner_text(sibling, true);
    let length = text.chars().count();

    if length > 80 && density < 0.25 {
        return true;
    }
    length < 80 && density == 0.0 && patterns.sentence_end.is_match(&text)
}

/// Move the included siblings of `top` into a fresh article container.
///
/// The container is a detached `<div id="readability-content">` in the same
/// tree as `top`; the siblings keep their order and leave their old parent.
#[must_use]
pub fn build_container<'a>(
    top: &NodeRef<'a>,
    scores: &ScoreChannel,
    patterns: &Patterns,
) -> NodeRef<'a> {
    let container = top.tree.new_element("div");
    container.set_attr("id", CONTAINER_ID);

    let siblings = match top.parent() {
        Some(parent) => dom::element_children(&parent),
        None => vec![*top],
    };

    for sibling in siblings {
        if is_included(&sibling, top, scores, patterns) {
            debug!(
                tag = %dom::tag_name(&sibling).unwrap_or_default(),
                class_and_id = %dom::class_and_id(&sibling),
                score = scores.value(sibling.id),
                "appending sibling"
            );
            container.append_child(&sibling);
        }
    }

    container
}
