//! Illustrative image extraction.
//!
//! Runs on the scored tree right after the article body has been chosen.
//! Every eligible `<img>` collects its own score plus its ancestors' image
//! scores; the best ones are kept when they are strong enough and close to
//! the article body.
//!
//! # Module Structure
//!
//! - `scoring`: ancestor chains, ancestor and image-tag scores

pub mod scoring;

use dom_query::{Document, NodeRef};
use tracing::{debug, warn};

use crate::dom;
use crate::scores::ScoreTable;

pub use scoring::ImageContext;
use scoring::{
    ancestor_score, image_source, image_tag_score, is_eligible, scoring_chain, structural_chain,
    AncestorChain,
};

/// Images scoring at least this much may pull in scores from higher up.
const CLIMB_THRESHOLD: i32 = 30;

/// Thresholds for picking images.
#[derive(Debug, Clone, Copy)]
pub struct ImageThresholds {
    /// The best image needs at least this score to be considered.
    pub min_score: i32,
    /// The best image must exceed this for anything to be emitted.
    pub emit_threshold: i32,
}

impl Default for ImageThresholds {
    fn default() -> Self {
        Self {
            min_score: 30,
            emit_threshold: 50,
        }
    }
}

/// Outcome of image extraction on one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelection {
    /// Resolved image URLs in document order.
    pub urls: Vec<String>,
    /// Score of the best image, after the co-depth adjustment.
    pub top_score: Option<i32>,
    pub warnings: Vec<String>,
}

/// The node whose subtree is treated as the article for image purposes,
/// and the text score that bounds how far below the best image others may fall.
fn text_anchor<'a>(body: Option<NodeRef<'a>>, scores: &ScoreTable) -> (Option<NodeRef<'a>>, i32) {
    let Some(mut text) = body else {
        return (None, 1000);
    };
    let score = scores.content.value(text.id);
    if score > 50 {
        if let Some(parent) = dom::parent_element(&text) {
            if f64::from(scores.content.value(parent.id)) > 0.7 * f64::from(score) {
                text = parent;
            }
        }
    }
    (Some(text), scores.content.value(text.id))
}

/// Score one image: own score plus parent, grandparent and half the
/// great-grandparent. Returns `false` when the image has no grandparent.
fn score_image(image: &NodeRef, scores: &mut ScoreTable, ctx: &ImageContext) -> bool {
    if !scores.image.is_scored(image.id) {
        scores.image.init(image.id, image_tag_score(image, ctx));
    }
    let Some(chain) = scoring_chain(image) else {
        return false;
    };
    let patterns = ctx.patterns;

    let parent = ancestor_score(&chain.parent, scores, patterns);
    let grandparent = ancestor_score(&chain.grandparent, scores, patterns);
    let great_grandparent = chain
        .great_grandparent
        .map_or(0, |ggp| ancestor_score(&ggp, scores, patterns));
    scores
        .image
        .add(image.id, parent + grandparent + great_grandparent / 2);

    if scores.image.value(image.id) >= CLIMB_THRESHOLD {
        climb_higher(image, &chain, scores);
    }
    true
}

/// Long chains of single-child wrappers hide the article container. When
/// neither grandparent nor great-grandparent holds text and neither has
/// siblings, borrow half the image score of the first text-bearing element
/// one or two levels further up. An element no image chain has scored lends
/// nothing.
fn climb_higher(image: &NodeRef, chain: &AncestorChain, scores: &mut ScoreTable) {
    let Some(ggp) = chain.great_grandparent else {
        return;
    };
    let no_text_nearby =
        scores.content.value(ggp.id) + scores.content.value(chain.grandparent.id) == 0;
    let isolated =
        dom::element_sibling_count(&chain.grandparent) + dom::element_sibling_count(&ggp) < 1;
    if !no_text_nearby || !isolated {
        return;
    }

    let Some(above) = dom::parent_element(&ggp) else {
        return;
    };
    let target = if scores.content.value(above.id) > 0 {
        Some(above)
    } else {
        dom::parent_element(&above).filter(|higher| scores.content.value(higher.id) > 0)
    };
    if let Some(target) = target {
        let borrowed = scores.image.value(target.id);
        if borrowed > 0 {
            scores.image.add(image.id, borrowed / 2);
        }
    }
}

/// Reward images that sit at the same depth as the best one under a shared
/// great-grandparent. Returns how many images were rewarded.
fn co_depth_bonus(top: &NodeRef, scores: &mut ScoreTable) -> usize {
    let Some(chain) = structural_chain(top) else {
        return 0;
    };
    let Some(ggp) = chain.great_grandparent else {
        return 0;
    };

    let mut rewarded = 0;
    for image in dom::elements_by_tag(&ggp, "img") {
        let up2 = image.parent().and_then(|p| p.parent());
        let up3 = up2.and_then(|gp| gp.parent());
        if up3.is_some_and(|n| n.id == ggp.id) {
            scores.image.add(image.id, 5);
            rewarded += 1;
            if up2.is_some_and(|n| n.id == chain.grandparent.id) {
                scores.image.add(image.id, 10);
            }
        }
    }
    rewarded
}

/// Whether an image with `score` is emitted alongside the best one.
#[must_use]
pub fn is_emitted(score: i32, top_score: i32, text_score: i32) -> bool {
    let (score, top) = (f64::from(score), f64::from(top_score));
    if top_score < 100 {
        score > 0.75 * top && top - score <= 20.0
    } else {
        score > top - f64::from(text_score / 3).min(0.2 * top)
    }
}

/// Score the images of `doc` and pick the illustrative ones.
///
/// `body` is the chosen article body, if any; its content scores must already
/// be in `scores`.
pub fn extract_images(
    doc: &Document,
    body: Option<NodeRef>,
    scores: &mut ScoreTable,
    ctx: &ImageContext,
    thresholds: ImageThresholds,
) -> ImageSelection {
    let mut selection = ImageSelection::default();
    let (text, text_score) = text_anchor(body, scores);

    let candidates: Vec<NodeRef> = doc
        .select("img")
        .nodes()
        .iter()
        .filter(|img| is_eligible(img))
        .copied()
        .collect();

    for image in &candidates {
        if !score_image(image, scores, ctx) {
            debug!("image too close to the root, scored on its own attributes");
        }
    }

    let mut top: Option<NodeRef> = None;
    for image in &candidates {
        let score = scores.image.value(image.id);
        if top.is_none_or(|t| score > scores.image.value(t.id)) {
            top = Some(*image);
        }
    }
    let Some(top) = top else {
        return selection;
    };

    let top_score = scores.image.value(top.id);
    debug!(src = ?image_source(&top, ctx.base_url), score = top_score, "top image");
    if top_score < thresholds.min_score {
        return selection;
    }

    match text {
        Some(text) if dom::is_descendant_of(&top, &text) => {
            if co_depth_bonus(&top, scores) == 1 {
                scores.image.add(top.id, -15);
            }
        }
        Some(text) => {
            let message = format!(
                "best image lies outside the article body ({})",
                dom::class_and_id(&text)
            );
            warn!("{message}");
            selection.warnings.push(message);
        }
        None => {}
    }

    let top_score = scores.image.value(top.id);
    selection.top_score = Some(top_score);
    if top_score <= thresholds.emit_threshold {
        return selection;
    }

    for image in &candidates {
        let score = scores.image.value(image.id);
        if is_emitted(score, top_score, text_score) {
            if let Some(src) = image_source(image, ctx.base_url) {
                debug!(%src, score, "emitting image");
                selection.urls.push(src);
            }
        }
    }

    selection
}
