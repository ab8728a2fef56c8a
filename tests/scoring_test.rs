//! Properties of the text-scoring passes, checked through the public modules.

use std::collections::HashSet;

use rs_readability_img::dom;
use rs_readability_img::extractor::{pruning, scoring};
use rs_readability_img::link_density::link_density;
use rs_readability_img::scores::ScoreChannel;
use rs_readability_img::Patterns;

const PAGE: &str = r#"<html><body>
<div id="nav"><a href="/">Home</a><a href="/world">World</a></div>
<div id="main">
  <div id="story">
    <p>First paragraph of the story, with a comma or two, and enough words to vote.</p>
    <p>Second paragraph of the story, again long enough, to vote for its parent.</p>
    <blockquote><p>A quoted paragraph inside a blockquote, still long enough to count.</p></blockquote>
  </div>
  <div id="links"><p><a href="/a">A link-only paragraph that is long enough to be scored anyway.</a></p></div>
  <div></div>
  <p>  </p>
</div>
</body></html>"#;

#[test]
fn candidates_are_unique_and_in_first_scored_order() {
    let doc = dom::parse(PAGE);
    let patterns = Patterns::shared();
    pruning::prune_and_normalize(&doc, patterns, false);
    let mut scores = ScoreChannel::default();

    let candidates = scoring::score_paragraphs(&doc, &mut scores, patterns);

    let ids: HashSet<_> = candidates.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), candidates.len());
    assert_eq!(dom::attr(&candidates[0], "id"), "story");
    assert_eq!(dom::attr(&candidates[1], "id"), "main");
}

#[test]
fn link_density_is_finite_and_non_negative_everywhere() {
    let doc = dom::parse(PAGE);
    let root = doc.root();

    for node in dom::descendant_elements(&root) {
        let density = link_density(&node);
        assert!(density.is_finite(), "NaN/inf on {:?}", dom::tag_name(&node));
        assert!(density >= 0.0);
    }
}

#[test]
fn scaling_only_ever_lowers_scores() {
    let doc = dom::parse(PAGE);
    let patterns = Patterns::shared();
    pruning::prune_and_normalize(&doc, patterns, false);
    let mut scores = ScoreChannel::default();
    let candidates = scoring::score_paragraphs(&doc, &mut scores, patterns);
    let before: Vec<i32> = candidates.iter().map(|c| scores.value(c.id)).collect();

    let top = scoring::select_top_candidate(&candidates, &mut scores, false);

    for (candidate, old) in candidates.iter().zip(before) {
        let new = scores.value(candidate.id);
        if old >= 0 {
            assert!(new <= old);
        } else {
            assert!(new >= old);
        }
    }
    assert_eq!(top.map(|t| dom::attr(&t, "id")), Some("story".to_string()));
}

#[test]
fn link_only_block_loses_its_score() {
    let doc = dom::parse(PAGE);
    let patterns = Patterns::shared();
    pruning::prune_and_normalize(&doc, patterns, false);
    let mut scores = ScoreChannel::default();
    let candidates = scoring::score_paragraphs(&doc, &mut scores, patterns);
    scoring::select_top_candidate(&candidates, &mut scores, false);

    let links = doc.select("#links");
    let links = links.nodes().first().copied().expect("links block");
    assert_eq!(scores.value(links.id), 0);
}

#[test]
fn pruning_respects_preserve_mode() {
    let html = r#"<body><div id="nav-menu"><p>x</p></div><div class="comments"><p>y</p></div></body>"#;

    let pruned = dom::parse(html);
    assert_eq!(pruning::prune_and_normalize(&pruned, Patterns::shared(), false), 2);

    let preserved = dom::parse(html);
    assert_eq!(pruning::prune_and_normalize(&preserved, Patterns::shared(), true), 0);
    assert!(preserved.select("#nav-menu").exists());
}
