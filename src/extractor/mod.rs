//! Article body extraction.
//!
//! The text engine runs in four passes over one parsed document, one module
//! per pass.
//!
//! # Module Structure
//!
//! - `pruning`: unlikely-candidate removal and `div` to `p` retagging
//! - `scoring`: paragraph votes, class/tag weights, top-candidate selection
//! - `siblings`: sibling inclusion into the article container
//! - `cleanup`: style, embed, header and conditional cleaning of the container
//!
//! # Usage
//!
//! ```rust,ignore
//! use rs_readability_img::extractor::{cleanup, pruning, scoring, siblings};
//!
//! pruning::prune_and_normalize(&doc, patterns, false);
//! let candidates = scoring::score_paragraphs(&doc, &mut scores.content, patterns);
//! if let Some(top) = scoring::select_top_candidate(&candidates, &mut scores.content, false) {
//!     let article = siblings::build_container(&top, &scores.content, patterns);
//!     cleanup::prep_article(&article, patterns);
//! }
//! ```

pub mod cleanup;
pub mod pruning;
pub mod scoring;
pub mod siblings;

pub use cleanup::prep_article;
pub use pruning::prune_and_normalize;
pub use scoring::{score_paragraphs, select_top_candidate};
pub use siblings::{build_container, CONTAINER_ID};
