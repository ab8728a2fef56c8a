//! Result types for extraction output.
//!
//! This module defines the structured output of one extraction run: the
//! article container, its text, and the illustrative images.

use serde::Serialize;

/// Result of content extraction from an HTML document.
///
/// Contains the extracted article in both HTML and text form, along with
/// the images judged to illustrate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractResult {
    /// The article container, `<div id="readability-content">…</div>`.
    pub content_html: String,

    /// Main content as plain text, whitespace-normalized.
    pub content_text: String,

    /// Illustrative image URLs in document order.
    ///
    /// Absolute when a page URL was supplied, otherwise as written in the page.
    pub images: Vec<String>,

    /// Article title from `<title>`/`<h1>` agreement.
    pub title: Option<String>,

    /// Score of the element chosen as the article body, after link-density
    /// scaling. `None` when no candidate was found.
    pub top_candidate_score: Option<i32>,

    /// Set when no text could be extracted and the placeholder paragraph
    /// was emitted instead.
    pub degraded: bool,

    /// Warnings encountered during extraction.
    ///
    /// Advisory only, such as:
    /// - The best image lies outside the article body
    /// - No content found, placeholder emitted
    pub warnings: Vec<String>,
}

impl ExtractResult {
    /// Whether any article text was found.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.degraded && !self.content_text.is_empty()
    }
}
