//! Article title from `<title>` and `<h1>`.
//!
//! Site titles usually decorate the headline ("Headline - Site Name"), while
//! pages often carry several `<h1>`s (logo, section name, headline). The
//! headline is the longest `<h1>` that agrees with the `<title>`.

use dom_query::Document;
use tracing::debug;

use crate::dom;

/// Pick the article title, `None` when `<title>` and `<h1>` disagree or are missing.
#[must_use]
pub fn article_title(doc: &Document) -> Option<String> {
    let title = doc
        .select("title")
        .nodes()
        .first()
        .map(|t| dom::inner_text(t, false));

    let mut headings: Vec<String> = doc
        .select("h1")
        .nodes()
        .iter()
        .map(|h| dom::inner_text(h, false))
        .collect();

    match (title, headings.is_empty()) {
        (Some(title), true) => Some(title).filter(|t| !t.is_empty()),
        (Some(title), false) => {
            // Longest first; equal lengths keep document order.
            headings.sort_by_key(|h| std::cmp::Reverse(h.chars().count()));
            let found = headings
                .into_iter()
                .filter(|h| !h.is_empty())
                .find(|h| matches_title(h, &title));
            if found.is_none() {
                debug!(title = %title, "no <h1> agrees with <title>");
            }
            found
        }
        (None, _) => None,
    }
}

/// `heading` equals the title, equals it minus one trailing character, or contains it.
fn matches_title(heading: &str, title: &str) -> bool {
    if heading == title || heading.contains(title) {
        return true;
    }
    let mut chars = title.chars();
    chars.next_back();
    !heading.is_empty() && chars.as_str() == heading
}
