//! Document preparation before scoring.
//!
//! Strips scripts and stylesheets, turns runs of `<br>` into paragraph
//! breaks and `<font>` into `<span>`. The break rewrite is best-effort: when
//! the rewritten body would lose all of its text, the original markup stays.

use std::borrow::Cow;

use dom_query::{Document, NodeRef};
use tracing::debug;

use crate::dom;
use crate::patterns::Patterns;

/// Clean `doc` in place.
pub fn prepare(doc: &Document, patterns: &Patterns) {
    doc.select("script").remove();
    doc.select("style").remove();

    for link in doc.select("head link").nodes() {
        if dom::attr(link, "rel").eq_ignore_ascii_case("stylesheet") {
            dom::remove(link);
        }
    }

    let Some(body) = dom::body(doc) else {
        return;
    };

    let html = dom::inner_html(&body);
    let rewritten = rewrite_breaks(&html, patterns);
    if rewritten.as_ref() == html.as_str() {
        return;
    }

    let original_text = dom::text_length(&body);
    dom::set_inner_html(&body, &rewritten);
    if original_text > 0 && dom::text_length(&body) == 0 {
        debug!("break rewrite emptied the body, keeping original markup");
        dom::set_inner_html(&body, &html);
        return;
    }
    drop_stray_paragraphs(&body);
}

/// A `</p>` with no open paragraph parses as an empty `<p></p>`.
fn drop_stray_paragraphs(body: &NodeRef) {
    for paragraph in dom::elements_by_tag(body, "p") {
        if paragraph.first_child().is_none() {
            dom::remove(&paragraph);
        }
    }
}

/// `<br><br>` runs become paragraph boundaries, `<font>` becomes `<span>`.
fn rewrite_breaks<'a>(html: &'a str, patterns: &Patterns) -> Cow<'a, str> {
    let paragraphs = patterns.br_runs.replace_all(html, "</p><p>");
    if !patterns.font_tags.is_match(&paragraphs) {
        return paragraphs;
    }
    Cow::Owned(
        patterns
            .font_tags
            .replace_all(&paragraphs, "<${1}span>")
            .into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(html: &str) -> Document {
        let doc = dom::parse(html);
        prepare(&doc, Patterns::shared());
        doc
    }

    #[test]
    fn scripts_styles_and_stylesheets_are_removed() {
        let doc = prepared(
            r#"<html><head><link rel="Stylesheet" href="a.css"><link rel="icon" href="f.ico"><style>p{}</style></head>
            <body><script>var x = 1;</script><p>Body text</p></body></html>"#,
        );

        assert!(!doc.select("script").exists());
        assert!(!doc.select("style").exists());
        assert_eq!(doc.select("link").length(), 1);
        assert!(doc.select("p").text().contains("Body text"));
    }

    #[test]
    fn double_breaks_become_paragraphs() {
        let doc = prepared("<body><div>first part<br><br>second part<br/> <br />third</div></body>");

        let paragraphs: Vec<String> = doc
            .select("div p")
            .nodes()
            .iter()
            .map(|p| dom::inner_text(p, true))
            .collect();
        assert!(paragraphs.contains(&"second part".to_string()));
        assert!(paragraphs.contains(&"third".to_string()));
    }

    #[test]
    fn leading_break_run_opens_a_paragraph() {
        let doc = prepared("<html><body><br><br>text</body></html>");

        assert_eq!(doc.select("body p").length(), 1);
        assert_eq!(doc.select("body > p").text().to_string(), "text");
        assert!(!doc.select("br").exists());
    }

    #[test]
    fn single_break_is_kept() {
        let doc = prepared("<body><p>line one<br>line two</p></body>");

        assert_eq!(doc.select("br").length(), 1);
        assert_eq!(doc.select("p").length(), 1);
    }

    #[test]
    fn font_becomes_span() {
        let doc = prepared(r#"<body><p><font color="red">warm</font> words</p></body>"#);

        assert!(!doc.select("font").exists());
        assert_eq!(doc.select("span").text().to_string(), "warm");
    }

    #[test]
    fn rewrite_leaves_plain_markup_borrowed() {
        let html = "<p>nothing to do</p>";
        assert!(matches!(
            rewrite_breaks(html, Patterns::shared()),
            Cow::Borrowed(_)
        ));
    }
}
