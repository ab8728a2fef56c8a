//! DOM Operations Adapter
//!
//! Node-level operations over the `dom_query` arena. Scoring code works on
//! `NodeRef` handles whose `NodeId` stays stable for the whole extraction run,
//! which is what the score side-tables key on. Mutations go through
//! `Selection` so that removal, renaming and re-parsing behave the same way
//! everywhere.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// The `<body>` element, if the parser produced one.
#[must_use]
pub fn body<'a>(doc: &'a Document) -> Option<NodeRef<'a>> {
    doc.select("body").nodes().first().copied()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Whether the node is an element with the given tag name.
#[must_use]
pub fn has_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|t| t.eq_ignore_ascii_case(tag))
}

// === Attribute Operations ===

/// Attribute value, empty when absent.
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> String {
    node.attr(name).map(|v| v.to_string()).unwrap_or_default()
}

/// Class and id concatenated, the way the keyword heuristics read them.
#[must_use]
pub fn class_and_id(node: &NodeRef) -> String {
    let mut s = attr(node, "class");
    s.push_str(&attr(node, "id"));
    s
}

/// All attributes as sorted key-value pairs.
///
/// Returns empty vector if node has no attributes.
#[must_use]
pub fn sorted_attributes(node: &NodeRef) -> Vec<(String, String)> {
    let mut attrs: Vec<(String, String)> = node
        .attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect();
    attrs.sort();
    attrs
}

/// Same tag and identical attribute set: a redundant wrapper of the other.
#[must_use]
pub fn same_tag_and_attributes(a: &NodeRef, b: &NodeRef) -> bool {
    tag_name(a) == tag_name(b) && sorted_attributes(a) == sorted_attributes(b)
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(node: &NodeRef, name: &str) {
    Selection::from(*node).remove_attr(name);
}

// === Tree Navigation ===

/// Parent, only if it is an element (never the document node).
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Direct element children in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// Number of element siblings (the node itself excluded).
#[must_use]
pub fn element_sibling_count(node: &NodeRef) -> usize {
    parent_element(node).map_or(0, |p| element_children(&p).len().saturating_sub(1))
}

/// Descendant elements with the given tag, document order, never `node` itself.
#[must_use]
pub fn elements_by_tag<'a>(node: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(|n| has_tag(n, tag))
        .collect()
}

/// All descendant elements in document order.
#[must_use]
pub fn descendant_elements<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(NodeRef::is_element)
        .collect()
}

/// Whether `node` sits strictly below `ancestor`.
#[must_use]
pub fn is_descendant_of(node: &NodeRef, ancestor: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.id == ancestor.id {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Whether `node` is still reachable from the document root.
///
/// Removed subtrees stay in the arena; snapshot loops use this to skip them.
#[must_use]
pub fn is_attached(node: &NodeRef, root: &NodeRef) -> bool {
    node.id == root.id || is_descendant_of(node, root)
}

// === Text Content ===

/// Trimmed text of node and descendants.
///
/// With `normalize`, every whitespace run collapses to a single space.
#[must_use]
pub fn inner_text(node: &NodeRef, normalize: bool) -> String {
    let text: StrTendril = node.text();
    if normalize {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.trim().to_string()
    }
}

/// Length of the normalized inner text, in characters.
#[must_use]
pub fn text_length(node: &NodeRef) -> usize {
    inner_text(node, true).chars().count()
}

/// Commas in `text`, ASCII and full-width.
#[must_use]
pub fn comma_count(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, ',' | '，')).count()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> String {
    Selection::from(*node).inner_html().to_string()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    Selection::from(*node).html().to_string()
}

// === Tree Manipulation ===

/// Detach a node (and its subtree) from the tree.
#[inline]
pub fn remove(node: &NodeRef) {
    Selection::from(*node).remove();
}

/// Rename element tag
#[inline]
pub fn rename(node: &NodeRef, new_tag: &str) {
    Selection::from(*node).rename(new_tag);
}

/// Replace the node's children with parsed `html`.
#[inline]
pub fn set_inner_html(node: &NodeRef, html: &str) {
    Selection::from(*node).set_html(html);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(doc: &'a Document, sel: &str) -> NodeRef<'a> {
        match doc.select(sel).nodes().first() {
            Some(n) => *n,
            None => panic!("no element for {sel}"),
        }
    }

    #[test]
    fn test_tag_and_attributes() {
        let doc = parse(r#"<div id="main" class="container">content</div>"#);
        let div = first(&doc, "div");

        assert_eq!(tag_name(&div), Some("div".to_string()));
        assert!(has_tag(&div, "DIV"));
        assert_eq!(attr(&div, "id"), "main");
        assert_eq!(attr(&div, "data-missing"), "");
        assert_eq!(class_and_id(&div), "containermain");
    }

    #[test]
    fn test_same_tag_and_attributes_ignores_order() {
        let doc = parse(
            r#"<div class="a" id="x"><div id="x" class="a"><span class="a" id="x">t</span></div></div>"#,
        );
        let divs = doc.select("div");
        let outer = divs.nodes()[0];
        let inner = divs.nodes()[1];
        let span = first(&doc, "span");

        assert!(same_tag_and_attributes(&outer, &inner));
        assert!(!same_tag_and_attributes(&inner, &span));
    }

    #[test]
    fn test_elements_by_tag_excludes_self() {
        let doc = parse(r#"<div id="outer"><div><p>1</p></div><p>2</p></div>"#);
        let outer = first(&doc, "#outer");

        assert_eq!(elements_by_tag(&outer, "div").len(), 1);
        assert_eq!(elements_by_tag(&outer, "p").len(), 2);
    }

    #[test]
    fn test_sibling_count_and_parent() {
        let doc = parse(r#"<ul><li id="a">1</li><li>2</li><li>3</li></ul>"#);
        let li = first(&doc, "#a");

        assert_eq!(element_sibling_count(&li), 2);
        assert!(parent_element(&li).is_some_and(|p| has_tag(&p, "ul")));
    }

    #[test]
    fn test_descendant_and_attached() {
        let doc = parse(r#"<div id="a"><section><p id="p">x</p></section></div>"#);
        let a = first(&doc, "#a");
        let p = first(&doc, "#p");
        let root = doc.root();

        assert!(is_descendant_of(&p, &a));
        assert!(!is_descendant_of(&a, &p));
        assert!(is_attached(&p, &root));

        remove(&a);
        assert!(!is_attached(&p, &root));
    }

    #[test]
    fn test_inner_text_normalization() {
        let doc = parse("<p>  one \n\n  two   three </p>");
        let p = first(&doc, "p");

        assert_eq!(inner_text(&p, true), "one two three");
        assert_eq!(text_length(&p), 13);
    }

    #[test]
    fn test_comma_count() {
        assert_eq!(comma_count("a, b, c"), 2);
        assert_eq!(comma_count("甲，乙，丙, 丁"), 3);
        assert_eq!(comma_count(""), 0);
    }

    #[test]
    fn test_rename_and_set_html() {
        let doc = parse(r#"<div id="test">content</div>"#);
        let div = first(&doc, "#test");

        rename(&div, "p");
        assert!(doc.select("p#test").exists());

        let p = first(&doc, "#test");
        set_inner_html(&p, "<b>bold</b>");
        assert!(inner_html(&p).contains("<b>bold</b>"));
        assert!(outer_html(&p).starts_with("<p"));
    }

    #[test]
    fn test_remove_attribute() {
        let doc = parse(r#"<p style="color:red" class="x">t</p>"#);
        let p = first(&doc, "p");

        remove_attribute(&p, "style");
        assert_eq!(attr(&p, "style"), "");
        assert_eq!(attr(&p, "class"), "x");
    }
}
