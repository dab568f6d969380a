//! Content nodes
//!
//! Prompts, messages and advice are authored as loosely written HTML. Before
//! they go into the document, stray ampersands are escaped, `&nbsp;` (not a
//! predefined XML entity) becomes `&#160;`, and the text is wrapped as
//! `<content><span>...</span></content>` and read as markup.
//!
//! Reading goes through `roxmltree`, which rejects mismatched tags, unknown
//! entities and junk after the root, and applies XML's line-ending and
//! attribute-value normalization. The parsed nodes are copied into the
//! [`Element`] text and tail slots.

use super::Element;
use crate::exam::error::{ExamError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// What may follow `&` in an entity reference that is already well formed.
static ENTITY_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?\w+;").unwrap());

/// Escape every `&` that does not already start an entity reference.
pub fn escape_ampersands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (index, _) in text.match_indices('&') {
        out.push_str(&text[last..index]);
        if ENTITY_BODY.is_match(&text[index + 1..]) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        last = index + 1;
    }
    out.push_str(&text[last..]);
    out
}

/// Build the `<content>` node for a text field.
pub fn content_node(text: &str) -> Result<Element> {
    let escaped = escape_ampersands(text).replace("&nbsp;", "&#160;");
    parse_fragment(&format!("<content><span>{escaped}</span></content>"))
}

/// Read a fragment that is expected to be well formed.
///
/// A failure is logged with the offending text before it is returned.
pub fn parse_fragment(text: &str) -> Result<Element> {
    read_element(text).map_err(|err| {
        tracing::error!(text = %text, "{}", err);
        ExamError::MalformedContent {
            text: text.to_string(),
            message: err.to_string(),
        }
    })
}

/// Parse a whole markup document into an element tree.
///
/// Comments and processing instructions are dropped. Text on either side of
/// a dropped node is joined, and CDATA reads as plain text.
pub fn read_element(text: &str) -> std::result::Result<Element, roxmltree::Error> {
    let document = roxmltree::Document::parse(text)?;
    Ok(convert(document.root_element()))
}

fn convert(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::with_attributes(
        node.tag_name().name(),
        node.attributes().map(|attr| (attr.name(), attr.value())),
    );
    for child in node.children() {
        if child.is_element() {
            element.append(convert(child));
        } else if let (true, Some(text)) = (child.is_text(), child.text()) {
            let slot = match element.children.last_mut() {
                Some(last) => &mut last.tail,
                None => &mut element.text,
            };
            slot.get_or_insert_with(String::new).push_str(text);
        }
    }
    element
}
