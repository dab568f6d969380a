//! Element tree node and its serialization
//!
//! Text placement follows the ElementTree convention: `text` is what comes
//! between the start tag and the first child, `tail` is what follows the
//! element's end tag inside its parent.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Sorted by name, which is also the order they are written in.
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attributes<K, V>(
        tag: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut element = Element::new(tag);
        for (name, value) in attributes {
            element.set(name, value);
        }
        element
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = Element>) {
        self.children.extend(children);
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All direct children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Concatenated text of this element and all its descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(self.text.as_deref().unwrap_or_default());
        for child in &self.children {
            child.collect_text(out);
            out.push_str(child.tail.as_deref().unwrap_or_default());
        }
    }

    /// Serialize the element, its descendants and its own tail.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }

        let text = self.text.as_deref().unwrap_or_default();
        if text.is_empty() && self.children.is_empty() {
            out.push_str(" />");
        } else {
            out.push('>');
            out.push_str(&escape_text(text));
            for child in &self.children {
                child.write_to(out);
            }
            out.push_str("</");
            out.push_str(&self.tag);
            out.push('>');
        }

        if let Some(tail) = &self.tail {
            out.push_str(&escape_text(tail));
        }
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#09;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element_is_self_closing() {
        assert_eq!(Element::new("notes").to_xml_string(), "<notes />");
        assert_eq!(Element::new("notes").with_text("").to_xml_string(), "<notes />");
    }

    #[test]
    fn test_attributes_are_sorted() {
        let element =
            Element::with_attributes("range", [("start", "0"), ("end", "1"), ("points", "5")]);
        assert_eq!(
            element.to_xml_string(),
            r#"<range end="1" points="5" start="0" />"#
        );
    }

    #[test]
    fn test_text_and_tail_placement() {
        let mut span = Element::new("span").with_text("a ");
        let mut b = Element::new("b").with_text("bold");
        b.tail = Some(" c".to_string());
        span.append(b);
        assert_eq!(span.to_xml_string(), "<span>a <b>bold</b> c</span>");
        assert_eq!(span.text_content(), "a bold c");
    }

    #[test]
    fn test_escaping() {
        let element = Element::with_attributes("math", [("note", "say \"x<1\"\nplease")])
            .with_text("x < 1 & y > 2");
        assert_eq!(
            element.to_xml_string(),
            "<math note=\"say &quot;x&lt;1&quot;&#10;please\">x &lt; 1 &amp; y &gt; 2</math>"
        );
    }

    #[test]
    fn test_child_lookup() {
        let mut root = Element::new("marking");
        root.append(Element::new("matrix"));
        root.append(Element::new("mark"));
        root.append(Element::new("mark"));
        assert!(root.child("matrix").is_some());
        assert!(root.child("distractors").is_none());
        assert_eq!(root.children_named("mark").count(), 2);
    }
}
