//! Skeleton builder
//!
//! Writers describe the fixed shape of their output as a nested literal and
//! fill in attributes afterwards. Nodes that need content are built first
//! and dropped into the skeleton as they are.
//!
//! ```ignore
//! let root = skeleton!(["exam",
//!     ["settings", (navigation), "timing"],
//!     "questions",
//! ]).build();
//! ```

use super::Element;

#[derive(Debug, Clone, PartialEq)]
pub enum Skeleton {
    /// An empty element.
    Leaf(String),
    /// An element with the given children, in order.
    Node { tag: String, children: Vec<Skeleton> },
    /// An element that was built elsewhere; passed through unchanged.
    Built(Element),
}

impl Skeleton {
    pub fn build(self) -> Element {
        match self {
            Skeleton::Leaf(tag) => Element::new(tag),
            Skeleton::Node { tag, children } => {
                let mut element = Element::new(tag);
                element.extend(children.into_iter().map(Skeleton::build));
                element
            }
            Skeleton::Built(element) => element,
        }
    }
}

impl From<&str> for Skeleton {
    fn from(tag: &str) -> Self {
        Skeleton::Leaf(tag.to_string())
    }
}

impl From<Element> for Skeleton {
    fn from(element: Element) -> Self {
        Skeleton::Built(element)
    }
}

/// Nested literal form of [`Skeleton`]: `[tag, child...]` for a node, a bare
/// tag expression for a leaf, and `(element)` for an already built node.
#[macro_export]
macro_rules! skeleton {
    ([$tag:expr $(, $child:tt)* $(,)?]) => {
        $crate::exam::markup::Skeleton::Node {
            tag: ($tag).to_string(),
            children: vec![$($crate::skeleton!($child)),*],
        }
    };
    (($element:expr)) => {
        $crate::exam::markup::Skeleton::Built($element)
    };
    ($tag:expr) => {
        $crate::exam::markup::Skeleton::Leaf(($tag).to_string())
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton;

    #[test]
    fn test_nested_structure() {
        let root = skeleton!(["exam", ["settings", "navigation", "timing"], "questions"]).build();
        assert_eq!(root.tag, "exam");
        let tags: Vec<_> = root.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["settings", "questions"]);
        let settings = &root.children[0];
        let tags: Vec<_> = settings.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["navigation", "timing"]);
        assert!(root.attributes.is_empty());
    }

    #[test]
    fn test_prebuilt_nodes_pass_through() {
        let advice = Element::with_attributes("advice", [("type", "onreveal")]);
        let feedback = skeleton!(["feedback", (advice.clone())]).build();
        assert_eq!(feedback.children, vec![advice]);
    }

    #[test]
    fn test_single_leaf() {
        assert_eq!(skeleton!("notes").build(), Element::new("notes"));
        let name = String::from("maxlength");
        let restriction = skeleton!([name.as_str(), "message"]).build();
        assert_eq!(restriction.tag, "maxlength");
        assert_eq!(restriction.children[0].tag, "message");
    }
}
