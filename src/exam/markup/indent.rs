//! Pretty-printer
//!
//! Only blank `text` and `tail` slots are rewritten. Anything with
//! non-whitespace content is left exactly as it was, so indentation can
//! never change what the player reads out of an inline content node.

use super::Element;

/// Indent with tabs, starting at the root.
pub fn indent(element: &mut Element) {
    indent_with(element, 0, "\t");
}

/// Indent `element`, which sits at nesting depth `level`, one `unit` per level.
pub fn indent_with(element: &mut Element, level: usize, unit: &str) {
    let newline = format!("\n{}", unit.repeat(level));
    if !element.children.is_empty() {
        if is_blank(&element.text) {
            element.text = Some(format!("{newline}{unit}"));
        }
        if is_blank(&element.tail) {
            element.tail = Some(newline.clone());
        }
        for child in &mut element.children {
            indent_with(child, level + 1, unit);
        }
        if let Some(last) = element.children.last_mut() {
            if is_blank(&last.tail) {
                last.tail = Some(newline);
            }
        }
    } else if level > 0 && is_blank(&element.tail) {
        element.tail = Some(newline);
    }
}

fn is_blank(slot: &Option<String>) -> bool {
    slot.as_deref().map_or(true, |text| text.trim().is_empty())
}
