//! Attribute value conventions of the player format

use std::fmt::Display;

/// Booleans are written capitalised.
pub fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

pub fn percent(value: impl Display) -> String {
    format!("{value}%")
}

/// Shuffle flags become an `order` attribute.
pub fn order(shuffled: bool) -> &'static str {
    if shuffled {
        "random"
    } else {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::value::Number;

    #[test]
    fn test_formats() {
        assert_eq!(flag(true), "True");
        assert_eq!(flag(false), "False");
        assert_eq!(percent(Number::Int(40)), "40%");
        assert_eq!(percent(Number::Float(12.5)), "12.5%");
        assert_eq!(order(true), "random");
        assert_eq!(order(false), "fixed");
    }
}
