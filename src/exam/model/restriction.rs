//! Answer restrictions for JME parts

use crate::exam::error::Result;
use crate::exam::value::{Data, Number};

/// A length or content constraint on a JME answer.
///
/// `name` doubles as the element tag: `maxlength`, `minlength`, `musthave`
/// or `notallowed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
    pub name: String,
    pub partial_credit: Number,
    pub message: String,
    pub strings: Vec<String>,
    /// Only emitted when present and not negative.
    pub length: Option<Number>,
    pub show_strings: bool,
}

impl Restriction {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            partial_credit: Number::ZERO,
            message: message.to_string(),
            strings: Vec::new(),
            length: None,
            show_strings: false,
        }
    }

    pub fn max_length() -> Self {
        Self {
            length: Some(Number::ZERO),
            ..Self::new("maxlength", "Your answer is too long.")
        }
    }

    pub fn min_length() -> Self {
        Self {
            length: Some(Number::ZERO),
            ..Self::new("minlength", "Your answer is too short.")
        }
    }

    pub fn must_have() -> Self {
        Self::new(
            "musthave",
            "Your answer does not contain all required elements.",
        )
    }

    pub fn not_allowed() -> Self {
        Self::new(
            "notallowed",
            "Your answer contains elements which are not allowed.",
        )
    }

    /// Merge the source mapping over this restriction's current values.
    ///
    /// `strings` are appended to whatever the restriction already holds.
    pub fn merge(mut self, data: &Data) -> Result<Self> {
        crate::load_fields!(data, self, {
            show_strings => "showStrings",
            partial_credit => "partialCredit",
            message => "message",
            length => "length",
        });
        let mut strings: Vec<String> = Vec::new();
        if crate::exam::loader::try_load(data, "strings", &mut strings)? {
            self.strings.extend(strings);
        }
        Ok(self)
    }

    /// The length to emit, if any.
    pub fn emitted_length(&self) -> Option<Number> {
        self.length.filter(|length| length.as_f64() >= 0.0)
    }
}
