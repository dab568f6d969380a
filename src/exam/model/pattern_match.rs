//! Free-text pattern match parts

use super::{Part, PartKind};
use crate::exam::error::Result;
use crate::exam::value::{Data, Number};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternMatchPart {
    pub case_sensitive: bool,
    pub partial_credit: Number,
    /// Pattern the student's answer is matched against.
    pub answer: String,
    /// Shown to the student when the answer is revealed.
    pub display_answer: String,
}

impl PatternMatchPart {
    pub fn from_data(_kind: &str, data: &Data) -> Result<Part> {
        let mut part = PatternMatchPart::default();
        crate::load_fields!(data, part, {
            case_sensitive => "caseSensitive",
            partial_credit => "partialCredit",
            answer => "answer",
            display_answer => "displayAnswer",
        });
        Ok(Part::new(PartKind::PatternMatch(part)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_fields() {
        let mut data = Data::new();
        data.insert("type", "patternmatch");
        data.insert("answer", "(?i)colou?r");
        data.insert("displayanswer", "colour");
        data.insert("casesensitive", true);

        let part = Part::from_data(&data).unwrap();
        let PartKind::PatternMatch(pattern) = part.kind else {
            panic!("expected a pattern match part");
        };
        assert_eq!(pattern.answer, "(?i)colou?r");
        assert_eq!(pattern.display_answer, "colour");
        assert!(pattern.case_sensitive);
        assert_eq!(pattern.partial_credit, Number::ZERO);
    }
}
