//! Domain model
//!
//!     Value objects built once from the value tree and read-only afterwards.
//!     Each type has a `from_data` constructor that starts from fresh defaults,
//!     loads whatever the source mapping carries and recurses into children.
//!
//!     Exam
//!     ├── rulesets, functions, variables
//!     └── questions: Question
//!         ├── rulesets, functions, variables
//!         └── parts: Part (JME | NumberEntry | PatternMatch |
//!             │            MultipleChoice | GapFill | Information)
//!             ├── steps: Part
//!             └── gaps: Part           (GapFill only)

pub mod event;
pub mod exam;
pub mod function;
pub mod gapfill;
pub mod jme;
pub mod multiple_choice;
pub mod number_entry;
pub mod part;
pub mod pattern_match;
pub mod question;
pub mod restriction;
pub mod ruleset;

pub use event::Event;
pub use exam::{Exam, Feedback, Navigation, Timing};
pub use function::{Function, Variable};
pub use gapfill::GapFillPart;
pub use jme::JmePart;
pub use multiple_choice::{ChoiceKind, Matrix, MultipleChoicePart};
pub use number_entry::NumberEntryPart;
pub use part::{Part, PartKind};
pub use pattern_match::PatternMatchPart;
pub use question::Question;
pub use restriction::Restriction;
pub use ruleset::{Ruleset, RulesetEntry, SimplificationRule};

use crate::exam::error::{ExamError, Result};
use crate::exam::value::{Data, Value};

/// Read `data[key]` as a mapping, if present.
pub(crate) fn mapping_field<'a>(data: &'a Data, key: &str) -> Result<Option<&'a Data>> {
    match data.get(key) {
        None => Ok(None),
        Some(Value::Mapping(inner)) => Ok(Some(inner)),
        Some(other) => Err(ExamError::FieldType {
            key: key.to_string(),
            expected: "a mapping",
            found: other.type_name().to_string(),
        }),
    }
}

/// Read `data[key]` as a sequence, if present.
pub(crate) fn sequence_field<'a>(data: &'a Data, key: &str) -> Result<&'a [Value]> {
    match data.get(key) {
        None => Ok(&[]),
        Some(Value::Sequence(items)) => Ok(items),
        Some(other) => Err(ExamError::FieldType {
            key: key.to_string(),
            expected: "a sequence",
            found: other.type_name().to_string(),
        }),
    }
}

/// Treat a sequence element as a mapping.
pub(crate) fn expect_mapping<'a>(key: &str, value: &'a Value) -> Result<&'a Data> {
    value.as_mapping().ok_or_else(|| ExamError::FieldType {
        key: key.to_string(),
        expected: "a mapping",
        found: value.type_name().to_string(),
    })
}
