//! Numeric answer parts

use super::{Part, PartKind};
use crate::exam::error::Result;
use crate::exam::loader::try_load;
use crate::exam::value::{Data, Number, Value};

/// The answer, bounds and accuracy are kept as written. They may be plain
/// numbers or expressions such as `{a}` that the player evaluates.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberEntryPart {
    pub integer_answer: bool,
    /// Credit given when a non-integer answer is otherwise correct.
    pub partial_credit: Number,
    /// `range`, or a tolerance mode.
    pub checking_type: String,
    pub answer: Value,
    pub checking_accuracy: Value,
    pub min_value: Value,
    pub max_value: Value,
    pub input_step: Number,
}

impl Default for NumberEntryPart {
    fn default() -> Self {
        Self {
            integer_answer: false,
            partial_credit: Number::ZERO,
            checking_type: "range".to_string(),
            answer: Value::from(Number::ZERO),
            checking_accuracy: Value::from(Number::ZERO),
            min_value: Value::from(Number::ZERO),
            max_value: Value::from(Number::ZERO),
            input_step: Number::Int(1),
        }
    }
}

impl NumberEntryPart {
    pub fn from_data(_kind: &str, data: &Data) -> Result<Part> {
        let mut part = NumberEntryPart::default();
        crate::load_fields!(data, part, {
            integer_answer => "integerAnswer",
            partial_credit => "partialCredit",
            checking_type => "checkingType",
            input_step => "inputStep",
        });

        if part.is_range() {
            let mut answer = Value::Null;
            if try_load(data, "answer", &mut answer)? {
                part.min_value = answer.clone();
                part.max_value = answer;
            } else {
                crate::load_fields!(data, part, {
                    min_value => "minValue",
                    max_value => "maxValue",
                });
            }
        } else {
            crate::load_fields!(data, part, {
                answer => "answer",
                checking_accuracy => "checkingAccuracy",
            });
        }

        Ok(Part::new(PartKind::NumberEntry(part)))
    }

    /// Whether the answer is checked against a `[min, max]` interval.
    pub fn is_range(&self) -> bool {
        self.checking_type == "range"
    }
}
