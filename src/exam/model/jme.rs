//! Algebraic expression (JME) parts

use super::{Part, PartKind, Restriction};
use crate::exam::error::Result;
use crate::exam::loader::try_load;
use crate::exam::value::{Data, Number, Value};

/// Simplification applied to the correct answer unless the source says otherwise.
pub const DEFAULT_ANSWER_SIMPLIFICATION: &str = "basic,unitFactor,unitPower,unitDenominator,\
zeroFactor,zeroTerm,zeroPower,collectNumbers,zeroBase,constantsFirst,sqrtProduct,sqrtDivision,\
sqrtSquare,otherNumbers";

/// Accuracy for the difference-based checking types (`reldiff`, `absdiff`).
pub const DIFFERENCE_ACCURACY: f64 = 0.0001;

/// Accuracy for the digit-counting checking types (`dp`, `sigfig`).
pub const DIGITS_ACCURACY: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct JmePart {
    pub answer: String,
    pub answer_simplification: String,
    pub checking_type: String,
    pub checking_accuracy: Number,
    pub failure_rate: Number,
    pub vset_range_start: Number,
    pub vset_range_end: Number,
    pub vset_range_points: Number,
    pub max_length: Restriction,
    pub min_length: Restriction,
    pub must_have: Restriction,
    pub not_allowed: Restriction,
}

impl Default for JmePart {
    fn default() -> Self {
        Self {
            answer: String::new(),
            answer_simplification: DEFAULT_ANSWER_SIMPLIFICATION.to_string(),
            checking_type: "RelDiff".to_string(),
            checking_accuracy: Number::ZERO,
            failure_rate: Number::Int(1),
            vset_range_start: Number::Int(0),
            vset_range_end: Number::Int(1),
            vset_range_points: Number::Int(5),
            max_length: Restriction::max_length(),
            min_length: Restriction::min_length(),
            must_have: Restriction::must_have(),
            not_allowed: Restriction::not_allowed(),
        }
    }
}

/// Default accuracy for a checking type, before any explicit override.
pub fn default_accuracy(checking_type: &str) -> Number {
    match checking_type.to_lowercase().as_str() {
        "reldiff" | "absdiff" => Number::Float(DIFFERENCE_ACCURACY),
        _ => Number::Int(DIGITS_ACCURACY),
    }
}

impl JmePart {
    pub fn from_data(_kind: &str, data: &Data) -> Result<Part> {
        let mut part = JmePart::default();
        crate::load_fields!(data, part, {
            answer => "answer",
            answer_simplification => "answerSimplification",
            checking_type => "checkingType",
            failure_rate => "failureRate",
            vset_range_points => "vsetRangePoints",
        });

        part.checking_accuracy = default_accuracy(&part.checking_type);
        try_load(data, "checkingAccuracy", &mut part.checking_accuracy)?;

        for (key, restriction) in [
            ("maxlength", &mut part.max_length),
            ("minlength", &mut part.min_length),
            ("musthave", &mut part.must_have),
            ("notallowed", &mut part.not_allowed),
        ] {
            if let Some(source) = super::mapping_field(data, key)? {
                *restriction = restriction.clone().merge(source)?;
            }
        }

        if let Some(Value::Sequence(range)) = data.get("vsetrange") {
            if let [start, end] = range.as_slice() {
                part.vset_range_start = crate::exam::loader::Load::load("vsetrange", start)?;
                part.vset_range_end = crate::exam::loader::Load::load("vsetrange", end)?;
            }
        }

        Ok(Part::new(PartKind::Jme(part)))
    }
}
