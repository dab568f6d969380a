//! Question parts and variant dispatch
//!
//! A part is built in two phases. First the variant constructor picked by the
//! `type` discriminant sets its own defaults and variant fields. Then the
//! common fields (`stepsPenalty`, `minimumMarks`, `enableMinimumMarks`,
//! `marks`, `prompt`) are applied on top, so an explicit `marks` in the
//! source always beats a variant's default. Steps are built last.

use super::{
    expect_mapping, sequence_field, GapFillPart, JmePart, MultipleChoicePart, NumberEntryPart,
    PatternMatchPart,
};
use crate::exam::error::{ExamError, Result};
use crate::exam::loader::try_load;
use crate::exam::value::{Data, Number};

/// The variant-specific half of a part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartKind {
    Jme(JmePart),
    NumberEntry(NumberEntryPart),
    PatternMatch(PatternMatchPart),
    MultipleChoice(MultipleChoicePart),
    GapFill(GapFillPart),
    Information,
}

/// A gradable (or purely informational) piece of a question.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub marks: Number,
    pub prompt: String,
    pub steps: Vec<Part>,
    pub steps_penalty: Number,
    pub minimum_marks: Number,
    pub enable_minimum_marks: bool,
    pub kind: PartKind,
}

/// Builds a part with its variant defaults from the discriminant and source.
type PartConstructor = fn(&str, &Data) -> Result<Part>;

/// Discriminant → constructor. Fixed for the life of the process.
static PART_TYPES: &[(&str, PartConstructor)] = &[
    ("jme", JmePart::from_data),
    ("numberentry", NumberEntryPart::from_data),
    ("patternmatch", PatternMatchPart::from_data),
    ("1_n_2", MultipleChoicePart::from_data),
    ("m_n_2", MultipleChoicePart::from_data),
    ("m_n_x", MultipleChoicePart::from_data),
    ("gapfill", GapFillPart::from_data),
    ("information", information),
];

fn information(_kind: &str, _data: &Data) -> Result<Part> {
    Ok(Part::new(PartKind::Information))
}

/// All known discriminants, sorted.
pub fn valid_part_types() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PART_TYPES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

impl Part {
    /// A part of the given variant with the common defaults.
    pub fn new(kind: PartKind) -> Self {
        Self {
            marks: Number::ZERO,
            prompt: String::new(),
            steps: Vec::new(),
            steps_penalty: Number::ZERO,
            minimum_marks: Number::ZERO,
            enable_minimum_marks: true,
            kind,
        }
    }

    pub fn from_data(data: &Data) -> Result<Part> {
        let mut kind = String::new();
        if !try_load(data, "type", &mut kind)? {
            return Err(ExamError::MissingField {
                key: "type".to_string(),
                context: "part".to_string(),
            });
        }
        let kind = kind.to_lowercase();

        let constructor = PART_TYPES
            .iter()
            .find(|(name, _)| *name == kind)
            .map(|(_, constructor)| *constructor)
            .ok_or_else(|| ExamError::InvalidPartType {
                kind: kind.clone(),
                hint: format!("Valid part types are {}", valid_part_types().join(", ")),
            })?;
        tracing::trace!(kind = %kind, "constructing part");

        let mut part = constructor(&kind, data)?;

        crate::load_fields!(data, part, {
            steps_penalty => "stepsPenalty",
            minimum_marks => "minimumMarks",
            enable_minimum_marks => "enableMinimumMarks",
            marks => "marks",
            prompt => "prompt",
        });

        for step in sequence_field(data, "steps")? {
            part.steps.push(Part::from_data(expect_mapping("steps", step)?)?);
        }

        Ok(part)
    }

    /// Build every part of a `key` sequence (`parts`, `gaps`).
    pub fn all_from_data(data: &Data, key: &str) -> Result<Vec<Part>> {
        sequence_field(data, key)?
            .iter()
            .map(|part| Part::from_data(expect_mapping(key, part)?))
            .collect()
    }

    /// The discriminant written to the `type` attribute.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            PartKind::Jme(_) => "jme",
            PartKind::NumberEntry(_) => "numberentry",
            PartKind::PatternMatch(_) => "patternmatch",
            PartKind::MultipleChoice(part) => part.choice_kind.as_str(),
            PartKind::GapFill(_) => "gapfill",
            PartKind::Information => "information",
        }
    }

    /// Marks as serialized: gap fills report the sum of their gaps.
    pub fn total_marks(&self) -> Number {
        match &self.kind {
            PartKind::GapFill(gapfill) => gapfill.total_marks(),
            _ => self.marks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::value::Value;

    fn part_data(kind: &str) -> Data {
        let mut data = Data::new();
        data.insert("type", kind);
        data
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        let part = Part::from_data(&part_data("JME")).unwrap();
        assert_eq!(part.type_name(), "jme");
        assert!(matches!(part.kind, PartKind::Jme(_)));
    }

    #[test]
    fn test_unknown_type_lists_sorted_hint() {
        let err = Part::from_data(&part_data("essay")).unwrap_err();
        assert_eq!(
            err,
            ExamError::InvalidPartType {
                kind: "essay".to_string(),
                hint: "Valid part types are 1_n_2, gapfill, information, jme, m_n_2, m_n_x, \
                       numberentry, patternmatch"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_missing_type() {
        let err = Part::from_data(&Data::new()).unwrap_err();
        assert!(matches!(err, ExamError::MissingField { .. }));
    }

    #[test]
    fn test_common_defaults() {
        let part = Part::from_data(&part_data("information")).unwrap();
        assert_eq!(part.marks, Number::ZERO);
        assert_eq!(part.steps_penalty, Number::ZERO);
        assert_eq!(part.minimum_marks, Number::ZERO);
        assert!(part.enable_minimum_marks);
        assert!(part.prompt.is_empty());
    }

    #[test]
    fn test_explicit_marks_override_variant_default() {
        let mut data = part_data("information");
        data.insert("marks", 3i64);
        data.insert("prompt", "Read this.");
        let part = Part::from_data(&data).unwrap();
        assert_eq!(part.marks, Number::Int(3));
        assert_eq!(part.prompt, "Read this.");
    }

    #[test]
    fn test_steps_are_built_recursively_in_order() {
        let mut data = part_data("jme");
        data.insert(
            "steps",
            Value::Sequence(vec![
                Value::Mapping(part_data("numberentry")),
                Value::Mapping(part_data("information")),
            ]),
        );
        let part = Part::from_data(&data).unwrap();
        let kinds: Vec<&str> = part.steps.iter().map(Part::type_name).collect();
        assert_eq!(kinds, vec!["numberentry", "information"]);
    }

    #[test]
    fn test_invalid_step_type_fails_whole_part() {
        let mut data = part_data("jme");
        data.insert("steps", Value::Sequence(vec![Value::Mapping(part_data("bogus"))]));
        assert!(matches!(
            Part::from_data(&data),
            Err(ExamError::InvalidPartType { .. })
        ));
    }
}
