//! Multiple choice parts
//!
//! Three sub-kinds share one model and differ only in their default widget:
//!
//! | discriminant | meaning                       | display type |
//! |--------------|-------------------------------|--------------|
//! | `1_n_2`      | pick one from a list          | radiogroup   |
//! | `m_n_2`      | pick several from a list      | checkbox     |
//! | `m_n_x`      | pick from a choice/answer grid| radiogroup   |

use super::{Part, PartKind};
use crate::exam::error::Result;
use crate::exam::loader::Load;
use crate::exam::value::{Data, Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    OneOfTwo,
    ManyOfTwo,
    ManyOfMany,
}

impl ChoiceKind {
    pub fn from_discriminant(kind: &str) -> Option<Self> {
        match kind {
            "1_n_2" => Some(ChoiceKind::OneOfTwo),
            "m_n_2" => Some(ChoiceKind::ManyOfTwo),
            "m_n_x" => Some(ChoiceKind::ManyOfMany),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceKind::OneOfTwo => "1_n_2",
            ChoiceKind::ManyOfTwo => "m_n_2",
            ChoiceKind::ManyOfMany => "m_n_x",
        }
    }

    pub fn default_display_type(&self) -> &'static str {
        match self {
            ChoiceKind::OneOfTwo | ChoiceKind::ManyOfMany => "radiogroup",
            ChoiceKind::ManyOfTwo => "checkbox",
        }
    }
}

/// Marks per (choice, answer) cell, or a formula producing them.
#[derive(Debug, Clone, PartialEq)]
pub enum Matrix {
    Table(Vec<Vec<Value>>),
    Formula(String),
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::Table(Vec::new())
    }
}

impl Load for Matrix {
    fn load(_key: &str, value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Str(formula) => Matrix::Formula(formula.clone()),
            other => Matrix::Table(normalize_table(other)),
        })
    }
}

/// Shape a matrix-like value into rows.
///
/// A flat sequence (first element not itself a sequence) becomes a
/// one-column table; a nested sequence is kept as it is.
pub fn normalize_table(value: &Value) -> Vec<Vec<Value>> {
    match value {
        Value::Null => Vec::new(),
        Value::Sequence(items) => {
            let nested = items.first().is_some_and(Value::is_sequence);
            items
                .iter()
                .map(|item| match item {
                    Value::Sequence(row) if nested => row.clone(),
                    other => vec![other.clone()],
                })
                .collect()
        }
        other => vec![vec![other.clone()]],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoicePart {
    pub choice_kind: ChoiceKind,
    /// Set when the source mentions `minMarks` at all, whatever its value.
    pub min_marks_enabled: bool,
    pub min_marks: Number,
    /// Set when the source mentions `maxMarks` at all, whatever its value.
    pub max_marks_enabled: bool,
    pub max_marks: Number,
    pub min_answers: Number,
    pub max_answers: Number,
    pub shuffle_choices: bool,
    pub shuffle_answers: bool,
    pub display_type: String,
    pub display_columns: Number,
    pub choices: Vec<String>,
    pub answers: Vec<String>,
    pub matrix: Matrix,
    pub distractors: Vec<Vec<String>>,
}

impl MultipleChoicePart {
    pub fn new(choice_kind: ChoiceKind) -> Self {
        Self {
            choice_kind,
            min_marks_enabled: false,
            min_marks: Number::ZERO,
            max_marks_enabled: false,
            max_marks: Number::ZERO,
            min_answers: Number::ZERO,
            max_answers: Number::ZERO,
            shuffle_choices: false,
            shuffle_answers: false,
            display_type: choice_kind.default_display_type().to_string(),
            display_columns: Number::Int(1),
            choices: Vec::new(),
            answers: Vec::new(),
            matrix: Matrix::default(),
            distractors: Vec::new(),
        }
    }

    pub fn from_data(kind: &str, data: &Data) -> Result<Part> {
        let choice_kind = ChoiceKind::from_discriminant(kind).unwrap_or(ChoiceKind::OneOfTwo);
        let mut part = MultipleChoicePart::new(choice_kind);
        crate::load_fields!(data, part, {
            min_marks => "minMarks",
            max_marks => "maxMarks",
            min_answers => "minAnswers",
            max_answers => "maxAnswers",
            shuffle_choices => "shuffleChoices",
            shuffle_answers => "shuffleAnswers",
            display_type => "displayType",
            display_columns => "displayColumns",
            choices => "choices",
            answers => "answers",
            matrix => "matrix",
        });

        part.min_marks_enabled = data.contains_key("minmarks");
        part.max_marks_enabled = data.contains_key("maxmarks");

        if let Some(distractors) = data.get("distractors") {
            part.distractors = normalize_table(distractors)
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| String::load("distractors", cell))
                        .collect::<Result<Vec<_>>>()
                })
                .collect::<Result<Vec<_>>>()?;
        }

        Ok(Part::new(PartKind::MultipleChoice(part)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple_choice(kind: &str, pairs: Vec<(&str, Value)>) -> MultipleChoicePart {
        let mut data: Data = pairs.into_iter().collect();
        data.insert("type", kind);
        match Part::from_data(&data).unwrap().kind {
            PartKind::MultipleChoice(part) => part,
            other => panic!("expected a multiple choice part, got {:?}", other),
        }
    }

    #[test]
    fn test_display_type_follows_sub_kind() {
        assert_eq!(multiple_choice("1_n_2", vec![]).display_type, "radiogroup");
        assert_eq!(multiple_choice("m_n_2", vec![]).display_type, "checkbox");
        assert_eq!(multiple_choice("M_N_X", vec![]).display_type, "radiogroup");
    }

    #[test]
    fn test_display_type_can_be_overridden() {
        let part = multiple_choice("1_n_2", vec![("displayType", Value::from("dropdownlist"))]);
        assert_eq!(part.display_type, "dropdownlist");
        assert_eq!(part.choice_kind, ChoiceKind::OneOfTwo);
    }

    #[test]
    fn test_marks_flags_track_presence_not_value() {
        let part = multiple_choice(
            "m_n_2",
            vec![("minMarks", Value::from(0i64)), ("maxMarks", Value::from(0.0))],
        );
        assert!(part.min_marks_enabled);
        assert!(part.max_marks_enabled);
        assert_eq!(part.min_marks, Number::ZERO);

        let part = multiple_choice("m_n_2", vec![]);
        assert!(!part.min_marks_enabled);
        assert!(!part.max_marks_enabled);
    }

    #[test]
    fn test_flat_matrix_becomes_one_column() {
        let part = multiple_choice("1_n_2", vec![("matrix", Value::from(vec![1i64, 0, -1]))]);
        assert_eq!(
            part.matrix,
            Matrix::Table(vec![
                vec![Value::from(1i64)],
                vec![Value::from(0i64)],
                vec![Value::from(-1i64)],
            ])
        );
    }

    #[test]
    fn test_nested_matrix_is_kept() {
        let rows = Value::from(vec![Value::from(vec![1i64, 0]), Value::from(vec![0i64, 1])]);
        let part = multiple_choice("m_n_x", vec![("matrix", rows)]);
        assert_eq!(
            part.matrix,
            Matrix::Table(vec![
                vec![Value::from(1i64), Value::from(0i64)],
                vec![Value::from(0i64), Value::from(1i64)],
            ])
        );
    }

    #[test]
    fn test_formula_matrix() {
        let part = multiple_choice("1_n_2", vec![("matrix", Value::from("marks_matrix"))]);
        assert_eq!(part.matrix, Matrix::Formula("marks_matrix".to_string()));
    }

    #[test]
    fn test_distractors_normalized_like_matrix() {
        let part = multiple_choice(
            "1_n_2",
            vec![("distractors", Value::from(vec!["Too big", "Too small"]))],
        );
        assert_eq!(
            part.distractors,
            vec![vec!["Too big".to_string()], vec!["Too small".to_string()]]
        );
    }

    #[test]
    fn test_choices_and_answers_keep_order() {
        let part = multiple_choice(
            "m_n_x",
            vec![
                ("choices", Value::from(vec!["a", "b", "c"])),
                ("answers", Value::from(vec![Value::from(1i64), Value::from("two")])),
            ],
        );
        assert_eq!(part.choices, vec!["a", "b", "c"]);
        assert_eq!(part.answers, vec!["1", "two"]);
    }
}
