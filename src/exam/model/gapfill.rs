//! Gap fill parts
//!
//! The prompt refers to its gaps with `[[n]]` placeholders. The marks of a
//! gap fill are never read from its own fields: they are the sum of its gaps,
//! worked out whenever asked for.

use super::{Part, PartKind};
use crate::exam::error::Result;
use crate::exam::value::{Data, Number};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapFillPart {
    pub gaps: Vec<Part>,
}

impl GapFillPart {
    pub fn from_data(_kind: &str, data: &Data) -> Result<Part> {
        let part = GapFillPart {
            gaps: Part::all_from_data(data, "gaps")?,
        };
        Ok(Part::new(PartKind::GapFill(part)))
    }

    pub fn total_marks(&self) -> Number {
        self.gaps
            .iter()
            .map(Part::total_marks)
            .fold(Number::ZERO, |total, marks| total + marks)
    }
}
