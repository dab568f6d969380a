//! Questions

use super::{Function, Part, Ruleset, Variable};
use crate::exam::error::Result;
use crate::exam::value::Data;

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub name: String,
    pub statement: String,
    pub advice: String,
    pub parts: Vec<Part>,
    pub variables: Vec<Variable>,
    pub functions: Vec<Function>,
    pub rulesets: Vec<Ruleset>,
}

impl Default for Question {
    fn default() -> Self {
        Self {
            name: "Untitled Question".to_string(),
            statement: String::new(),
            advice: String::new(),
            parts: Vec::new(),
            variables: Vec::new(),
            functions: Vec::new(),
            rulesets: Vec::new(),
        }
    }
}

impl Question {
    pub fn from_data(data: &Data) -> Result<Self> {
        let mut question = Question::default();
        crate::load_fields!(data, question, {
            name => "name",
            statement => "statement",
            advice => "advice",
        });
        question.parts = Part::all_from_data(data, "parts")?;
        question.variables = Variable::all_from_data(data)?;
        question.functions = Function::all_from_data(data)?;
        question.rulesets = Ruleset::all_from_data(data)?;
        tracing::trace!(name = %question.name, parts = question.parts.len(), "built question");
        Ok(question)
    }
}
