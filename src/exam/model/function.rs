//! Custom functions and question variables

use crate::exam::error::{ExamError, Result};
use crate::exam::loader::Load;
use crate::exam::value::{Data, Value};

/// A user-defined function available to the exam's expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub output_type: String,
    pub definition: String,
    pub language: String,
    /// `(name, type)` pairs in declaration order.
    pub parameters: Vec<(String, String)>,
}

impl Function {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            output_type: String::new(),
            definition: String::new(),
            language: "jme".to_string(),
            parameters: Vec::new(),
        }
    }

    pub fn from_data(name: &str, data: &Data) -> Result<Self> {
        let mut function = Function::new(name);
        crate::load_fields!(data, function, {
            output_type => "type",
            definition => "definition",
            language => "language",
        });
        if let Some(parameters) = data.get("parameters") {
            function.parameters = load_parameters(parameters)?;
        }
        Ok(function)
    }

    /// Build every function of a `functions` mapping, in source order.
    pub fn all_from_data(data: &Data) -> Result<Vec<Function>> {
        let Some(functions) = super::mapping_field(data, "functions")? else {
            return Ok(Vec::new());
        };
        functions
            .iter()
            .map(|(name, definition)| {
                let definition = super::expect_mapping(name, definition)?;
                Function::from_data(name, definition)
            })
            .collect()
    }
}

/// Parameters are either `[[name, type], ...]` or `{ name: type, ... }`.
fn load_parameters(value: &Value) -> Result<Vec<(String, String)>> {
    let invalid = |found: &Value| ExamError::FieldType {
        key: "parameters".to_string(),
        expected: "a sequence of [name, type] pairs",
        found: found.type_name().to_string(),
    };

    match value {
        Value::Mapping(pairs) => pairs
            .iter()
            .map(|(name, kind)| Ok((name.to_string(), String::load("parameters", kind)?)))
            .collect(),
        Value::Sequence(pairs) => pairs
            .iter()
            .map(|pair| match pair.as_sequence() {
                Some([name, kind]) => Ok((
                    String::load("parameters", name)?,
                    String::load("parameters", kind)?,
                )),
                _ => Err(invalid(pair)),
            })
            .collect(),
        other => Err(invalid(other)),
    }
}

/// A named, opaque variable definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub definition: String,
}

impl Variable {
    pub fn new(name: &str, definition: &str) -> Self {
        Self {
            name: name.to_string(),
            definition: definition.to_string(),
        }
    }

    /// Build every variable of a `variables` mapping, in source order.
    pub fn all_from_data(data: &Data) -> Result<Vec<Variable>> {
        let Some(variables) = super::mapping_field(data, "variables")? else {
            return Ok(Vec::new());
        };
        variables
            .iter()
            .map(|(name, definition)| {
                Ok(Variable::new(name, &String::load(name, definition)?))
            })
            .collect()
    }
}
