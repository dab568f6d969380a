//! Simplification rulesets

use crate::exam::error::Result;
use crate::exam::value::{Data, Value};

/// A pattern-rewrite rule for expression simplification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimplificationRule {
    pub pattern: String,
    pub result: String,
    pub conditions: Vec<String>,
}

impl SimplificationRule {
    pub fn from_data(data: &Data) -> Result<Self> {
        let mut rule = SimplificationRule::default();
        crate::load_fields!(data, rule, {
            pattern => "pattern",
            conditions => "conditions",
            result => "result",
        });
        Ok(rule)
    }
}

/// One element of a ruleset: a reference to another named set, or a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RulesetEntry {
    Include(String),
    Rule(SimplificationRule),
}

/// A named sequence of rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Ruleset {
    pub name: String,
    pub entries: Vec<RulesetEntry>,
}

impl Ruleset {
    pub fn from_data(name: &str, value: &Value) -> Result<Self> {
        let entries = match value {
            Value::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Value::Mapping(rule) => {
                        SimplificationRule::from_data(rule).map(RulesetEntry::Rule)
                    }
                    other => Ok(RulesetEntry::Include(other.to_text())),
                })
                .collect::<Result<Vec<_>>>()?,
            Value::Mapping(rule) => vec![RulesetEntry::Rule(SimplificationRule::from_data(rule)?)],
            other => vec![RulesetEntry::Include(other.to_text())],
        };
        Ok(Ruleset {
            name: name.to_string(),
            entries,
        })
    }

    /// Build every ruleset of a `rulesets` mapping. Names are unique because
    /// the mapping's keys are.
    pub fn all_from_data(data: &Data) -> Result<Vec<Ruleset>> {
        let Some(rulesets) = super::mapping_field(data, "rulesets")? else {
            return Ok(Vec::new());
        };
        rulesets
            .iter()
            .map(|(name, rules)| Ruleset::from_data(name, rules))
            .collect()
    }
}
