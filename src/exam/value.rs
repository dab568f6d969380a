//! The generic Value tree handed over by the notation reader.
//!
//! Mappings are case-insensitive: keys are lowercased both when inserted and
//! when looked up, while enumeration keeps first-insertion order.

use indexmap::IndexMap;
use std::fmt;
use std::ops::Add;

/// A node of the value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
    Sequence(Vec<Value>),
    Mapping(Data),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Data> {
        match self {
            Value::Mapping(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Short name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Render the value as opaque text.
    ///
    /// Strings come out verbatim. Everything else uses the literal forms the
    /// player expects: `True`/`False`, `None`, `[1, 'a']`, `{'k': 2}`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.repr(),
        }
    }

    fn repr(&self) -> String {
        match self {
            Value::Null => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Number(n) => n.to_string(),
            Value::Str(s) => quote(s),
            Value::Sequence(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Mapping(data) => {
                let inner: Vec<String> = data
                    .iter()
                    .map(|(k, v)| format!("{}: {}", quote(k), v.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }
}

fn quote(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", s.replace('\\', "\\\\"))
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Data> for Value {
    fn from(data: Data) -> Self {
        Value::Mapping(data)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// A number as written in the source, keeping integers apart from floats.
///
/// The distinction matters for output: `2` and `2.0` are different
/// attribute texts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub const ZERO: Number = Number::Int(0);

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Parse a numeric literal: integers first, then decimals and exponents.
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Int(n));
        }
        let looks_numeric = text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
            && text.chars().any(|c| c.is_ascii_digit());
        if !looks_numeric {
            return None;
        }
        text.parse::<f64>().ok().map(Number::Float)
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::ZERO
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => f.write_str(&format_float(x)),
        }
    }
}

/// Shortest round-trip rendering of a float with a mandatory fractional
/// part, switching to exponent form outside `1e-4 <= |x| < 1e16`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "-1.2345e2"
    let sci = format!("{:e}", x);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exponent) {
        let mut out = String::from(sign);
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", exp_sign, exponent.abs()));
        return out;
    }

    let mut out = String::from(sign);
    if exponent >= 0 {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            out.push_str(&digits);
            out.push_str(&"0".repeat(int_len - digits.len()));
            out.push_str(".0");
        } else {
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    } else {
        out.push_str("0.");
        out.push_str(&"0".repeat((-exponent - 1) as usize));
        out.push_str(&digits);
    }
    out
}

/// Case-insensitive ordered mapping from text keys to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data {
    entries: IndexMap<String, Value>,
}

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the lowercased key. An existing key keeps its position.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<Value>) {
        self.entries
            .insert(key.as_ref().to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&key.to_lowercase())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Data::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_data_keys_are_case_insensitive() {
        let mut data = Data::new();
        data.insert("PercentPass", 50i64);
        assert!(data.contains_key("percentpass"));
        assert!(data.contains_key("PERCENTPASS"));
        assert_eq!(data.get("percentPass"), Some(&Value::from(50i64)));
    }

    #[test]
    fn test_data_preserves_insertion_order() {
        let data: Data = vec![("Zeta", 1i64), ("alpha", 2), ("Mid", 3)]
            .into_iter()
            .collect();
        let keys: Vec<&str> = data.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_data_reinsert_keeps_position() {
        let mut data = Data::new();
        data.insert("a", 1i64);
        data.insert("b", 2i64);
        data.insert("A", 3i64);
        let entries: Vec<(&str, &Value)> = data.iter().collect();
        assert_eq!(entries[0], ("a", &Value::from(3i64)));
        assert_eq!(data.len(), 2);
    }

    #[rstest]
    #[case(0.0001, "0.0001")]
    #[case(0.00001, "1e-05")]
    #[case(1.0, "1.0")]
    #[case(-2.5, "-2.5")]
    #[case(0.0, "0.0")]
    #[case(123.456, "123.456")]
    #[case(1e16, "1e+16")]
    #[case(1e15, "1000000000000000.0")]
    #[case(1.5e-7, "1.5e-07")]
    #[case(0.1, "0.1")]
    fn test_format_float(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(format_float(input), expected);
    }

    #[test]
    fn test_number_addition_keeps_integers() {
        assert_eq!(Number::Int(2) + Number::Int(3), Number::Int(5));
        assert_eq!(Number::Int(2) + Number::Float(0.5), Number::Float(2.5));
    }

    #[rstest]
    #[case("5", Some(Number::Int(5)))]
    #[case("-3", Some(Number::Int(-3)))]
    #[case("2.5", Some(Number::Float(2.5)))]
    #[case("1e-3", Some(Number::Float(0.001)))]
    #[case("x+1", None)]
    #[case("e", None)]
    #[case("inf", None)]
    fn test_number_parse(#[case] input: &str, #[case] expected: Option<Number>) {
        assert_eq!(Number::parse(input), expected);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::from("x+1").to_text(), "x+1");
        assert_eq!(Value::from(true).to_text(), "True");
        assert_eq!(Value::Null.to_text(), "None");
        assert_eq!(Value::from(3i64).to_text(), "3");
        let seq = Value::Sequence(vec![Value::from(1i64), Value::from("a")]);
        assert_eq!(seq.to_text(), "[1, 'a']");
        let map: Data = vec![("k", 2i64)].into_iter().collect();
        assert_eq!(Value::from(map).to_text(), "{'k': 2}");
    }
}
