//! Copy-if-present attribute loading
//!
//!     Every model constructor starts from its defaults and then pulls in the
//!     fields that the source mapping actually carries. A missing key is never
//!     an error: absence means "keep the default".
//!
//!     Keys are matched case-insensitively. The receiving field is picked by the
//!     caller, so loading the source key `type` into `advice_type` is just
//!     `try_load(data, "type", &mut feedback.advice_type)`.

use crate::exam::error::{ExamError, Result};
use crate::exam::value::{Data, Number, Value};

/// Conversion from a value tree node into a typed model field.
pub trait Load: Sized {
    fn load(key: &str, value: &Value) -> Result<Self>;
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> ExamError {
    ExamError::FieldType {
        key: key.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

impl Load for Value {
    fn load(_key: &str, value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl Load for String {
    fn load(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Mapping(_) => Err(mismatch(key, "text", value)),
            other => Ok(other.to_text()),
        }
    }
}

impl Load for bool {
    fn load(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64() != 0.0),
            Value::Str(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::Str(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(mismatch(key, "a boolean", other)),
        }
    }
}

impl Load for Number {
    fn load(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(*n),
            Value::Str(s) => Number::parse(s).ok_or_else(|| mismatch(key, "a number", value)),
            other => Err(mismatch(key, "a number", other)),
        }
    }
}

impl<T: Load> Load for Vec<T> {
    fn load(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Sequence(items) => items.iter().map(|item| T::load(key, item)).collect(),
            other => Err(mismatch(key, "a sequence", other)),
        }
    }
}

impl<T: Load> Load for Option<T> {
    fn load(key: &str, value: &Value) -> Result<Self> {
        T::load(key, value).map(Some)
    }
}

/// Copy `data[key]` into `target` if the key is present.
///
/// Returns whether the key was found. An absent key leaves `target` untouched.
pub fn try_load<T: Load>(data: &Data, key: &str, target: &mut T) -> Result<bool> {
    match data.get(key) {
        Some(value) => {
            *target = T::load(key, value)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Copy `data[key]` as-is into a key-value sink, optionally under another name.
pub fn try_load_entry(data: &Data, key: &str, sink: &mut Data, rename: Option<&str>) -> bool {
    match data.get(key) {
        Some(value) => {
            sink.insert(rename.unwrap_or(key), value.clone());
            true
        }
        None => false,
    }
}

/// Batch form of [`try_load`]: each `field => "key"` pair is handled on its own.
///
/// ```ignore
/// load_fields!(data, part, {
///     case_sensitive => "caseSensitive",
///     partial_credit => "partialCredit",
/// });
/// ```
#[macro_export]
macro_rules! load_fields {
    ($data:expr, $target:expr, { $($field:ident => $key:literal),+ $(,)? }) => {{
        $( $crate::exam::loader::try_load($data, $key, &mut $target.$field)?; )+
    }};
}
