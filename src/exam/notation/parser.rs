//! Grammar for the exam notation using chumsky
//!
//! Builds the value tree from the token stream produced by logos.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use chumsky::Stream;

use super::tokens::Token;
use super::TokenSpan;
use crate::exam::error::{line_column, ExamError, Result};
use crate::exam::value::{Data, Number, Value};

/// Type alias for parser error
type ParserError = Simple<Token>;

/// Zero or more entry separators.
fn separators() -> impl Parser<Token, (), Error = ParserError> + Clone {
    filter(Token::is_separator).repeated().ignored()
}

/// At least one entry separator.
fn separators1() -> impl Parser<Token, (), Error = ParserError> + Clone {
    filter(Token::is_separator).repeated().at_least(1).ignored()
}

/// Interpret bare text: numbers, booleans and null are typed, the rest is text.
pub(crate) fn scalar_from_text(text: &str) -> Value {
    match text.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" | "none" => return Value::Null,
        _ => {}
    }
    match Number::parse(text) {
        Some(number) => Value::Number(number),
        None => Value::Str(text.to_string()),
    }
}

/// `key: value` entries separated by newlines or commas.
fn entries<P>(value: P) -> impl Parser<Token, Data, Error = ParserError> + Clone
where
    P: Parser<Token, Value, Error = ParserError> + Clone,
{
    let key = select! {
        Token::Text(key) => key,
        Token::Quoted(key) => key,
    }
    .labelled("key");

    key.then_ignore(just(Token::Colon))
        .then_ignore(just(Token::Newline).repeated())
        .then(value)
        .separated_by(separators1())
        .allow_trailing()
        .map(|pairs: Vec<(String, Value)>| pairs.into_iter().collect::<Data>())
}

/// Any value: mapping, sequence or scalar.
fn value() -> impl Parser<Token, Value, Error = ParserError> + Clone {
    recursive(|value| {
        let scalar = select! {
            Token::Text(text) => scalar_from_text(&text),
            Token::Quoted(text) => Value::Str(text),
        };

        let sequence = just(Token::OpenBracket)
            .ignore_then(separators())
            .ignore_then(
                value
                    .clone()
                    .separated_by(separators1())
                    .allow_trailing(),
            )
            .then_ignore(separators())
            .then_ignore(just(Token::CloseBracket))
            .map(Value::Sequence);

        let mapping = just(Token::OpenBrace)
            .ignore_then(separators())
            .ignore_then(entries(value))
            .then_ignore(separators())
            .then_ignore(just(Token::CloseBrace))
            .map(Value::Mapping);

        mapping.or(sequence).or(scalar).labelled("value")
    })
}

/// A whole document: a braced mapping, or the bare entries of one.
fn document() -> impl Parser<Token, Value, Error = ParserError> {
    let braced = just(Token::OpenBrace)
        .ignore_then(separators())
        .ignore_then(entries(value()))
        .then_ignore(separators())
        .then_ignore(just(Token::CloseBrace));
    let bare = entries(value());

    separators()
        .ignore_then(braced.or(bare))
        .then_ignore(separators())
        .then_ignore(end())
        .map(Value::Mapping)
}

/// Parse a token stream into a value tree.
pub fn parse_tokens(source: &str, tokens: Vec<TokenSpan>) -> Result<Value> {
    let eoi = source.len()..source.len() + 1;
    document()
        .parse(Stream::from_iter(eoi, tokens.into_iter()))
        .map_err(|errors| {
            let first = errors.into_iter().next();
            match first {
                Some(error) => to_exam_error(source, error),
                None => ExamError::Parse {
                    line: 1,
                    column: 1,
                    message: "invalid exam source".to_string(),
                },
            }
        })
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(token) => token.to_string(),
        None => "end of input".to_string(),
    }
}

fn to_exam_error(source: &str, error: ParserError) -> ExamError {
    let (line, column) = line_column(source, error.span().start);
    let message = match error.reason() {
        SimpleReason::Unclosed { delimiter, .. } => {
            format!("unclosed delimiter {}", delimiter)
        }
        SimpleReason::Custom(message) => message.clone(),
        SimpleReason::Unexpected => {
            let mut expected: Vec<String> = error
                .expected()
                .map(|token| describe(token.as_ref()))
                .collect();
            expected.sort();
            expected.dedup();
            if expected.is_empty() {
                format!("unexpected {}", describe(error.found()))
            } else {
                format!(
                    "unexpected {}, expected {}",
                    describe(error.found()),
                    expected.join(" or ")
                )
            }
        }
    };
    ExamError::Parse {
        line,
        column,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::notation::parse;

    fn mapping(source: &str) -> Data {
        match parse(source).unwrap() {
            Value::Mapping(data) => data,
            other => panic!("expected mapping, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(mapping("").is_empty());
        assert!(mapping("\n\n# only a comment\n").is_empty());
    }

    #[test]
    fn test_braced_document() {
        let data = mapping("{\n  name: Braced\n}\n");
        assert_eq!(data.get("name"), Some(&Value::from("Braced")));
    }

    #[test]
    fn test_commas_and_newlines_separate_entries() {
        let data = mapping("a: 1, b: 2\nc: 3,\n\nd: 4");
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_sequences() {
        let data = mapping("matrix: [[1, 0], [0, 1]]\nempty: []\nlines: [\n  one\n  two\n]");
        assert_eq!(
            data.get("matrix"),
            Some(&Value::Sequence(vec![
                Value::Sequence(vec![Value::from(1i64), Value::from(0i64)]),
                Value::Sequence(vec![Value::from(0i64), Value::from(1i64)]),
            ]))
        );
        assert_eq!(data.get("empty"), Some(&Value::Sequence(vec![])));
        assert_eq!(
            data.get("lines"),
            Some(&Value::Sequence(vec![Value::from("one"), Value::from("two")]))
        );
    }

    #[test]
    fn test_value_on_next_line() {
        let data = mapping("statement:\n  \"Long text\"");
        assert_eq!(data.get("statement"), Some(&Value::from("Long text")));
    }

    #[test]
    fn test_quoted_keys() {
        let data = mapping("\"Odd key\": 1");
        assert!(data.contains_key("odd key"));
    }

    #[test]
    fn test_missing_colon_is_reported() {
        let err = parse("name Test\nduration: 5").unwrap_err();
        assert!(matches!(err, ExamError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_unclosed_sequence_is_reported() {
        let err = parse("parts: [ { type: jme }").unwrap_err();
        assert!(matches!(err, ExamError::Parse { .. }));
    }

    #[test]
    fn test_scalar_from_text() {
        assert_eq!(scalar_from_text("None"), Value::Null);
        assert_eq!(scalar_from_text("False"), Value::Bool(false));
        assert_eq!(scalar_from_text("1e-4"), Value::from(0.0001));
        assert_eq!(scalar_from_text("sqrt(2)"), Value::from("sqrt(2)"));
    }
}
