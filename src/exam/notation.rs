//! Exam notation reader
//!
//!     The notation is a loose, indentation-free relative of JSON:
//!
//!         name: Algebra practice
//!         duration: 600                   # seconds
//!         navigation: { reverse: false, onadvance: { action: warn } }
//!         questions: [
//!             {
//!                 name: Expand
//!                 statement: "Expand <em>(x+1)^2</em>."
//!                 parts: [ { type: jme, answer: x^2+2x+1, marks: 2 } ]
//!             }
//!         ]
//!
//!     - Entries are separated by newlines and/or commas.
//!     - `{ }` is a mapping, `[ ]` a sequence; the top level is an unbraced
//!       (or braced) mapping.
//!     - Bare text runs to the next newline, `,`, `:`, `#` or bracket. It is
//!       read as an integer, float, `true`/`false` or `null`/`none` when it
//!       looks like one, otherwise as text. Anything containing those
//!       characters must be quoted with `"..."` or `'...'`.
//!     - `#` starts a comment.
//!
//!     Tokens come from logos (see [tokens]); the grammar is a chumsky parser
//!     (see [parser]).

pub mod parser;
pub mod tokens;

use crate::exam::error::{line_column, ExamError, Result};
use crate::exam::value::Value;
use logos::Logos;
use std::ops::Range;
use tokens::Token;

/// Token with its byte range in the source.
pub type TokenSpan = (Token, Range<usize>);

/// Tokenize the whole source, failing on the first unrecognized character.
pub fn tokenize(source: &str) -> Result<Vec<TokenSpan>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let (line, column) = line_column(source, lexer.span().start);
                return Err(ExamError::Parse {
                    line,
                    column,
                    message: format!("unexpected input {:?}", lexer.slice()),
                });
            }
        }
    }

    Ok(tokens)
}

/// Read exam notation into a value tree.
pub fn parse(source: &str) -> Result<Value> {
    let tokens = tokenize(source)?;
    tracing::trace!(tokens = tokens.len(), "tokenized exam source");
    parser::parse_tokens(source, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::value::Number;

    #[test]
    fn test_parse_reads_nested_structure() {
        let source = "name: Test\nquestions: [\n  { name: Q1, parts: [ { type: jme } ] }\n]\n";
        let value = parse(source).unwrap();
        let data = value.as_mapping().unwrap();
        assert_eq!(data.get("name"), Some(&Value::from("Test")));

        let questions = data.get("questions").unwrap().as_sequence().unwrap();
        assert_eq!(questions.len(), 1);
        let question = questions[0].as_mapping().unwrap();
        assert_eq!(question.get("NAME"), Some(&Value::from("Q1")));
    }

    #[test]
    fn test_parse_types_bare_scalars() {
        let value = parse("a: 5\nb: 0.5\nc: TRUE\nd: null\ne: x+1\nf: \"5\"").unwrap();
        let data = value.as_mapping().unwrap();
        assert_eq!(data.get("a"), Some(&Value::Number(Number::Int(5))));
        assert_eq!(data.get("b"), Some(&Value::Number(Number::Float(0.5))));
        assert_eq!(data.get("c"), Some(&Value::Bool(true)));
        assert_eq!(data.get("d"), Some(&Value::Null));
        assert_eq!(data.get("e"), Some(&Value::from("x+1")));
        assert_eq!(data.get("f"), Some(&Value::from("5")));
    }

    #[test]
    fn test_lexical_error_position() {
        let err = parse("name: ok\nstatement: \"never closed").unwrap_err();
        match err {
            ExamError::Parse { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 12);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
