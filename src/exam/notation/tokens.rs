//! Token definitions for the exam notation
//!
//! Tokenization is handled entirely by logos. Quoted strings are unescaped
//! while lexing; bare text keeps its raw slice (minus trailing blanks) so the
//! grammar can decide whether it is a number, a boolean or plain text.

use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("\n")]
    Newline,

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unescape(lex.slice()))]
    Quoted(String),

    // Anything else up to the next structural character or comment
    #[regex(r#"[^\s{}\[\]:,"'#][^{}\[\]:,\n#]*"#, |lex| lex.slice().trim_end().to_string())]
    Text(String),
}

impl Token {
    /// Newlines and commas both separate entries.
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Newline | Token::Comma)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenBrace => write!(f, "'{{'"),
            Token::CloseBrace => write!(f, "'}}'"),
            Token::OpenBracket => write!(f, "'['"),
            Token::CloseBracket => write!(f, "']'"),
            Token::Colon => write!(f, "':'"),
            Token::Comma => write!(f, "','"),
            Token::Newline => write!(f, "end of line"),
            Token::Quoted(s) => write!(f, "quoted text {:?}", s),
            Token::Text(s) => write!(f, "text {:?}", s),
        }
    }
}

/// Strip the surrounding quotes and resolve backslash escapes.
fn unescape(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exam::notation::tokenize;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_pair_tokens() {
        assert_eq!(
            kinds("name: My exam"),
            vec![
                Token::Text("name".to_string()),
                Token::Colon,
                Token::Text("My exam".to_string()),
            ]
        );
    }

    #[test]
    fn test_structural_tokens() {
        assert_eq!(
            kinds("{ [ ] }\n,"),
            vec![
                Token::OpenBrace,
                Token::OpenBracket,
                Token::CloseBracket,
                Token::CloseBrace,
                Token::Newline,
                Token::Comma,
            ]
        );
    }

    #[test]
    fn test_quoted_strings_unescape() {
        assert_eq!(
            kinds(r#""say \"hi\"" 'it\'s'"#),
            vec![
                Token::Quoted("say \"hi\"".to_string()),
                Token::Quoted("it's".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_string_spans_lines() {
        assert_eq!(
            kinds("\"<p>one</p>\n<p>two</p>\""),
            vec![Token::Quoted("<p>one</p>\n<p>two</p>".to_string())]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("duration: 60 # one minute\n"),
            vec![
                Token::Text("duration".to_string()),
                Token::Colon,
                Token::Text("60".to_string()),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        assert!(tokenize("name: \"open").is_err());
    }
}
