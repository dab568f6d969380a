//! Error types for exam compilation

/// Errors raised while turning exam notation into XML.
///
/// Every variant is fatal to the conversion: the pipeline is a pure function
/// of its input, so nothing is retried and no partial document is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExamError {
    /// The notation source could not be tokenized or parsed.
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// A part's `type` field named no known part variant.
    #[error("Invalid part type {kind}\nPossible fix: {hint}")]
    InvalidPartType { kind: String, hint: String },

    /// A field the model cannot do without was absent.
    #[error("Missing field '{key}' in {context}")]
    MissingField { key: String, context: String },

    /// A field was present but its value cannot be read as the field's type.
    #[error("Field '{key}' should be {expected}, found {found}")]
    FieldType {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// Inline content did not parse as markup once escaped and wrapped.
    #[error("Malformed content: {message}\n{text}")]
    MalformedContent { text: String, message: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExamError>;

/// Convert a byte offset into a 1-based (line, column) pair.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}
