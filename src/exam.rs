//! Exam compilation
//!
//!     The file structure :
//!     .
//!     ├── error.rs            # ExamError, the single error type of the pipeline
//!     ├── value.rs            # Value tree and the case-insensitive Data mapping
//!     ├── loader.rs           # copy-if-present attribute loading
//!     ├── notation            # exam notation reader (logos tokens + chumsky grammar)
//!     ├── model               # Exam, Question, Part variants and their children
//!     ├── markup              # element tree, content nodes, pretty-printer, writer
//!     └── config.rs           # layered configuration for the binary
//!
//!     Every stage only consumes the output of the previous one. Nothing reads
//!     back from a later stage and no state survives a conversion.

pub mod config;
pub mod error;
pub mod loader;
pub mod markup;
pub mod model;
pub mod notation;
pub mod value;

use crate::exam::config::OutputConfig;
use crate::exam::error::Result;
use crate::exam::markup::{indent, ToMarkup};
use crate::exam::model::Exam;

/// Compile exam notation source into a serialized XML document.
pub fn compile(source: &str, output: &OutputConfig) -> Result<String> {
    let exam = Exam::from_source(source)?;
    tracing::debug!(
        name = %exam.name,
        questions = exam.questions.len(),
        "built exam model"
    );

    let mut root = exam.to_markup()?;
    if output.pretty {
        indent::indent_with(&mut root, 0, &output.indent);
    }

    let mut document = String::new();
    if output.xml_declaration {
        document.push_str(markup::XML_DECLARATION);
        document.push('\n');
    }
    document.push_str(&root.to_xml_string());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_minimal_exam() {
        let xml = compile("name: Minimal", &OutputConfig::default()).unwrap();
        assert!(xml.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<exam "));
        assert!(xml.contains("name=\"Minimal\""));
        assert!(xml.ends_with("</exam>\n"));
    }

    #[test]
    fn test_compile_without_declaration_or_indentation() {
        let output = OutputConfig {
            xml_declaration: false,
            pretty: false,
            indent: "\t".to_string(),
        };
        let xml = compile("name: Flat", &output).unwrap();
        assert!(xml.starts_with("<exam "));
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn test_compile_surfaces_parse_errors() {
        let err = compile("name: [unclosed", &OutputConfig::default()).unwrap_err();
        assert!(matches!(err, crate::ExamError::Parse { .. }));
    }
}
