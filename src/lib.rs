//! # examxml
//!
//! Compiles exam definitions written in the exam notation into the XML
//! document consumed by the assessment player.
//!
//! The pipeline runs strictly one way:
//!
//!     notation text  →  Value tree  →  domain model  →  XML element tree  →  text
//!
//! See the [exam module](exam) for the layout of the individual stages.

pub mod exam;

pub use exam::compile;
pub use exam::error::{ExamError, Result};
