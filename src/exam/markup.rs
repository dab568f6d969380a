//! Markup assembly
//!
//!     The exam model is lowered into an ElementTree-style [`Element`] tree and
//!     then written out as text. The pieces:
//!
//!     - [`tree`]: the skeleton builder every writer starts from
//!     - [`content`]: escaping and reading of text fields into content nodes
//!     - [`format`]: attribute value conventions (`True`/`False`, `n%`)
//!     - [`indent`]: the whitespace-only pretty-printer
//!     - [`writer`]: [`ToMarkup`] for every model type
//!
//!     Whitespace lives in element `text` and `tail`, the same places the
//!     player's own parser will put it, so pretty-printing is a pure rewrite of
//!     blank text and never touches meaningful content.

pub mod content;
pub mod element;
pub mod format;
pub mod indent;
pub mod tree;
pub mod writer;

pub use element::Element;
pub use tree::Skeleton;
pub use writer::ToMarkup;

/// First line of every written document when the declaration is enabled.
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>";
