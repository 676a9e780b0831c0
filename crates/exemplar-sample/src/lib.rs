//! Annotated HTML sample parser.
//!
//! Splits a pretty-printed HTML sample into sections of documentation, code
//! and live preview. Documentation lives in HTML comments, front-matter in
//! `<!--- --->` blocks and hints in `<!--~ ~-->` blocks.

pub mod classify;
pub mod dialect;
pub mod document;
pub mod highlight;
pub mod markdown;
pub mod metadata;
pub mod parser;
pub mod section;
pub mod sorting;
pub mod text;

pub use classify::{LineClassifier, TagScanner};
pub use dialect::{Dialect, ParserOptions};
pub use document::{AmpVariant, Document};
pub use highlight::Highlighter;
pub use metadata::Metadata;
pub use parser::{parse_sample, DocumentParser, ParseError};
pub use section::{CodeSection, Heading, SectionError};
pub use sorting::ElementSorting;
