//! Data model for outline inference.
//!
//! Spans come in from a decoder, blocks are the normalized intermediate
//! form, and [`Document`] is the final title + outline record.

mod block;
mod document;
mod span;

pub use block::{ClassifiedBlock, HeadingLevel, Role, TextBlock};
pub use document::{file_stem, Document, OutlineEntry, UNTITLED};
pub use span::{BBox, StyleFlags, TextSpan};
