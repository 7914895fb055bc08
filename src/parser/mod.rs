//! PDF parsing module: content streams to text spans.

mod backend;
mod options;
mod pdf_parser;
mod spans;

pub use backend::{decode_text_simple, ContentOp, LopdfBackend, Operand, PageId, PdfBackend};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::{check_header, PdfSpanParser};
pub use spans::SpanExtractor;
