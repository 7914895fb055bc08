//! PDF span source.

use crate::error::Result;
use crate::model::TextSpan;
use crate::parser::{ParseOptions, PdfSpanParser};
use std::path::Path;

use super::SpanSource;

/// Reads spans from PDF content streams.
#[derive(Debug, Clone, Default)]
pub struct PdfSource {
    options: ParseOptions,
}

impl PdfSource {
    /// Create a PDF source with default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a PDF source with custom parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl SpanSource for PdfSource {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn read(&self, path: &Path) -> Result<Vec<TextSpan>> {
        PdfSpanParser::open_with_options(path, self.options.clone())?.spans()
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<TextSpan>> {
        PdfSpanParser::from_bytes_with_options(bytes, self.options.clone())?.spans()
    }
}
