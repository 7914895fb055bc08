//! # unoutline
//!
//! Title and heading outline inference for PDF documents.
//!
//! Given the text spans of a document (text with font size, style and
//! page), this library infers a title and an H1-H4 outline purely from
//! typographic evidence, suitable as a table of contents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unoutline::{extract_file, render, JsonFormat};
//!
//! fn main() -> unoutline::Result<()> {
//!     let doc = extract_file("document.pdf")?;
//!     println!("{}", render::to_json(&doc, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Noise tolerant**: repairs stuttered and echoed decoder output, drops
//!   page numbers, dates and status markers
//! - **Statistical baseline**: heading levels follow the size ratio to the
//!   document's body text, plus configurable cue phrases
//! - **Pluggable inputs**: PDF content streams or JSON span dumps
//! - **Batch processing**: parallel directory runs with Rayon, one failure
//!   boundary per document

pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;
pub mod structure;

// Re-export commonly used types
pub use batch::{BatchItem, BatchOptions, BatchRunner};
pub use error::{Error, Result};
pub use model::{
    file_stem, BBox, Document, HeadingLevel, OutlineEntry, Role, StyleFlags, TextBlock, TextSpan,
};
pub use parser::{ErrorMode, ParseOptions, PdfSpanParser};
pub use render::JsonFormat;
pub use source::{PdfSource, SourceRegistry, SpanDump, SpanDumpSource, SpanSource};
pub use structure::{
    CueSet, HeadingStrategy, NoiseFilter, OutlineExtractor, OutlineOptions, OutlineOrder,
};

use std::path::Path;
use std::sync::Arc;

/// Infer the outline of a file with default options.
///
/// The reader is chosen by extension (`.pdf` or `.json` span dump). Read
/// errors are returned; use [`BatchRunner`] to turn them into fallback
/// documents instead.
///
/// # Example
///
/// ```no_run
/// use unoutline::extract_file;
///
/// let doc = extract_file("file03.pdf").unwrap();
/// println!("{}: {} headings", doc.title, doc.heading_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Unoutline::new().extract_file(path)
}

/// Infer the outline of in-memory content of the given extension.
///
/// # Example
///
/// ```no_run
/// use unoutline::extract_bytes;
///
/// let data = std::fs::read("file03.pdf").unwrap();
/// let doc = extract_bytes(&data, "pdf", "file03").unwrap();
/// ```
pub fn extract_bytes(data: &[u8], ext: &str, stem: &str) -> Result<Document> {
    Unoutline::new().extract_bytes(data, ext, stem)
}

/// Infer the outline of already decoded spans.
///
/// Never fails; empty input yields `stem` as title and no headings.
pub fn extract_spans(spans: &[TextSpan], stem: &str) -> Document {
    OutlineExtractor::new().extract(spans, stem)
}

/// Convert a file to its JSON outline record.
///
/// # Example
///
/// ```no_run
/// use unoutline::{to_json, JsonFormat};
///
/// let json = to_json("file03.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("file03.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = extract_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for configuring outline extraction.
///
/// # Example
///
/// ```no_run
/// use unoutline::{CueSet, OutlineOrder, Unoutline};
///
/// let doc = Unoutline::new()
///     .with_cues(CueSet::digital_library_rfp())
///     .with_order(OutlineOrder::LevelMajor)
///     .extract_file("file03.pdf")?;
/// # Ok::<(), unoutline::Error>(())
/// ```
pub struct Unoutline {
    outline_options: OutlineOptions,
    parse_options: ParseOptions,
    batch_options: BatchOptions,
}

impl Unoutline {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self {
            outline_options: OutlineOptions::default(),
            parse_options: ParseOptions::default(),
            batch_options: BatchOptions::default(),
        }
    }

    /// Replace all outline options.
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Set the outline order.
    pub fn with_order(mut self, order: OutlineOrder) -> Self {
        self.outline_options = self.outline_options.with_order(order);
        self
    }

    /// Set the cue-phrase rules.
    pub fn with_cues(mut self, cues: CueSet) -> Self {
        self.outline_options = self.outline_options.with_cues(cues);
        self
    }

    /// Set the heading strategy.
    pub fn with_strategy(mut self, strategy: HeadingStrategy) -> Self {
        self.outline_options = self.outline_options.with_strategy(strategy);
        self
    }

    /// Set PDF parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Fail on the first unreadable PDF page.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Process batches one document at a time.
    pub fn sequential(mut self) -> Self {
        self.batch_options = self.batch_options.sequential();
        self
    }

    /// Set the JSON layout of batch records.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.batch_options = self.batch_options.with_format(format);
        self
    }

    fn registry(&self) -> SourceRegistry {
        let mut registry = SourceRegistry::with_defaults();
        registry.register(Arc::new(PdfSource::with_options(self.parse_options.clone())));
        registry
    }

    fn extractor(&self) -> OutlineExtractor {
        OutlineExtractor::with_options(self.outline_options.clone())
    }

    /// Infer the outline of a file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let spans = self.registry().read(path)?;
        Ok(self.extractor().extract(&spans, &file_stem(path)))
    }

    /// Infer the outline of in-memory content.
    pub fn extract_bytes(&self, data: &[u8], ext: &str, stem: &str) -> Result<Document> {
        let spans = self.registry().read_bytes(data, ext)?;
        Ok(self.extractor().extract(&spans, stem))
    }

    /// Infer the outline of decoded spans.
    pub fn extract_spans(&self, spans: &[TextSpan], stem: &str) -> Document {
        self.extractor().extract(spans, stem)
    }

    /// Build a batch runner with these options.
    pub fn batch(self) -> BatchRunner {
        let registry = self.registry();
        BatchRunner::new(OutlineExtractor::with_options(self.outline_options))
            .with_registry(registry)
            .with_options(self.batch_options)
    }
}

impl Default for Unoutline {
    fn default() -> Self {
        Self::new()
    }
}
