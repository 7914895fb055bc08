//! Span sources: pluggable readers that turn input files into text spans.
//!
//! A [`SourceRegistry`] maps file extensions to [`SpanSource`]s so the batch
//! runner can pick the right reader per file.
//!
//! # Example
//!
//! ```no_run
//! use unoutline::source::SourceRegistry;
//! use std::path::Path;
//!
//! fn main() -> unoutline::Result<()> {
//!     let registry = SourceRegistry::with_defaults();
//!     let spans = registry.read(Path::new("document.pdf"))?;
//!     println!("{} spans", spans.len());
//!     Ok(())
//! }
//! ```

mod dump;
mod pdf;

pub use dump::{DumpBlock, DumpLine, DumpPage, DumpSpan, SpanDump, SpanDumpSource};
pub use pdf::PdfSource;

use crate::error::{Error, Result};
use crate::model::TextSpan;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// A reader producing spans for one kind of input.
///
/// Implement this trait to support another input format.
pub trait SpanSource: Send + Sync {
    /// Lowercase extensions without the leading dot (e.g. `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Name of this source.
    fn name(&self) -> &str;

    /// Read the spans of a file, pages 1-indexed and in reading order.
    fn read(&self, path: &Path) -> Result<Vec<TextSpan>>;

    /// Read spans from in-memory content.
    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<TextSpan>>;

    /// Check if this source handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry of span sources keyed by extension and name.
pub struct SourceRegistry {
    by_extension: HashMap<String, Arc<dyn SpanSource>>,
    by_name: HashMap<String, Arc<dyn SpanSource>>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Registry with the PDF and span-dump sources.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfSource::new()));
        registry.register(Arc::new(SpanDumpSource::new()));
        registry
    }

    /// Register a source for all of its extensions.
    ///
    /// A later registration replaces an earlier one for the same extension.
    pub fn register(&mut self, source: Arc<dyn SpanSource>) {
        for ext in source.supported_extensions() {
            self.by_extension.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Source for a file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn SpanSource>> {
        self.by_extension.get(&ext.to_lowercase()).cloned()
    }

    /// Source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn SpanSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Whether an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Whether a path has a supported extension.
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.supports(ext))
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.by_extension.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Read a file with the source registered for its extension.
    pub fn read(&self, path: &Path) -> Result<Vec<TextSpan>> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))?;
        log::debug!("Reading {} with the {} source", path.display(), source.name());
        source.read(path)
    }

    /// Read bytes with the source registered for `ext`.
    pub fn read_bytes(&self, bytes: &[u8], ext: &str) -> Result<Vec<TextSpan>> {
        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))?;
        source.read_bytes(bytes)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
