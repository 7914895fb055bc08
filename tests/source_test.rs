//! Integration tests for span sources and the source registry.

use std::path::Path;
use std::sync::Arc;
use unoutline::error::{Error, Result};
use unoutline::source::{PdfSource, SourceRegistry, SpanDump, SpanDumpSource, SpanSource};
use unoutline::{ErrorMode, ParseOptions, TextSpan};

/// Mock source for testing.
struct MockSource {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockSource {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl SpanSource for MockSource {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn read(&self, _path: &Path) -> Result<Vec<TextSpan>> {
        Ok(vec![TextSpan::new(format!("Read by {}", self.name), 12.0, 1)])
    }

    fn read_bytes(&self, _bytes: &[u8]) -> Result<Vec<TextSpan>> {
        Ok(vec![TextSpan::new(format!("Bytes read by {}", self.name), 12.0, 1)])
    }
}

#[test]
fn test_source_registry_new() {
    let registry = SourceRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("pdf"));
    assert!(!registry.supports("json"));
}

#[test]
fn test_source_registry_with_defaults() {
    let registry = SourceRegistry::with_defaults();

    assert!(registry.supports("pdf"));
    assert!(registry.supports("PDF")); // Case insensitive
    assert!(registry.supports("json"));
    assert!(!registry.supports("docx"));
    assert_eq!(registry.supported_extensions(), ["json", "pdf"]);
}

#[test]
fn test_source_registry_register() {
    let mut registry = SourceRegistry::new();
    registry.register(Arc::new(MockSource::new(vec!["txt", "text"], "text")));

    assert!(registry.supports("txt"));
    assert!(registry.supports("TEXT"));
    assert!(registry.supports_path(Path::new("/in/notes.Txt")));
    assert!(!registry.supports_path(Path::new("/in/noextension")));
}

#[test]
fn test_source_registry_lookup() {
    let registry = SourceRegistry::with_defaults();

    assert_eq!(registry.get_by_extension("pdf").unwrap().name(), "pdf");
    assert_eq!(registry.get_by_extension("json").unwrap().name(), "span-dump");
    assert!(registry.get_by_extension("docx").is_none());

    assert!(registry.get_by_name("SPAN-DUMP").is_some());
    assert!(registry.get_by_name("unknown").is_none());
}

#[test]
fn test_later_registration_wins() {
    let mut registry = SourceRegistry::with_defaults();
    registry.register(Arc::new(MockSource::new(vec!["pdf"], "mock-pdf")));

    let spans = registry.read(Path::new("report.pdf")).unwrap();
    assert_eq!(spans[0].text, "Read by mock-pdf");

    let spans = registry.read_bytes(b"", "PDF").unwrap();
    assert_eq!(spans[0].text, "Bytes read by mock-pdf");
}

#[test]
fn test_registry_read_unsupported_extension() {
    let registry = SourceRegistry::with_defaults();

    let result = registry.read(Path::new("noextension"));
    assert!(matches!(result, Err(Error::UnsupportedExtension(ext)) if ext.is_empty()));

    let result = registry.read(Path::new("test.xyz"));
    assert!(matches!(result, Err(Error::UnsupportedExtension(ext)) if ext == "xyz"));

    let result = registry.read_bytes(b"test", "xyz");
    assert!(result.is_err());
}

#[test]
fn test_pdf_source() {
    let source = PdfSource::new();

    assert_eq!(source.supported_extensions(), &["pdf"]);
    assert!(source.supports_extension("PDF"));
    assert!(!source.supports_extension("json"));
    assert_eq!(source.name(), "pdf");

    assert!(matches!(source.read_bytes(b"not a pdf"), Err(Error::UnknownFormat)));
}

#[test]
fn test_pdf_source_with_options() {
    let options = ParseOptions::new().strict().with_max_pages(2);
    assert_eq!(options.error_mode, ErrorMode::Strict);

    let source = PdfSource::with_options(options);
    assert!(source.read_bytes(b"%PDF-1.4\ngarbage").is_err());
}

#[test]
fn test_span_dump_source() {
    let dump = br#"{
        "pages": [
            { "blocks": [ { "lines": [ { "spans": [
                { "size": 18.0, "text": "Introduction", "flags": 16, "bbox": [72, 90, 190, 108] },
                { "size": 10.0, "text": "First paragraph." }
            ] } ] } ] },
            { "blocks": [ { "lines": [ { "spans": [
                { "size": 10.0, "text": "Second page.", "flags": 2 }
            ] } ] } ] }
        ]
    }"#;

    let spans = SpanDumpSource::new().read_bytes(dump).unwrap();
    assert_eq!(spans.len(), 3);
    assert!(spans[0].flags.is_bold());
    assert_eq!(spans[0].bbox.width(), 118.0);
    assert_eq!(spans[2].page, 2);
    assert!(spans[2].flags.is_italic());
}

#[test]
fn test_span_dump_from_spans() {
    let spans = vec![
        TextSpan::new("Title Page", 20.0, 1).bold(),
        TextSpan::new("Opening text", 10.0, 1),
        TextSpan::new("Next page", 10.0, 3).italic(),
    ];

    let dump = SpanDump::from_spans(&spans);
    assert_eq!(dump.pages.len(), 2);
    assert_eq!(dump.pages[0].number, Some(1));
    assert_eq!(dump.pages[0].blocks[0].lines.len(), 2);
    assert_eq!(dump.pages[1].number, Some(3));

    assert_eq!(dump.into_spans(), spans);
}

#[test]
fn test_span_dump_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file01.json");
    let dump = SpanDump::from_spans(&[TextSpan::new("Only Line", 12.0, 1)]);
    std::fs::write(&path, serde_json::to_string(&dump).unwrap()).unwrap();

    let spans = SourceRegistry::with_defaults().read(&path).unwrap();
    assert_eq!(spans, vec![TextSpan::new("Only Line", 12.0, 1)]);
}
