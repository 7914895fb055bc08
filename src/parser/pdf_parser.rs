//! PDF span reader built on lopdf.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::TextSpan;

use super::backend::{LopdfBackend, PdfBackend};
use super::options::{ErrorMode, ParseOptions};
use super::spans::SpanExtractor;

const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_LEN: usize = PDF_MAGIC.len() + 3;

/// Validate the `%PDF-x.y` header and return the version.
pub fn check_header(data: &[u8]) -> Result<String> {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    let version = String::from_utf8_lossy(&data[PDF_MAGIC.len()..HEADER_LEN]).into_owned();
    match version.as_bytes() {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(version),
        _ => Err(Error::UnsupportedVersion(version)),
    }
}

/// Reads text spans from a PDF document.
pub struct PdfSpanParser {
    backend: LopdfBackend,
    options: ParseOptions,
}

impl PdfSpanParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        File::open(path.as_ref())?
            .read_exact(&mut header)
            .map_err(|_| Error::UnknownFormat)?;
        check_header(&header)?;

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Read a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        check_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// PDF version from the header.
    pub fn version(&self) -> String {
        self.backend.version()
    }

    /// Extract all spans, page by page, in reading order.
    ///
    /// In lenient mode an unreadable page contributes no spans; in strict
    /// mode it fails the whole document.
    pub fn spans(&self) -> Result<Vec<TextSpan>> {
        if self.backend.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }

        let extractor = SpanExtractor::new(&self.backend);
        let mut spans = Vec::new();

        for (page_num, page_id) in self.backend.pages() {
            if !self.options.includes_page(page_num) {
                break;
            }
            match extractor.page_spans(page_num, page_id) {
                Ok(page_spans) => spans.extend(page_spans),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                }
            }
        }

        log::debug!(
            "Extracted {} spans from {} pages",
            spans.len(),
            self.page_count()
        );
        Ok(spans)
    }
}
