//! PDF backend abstraction layer.
//!
//! The span extractor only talks to [`PdfBackend`], which hides the
//! concrete PDF library (lopdf) behind plain Rust types.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = ObjectId;

/// US Letter height, used when a page carries no MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// An operand of a content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<Operand>),
    Other,
}

impl Operand {
    /// Numeric value, if any.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// One operation of a page content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<Operand>,
}

impl ContentOp {
    /// Numeric operand at `index`, if present.
    pub fn number(&self, index: usize) -> Option<f32> {
        self.operands.get(index).and_then(Operand::as_number)
    }
}

/// Access to the parts of a PDF needed to recover text spans.
pub trait PdfBackend {
    /// Pages in document order (1-indexed page number to id).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Base font names keyed by the page's font resource names.
    fn page_fonts(&self, page: PageId) -> Result<BTreeMap<Vec<u8>, String>>;

    /// Page height in points.
    fn page_height(&self, page: PageId) -> f32;

    /// Decoded content stream operations of a page.
    fn page_operations(&self, page: PageId) -> Result<Vec<ContentOp>>;

    /// Decode a string operand shown with the given font resource.
    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String;
}

/// Decode string bytes without font information.
///
/// Tries UTF-16BE (with BOM), then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// PDF version string from the header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn stream_content(&self, id: ObjectId) -> Result<Vec<u8>> {
        match self.doc.get_object(id)? {
            Object::Stream(stream) => Ok(stream.decompressed_content()?),
            _ => Err(Error::PdfParse(format!(
                "Content object {} {} is not a stream",
                id.0, id.1
            ))),
        }
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page)?;
        match page_dict.get(b"Contents")? {
            Object::Reference(id) => self.stream_content(*id),
            Object::Array(parts) => {
                // Concatenated streams; a broken part only loses its own text
                let mut content = Vec::new();
                for part in parts {
                    if let Object::Reference(id) = part {
                        match self.stream_content(*id) {
                            Ok(data) => {
                                content.extend_from_slice(&data);
                                content.push(b'\n');
                            }
                            Err(e) => log::debug!("Skipping content part: {}", e),
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<BTreeMap<Vec<u8>, String>> {
        let fonts = self.doc.get_page_fonts(page)?;
        Ok(fonts
            .into_iter()
            .map(|(name, dict)| {
                let base_font = dict
                    .get(b"BaseFont")
                    .and_then(Object::as_name)
                    .map(|n| String::from_utf8_lossy(n).into_owned())
                    .unwrap_or_default();
                (name, base_font)
            })
            .collect())
    }

    fn page_height(&self, page: PageId) -> f32 {
        self.doc
            .get_dictionary(page)
            .and_then(|dict| dict.get(b"MediaBox"))
            .and_then(Object::as_array)
            .ok()
            .and_then(|media_box| {
                let y0 = media_box.get(1)?.as_float().ok()?;
                let y1 = media_box.get(3)?.as_float().ok()?;
                Some((y1 - y0).abs())
            })
            .filter(|h| *h > 0.0)
            .unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    fn page_operations(&self, page: PageId) -> Result<Vec<ContentOp>> {
        let data = self.page_content(page)?;
        let content = lopdf::content::Content::decode(&data)?;
        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(to_operand).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String {
        let decoded = self.doc.get_page_fonts(page).ok().and_then(|fonts| {
            let encoding = fonts.get(font)?.get_font_encoding(&self.doc).ok()?;
            LopdfDocument::decode_text(&encoding, bytes).ok()
        });
        decoded.unwrap_or_else(|| decode_text_simple(bytes))
    }
}

fn to_operand(obj: &Object) -> Operand {
    match obj {
        Object::Integer(i) => Operand::Number(*i as f32),
        Object::Real(r) => Operand::Number(*r),
        Object::Name(n) => Operand::Name(n.clone()),
        Object::String(bytes, _) => Operand::Str(bytes.clone()),
        Object::Array(items) => Operand::Array(items.iter().map(to_operand).collect()),
        _ => Operand::Other,
    }
}
