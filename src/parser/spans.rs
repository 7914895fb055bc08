//! Text span extraction from page content streams.
//!
//! Walks the text operators of a page (`Tf`, `Td`/`TD`, `Tm`, `TL`, `T*`,
//! `Tj`, `TJ`, `'`, `"`) and reports each shown string as a span with its
//! effective font size, style bits guessed from the font name, and an
//! approximate bounding box in top-down page coordinates.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{BBox, StyleFlags, TextSpan};

use super::backend::{ContentOp, Operand, PageId, PdfBackend};

/// TJ adjustment (thousandths of an em) read as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Average glyph width as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;

/// Height of the band within which baselines count as one line.
const LINE_TOLERANCE: f32 = 2.0;

/// Text matrix and line state for one text object.
#[derive(Debug, Clone)]
struct TextState {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextState {
    fn begin(&mut self) {
        let leading = self.leading;
        *self = Self {
            leading,
            ..Self::default()
        };
    }

    fn set_matrix(&mut self, m: [f32; 6]) {
        [self.a, self.b, self.c, self.d, self.e, self.f] = m;
        self.line_e = self.e;
        self.line_f = self.f;
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// Extracts spans from pages of one document.
pub struct SpanExtractor<'a, B: PdfBackend> {
    backend: &'a B,
}

impl<'a, B: PdfBackend> SpanExtractor<'a, B> {
    /// Create an extractor over a backend.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Spans of one page in reading order (top to bottom, left to right).
    pub fn page_spans(&self, page_num: u32, page_id: PageId) -> Result<Vec<TextSpan>> {
        let fonts = self.backend.page_fonts(page_id)?;
        let height = self.backend.page_height(page_id);
        let ops = self.backend.page_operations(page_id)?;

        let mut walker = PageWalker {
            backend: self.backend,
            page_num,
            page_id,
            height,
            fonts: &fonts,
            state: TextState::default(),
            font_key: Vec::new(),
            font_size: 12.0,
            flags: StyleFlags::empty(),
            in_text: false,
            spans: Vec::new(),
        };
        for op in &ops {
            walker.apply(op);
        }

        let mut spans = walker.spans;
        sort_reading_order(&mut spans);
        Ok(spans)
    }
}

struct PageWalker<'a, B: PdfBackend> {
    backend: &'a B,
    page_num: u32,
    page_id: PageId,
    height: f32,
    fonts: &'a BTreeMap<Vec<u8>, String>,
    state: TextState,
    font_key: Vec<u8>,
    font_size: f32,
    flags: StyleFlags,
    in_text: bool,
    spans: Vec<TextSpan>,
}

impl<B: PdfBackend> PageWalker<'_, B> {
    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "BT" => {
                self.in_text = true;
                self.state.begin();
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(Operand::Name(name)) = op.operands.first() {
                    let base_font = self
                        .fonts
                        .get(name)
                        .cloned()
                        .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
                    self.flags = StyleFlags::from_font_name(&base_font);
                    self.font_key = name.clone();
                }
                self.font_size = op.number(1).unwrap_or(12.0);
            }
            "TL" => self.state.leading = op.number(0).unwrap_or(0.0),
            "Td" => self.state.move_line(
                op.number(0).unwrap_or(0.0),
                op.number(1).unwrap_or(0.0),
            ),
            "TD" => {
                let ty = op.number(1).unwrap_or(0.0);
                self.state.leading = -ty;
                self.state.move_line(op.number(0).unwrap_or(0.0), ty);
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    self.state.set_matrix([
                        op.number(0).unwrap_or(1.0),
                        op.number(1).unwrap_or(0.0),
                        op.number(2).unwrap_or(0.0),
                        op.number(3).unwrap_or(1.0),
                        op.number(4).unwrap_or(0.0),
                        op.number(5).unwrap_or(0.0),
                    ]);
                }
            }
            "T*" => self.state.next_line(),
            "Tj" => {
                if let Some(Operand::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            "TJ" => {
                if let Some(Operand::Array(items)) = op.operands.first() {
                    let text = self.decode_array(items);
                    self.emit(text);
                }
            }
            "'" | "\"" => {
                self.state.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Operand::Str(bytes)) = op.operands.get(index) {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            _ => {}
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend.decode_text(self.page_id, &self.font_key, bytes)
    }

    /// Join the strings of a TJ array, turning wide gaps into spaces.
    fn decode_array(&self, items: &[Operand]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Operand::Str(bytes) => combined.push_str(&self.decode(bytes)),
                Operand::Number(n) => {
                    if -n > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(char::is_whitespace)
                    {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    fn emit(&mut self, text: String) {
        if !self.in_text || text.trim().is_empty() {
            return;
        }
        let size = self.font_size.abs() * self.state.scale();
        let x = self.state.e;
        let baseline = self.height - self.state.f;
        let width = text.chars().count() as f32 * size * GLYPH_WIDTH;

        // Advance so a following Tj on the same line starts after this text
        self.state.e += width;

        self.spans.push(
            TextSpan::new(text, size, self.page_num)
                .with_flags(self.flags)
                .with_bbox(BBox::new(x, baseline - size, x + width, baseline)),
        );
    }
}

/// Sort spans top to bottom, then left to right within a line.
fn sort_reading_order(spans: &mut [TextSpan]) {
    let line_band = |span: &TextSpan| (span.bbox.y1 / LINE_TOLERANCE).round() as i64;
    spans.sort_by(|a, b| {
        line_band(a)
            .cmp(&line_band(b))
            .then_with(|| a.bbox.x0.total_cmp(&b.bbox.x0))
    });
}
