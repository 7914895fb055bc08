//! JSON span dumps: the pages → blocks → lines → spans layout produced by
//! external PDF decoders.
//!
//! ```json
//! { "pages": [ { "blocks": [ { "lines": [ { "spans": [
//!     { "size": 18.0, "text": "Introduction", "flags": 16, "bbox": [72, 90, 190, 108] }
//! ] } ] } ] } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{StyleFlags, TextSpan};

use super::SpanSource;

/// A whole-document span dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanDump {
    pub pages: Vec<DumpPage>,
}

/// One page. Pages without a number are numbered by position, from 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default)]
    pub blocks: Vec<DumpBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpBlock {
    #[serde(default)]
    pub lines: Vec<DumpLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpLine {
    #[serde(default)]
    pub spans: Vec<DumpSpan>,
}

/// A span as written by the decoder: bold = 16, italic = 2 in `flags`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpSpan {
    pub size: f32,
    pub text: String,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub bbox: [f32; 4],
}

impl SpanDump {
    /// Parse a dump from JSON.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Flatten into spans, skipping whitespace-only text.
    pub fn into_spans(self) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        for (index, page) in self.pages.into_iter().enumerate() {
            let number = page.number.unwrap_or(index as u32 + 1);
            let dump_spans = page
                .blocks
                .into_iter()
                .flat_map(|b| b.lines)
                .flat_map(|l| l.spans);
            for span in dump_spans {
                if span.text.trim().is_empty() {
                    continue;
                }
                spans.push(
                    TextSpan::new(span.text, span.size, number)
                        .with_flags(StyleFlags::from_bits_truncate(span.flags))
                        .with_bbox(span.bbox.into()),
                );
            }
        }
        spans
    }

    /// Build a dump from spans, one block per page and one line per span.
    pub fn from_spans(spans: &[TextSpan]) -> Self {
        let mut pages: Vec<DumpPage> = Vec::new();
        for span in spans {
            let dump_span = DumpSpan {
                size: span.size,
                text: span.text.clone(),
                flags: span.flags.bits(),
                bbox: [span.bbox.x0, span.bbox.y0, span.bbox.x1, span.bbox.y1],
            };
            let same_page = pages.last().is_some_and(|p| p.number == Some(span.page));
            if !same_page {
                pages.push(DumpPage {
                    number: Some(span.page),
                    blocks: vec![DumpBlock::default()],
                });
            }
            if let Some(block) = pages.last_mut().and_then(|p| p.blocks.last_mut()) {
                block.lines.push(DumpLine {
                    spans: vec![dump_span],
                });
            }
        }
        Self { pages }
    }
}

/// Reads `.json` span dumps.
#[derive(Debug, Clone, Default)]
pub struct SpanDumpSource {
    _private: (),
}

impl SpanDumpSource {
    /// Create a span-dump source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl SpanSource for SpanDumpSource {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "span-dump"
    }

    fn read(&self, path: &Path) -> Result<Vec<TextSpan>> {
        let data = fs::read(path)?;
        self.read_bytes(&data)
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<TextSpan>> {
        Ok(SpanDump::from_json(bytes)?.into_spans())
    }
}
