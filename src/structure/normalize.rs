//! Turning raw spans into normalized text blocks.

use crate::model::{StyleFlags, TextBlock, TextSpan};

use super::noise::NoiseFilter;
use super::options::OutlineOptions;
use super::repair::normalize_text;

/// Cleans, repairs, filters and merges spans into blocks.
pub struct TextNormalizer<'a> {
    noise: &'a NoiseFilter,
    min_len: usize,
    max_len: usize,
    size_tolerance: f32,
}

/// A block still accepting spans.
struct PendingBlock {
    size: f32,
    page: u32,
    text: String,
    chars: usize,
    bold_chars: usize,
    italic_chars: usize,
}

impl PendingBlock {
    fn start(span: &TextSpan, text: String) -> Self {
        let mut block = Self {
            size: span.size,
            page: span.page,
            text: String::new(),
            chars: 0,
            bold_chars: 0,
            italic_chars: 0,
        };
        block.push(&text, span.flags);
        block
    }

    /// Same page, similar size, and the joined text stays within bounds.
    fn accepts(&self, span: &TextSpan, text_len: usize, tolerance: f32, max_len: usize) -> bool {
        span.page == self.page
            && (span.size - self.size).abs() < tolerance
            && self.chars + 1 + text_len <= max_len
    }

    fn push(&mut self, text: &str, flags: StyleFlags) {
        let len = text.chars().count();
        if !self.text.is_empty() {
            self.text.push(' ');
            self.chars += 1;
        }
        self.text.push_str(text);
        self.chars += len;
        if flags.is_bold() {
            self.bold_chars += len;
        }
        if flags.is_italic() {
            self.italic_chars += len;
        }
    }

    /// Style bits carried by more than half of the characters.
    fn flags(&self) -> StyleFlags {
        let mut flags = StyleFlags::empty();
        if self.bold_chars * 2 > self.chars {
            flags |= StyleFlags::BOLD;
        }
        if self.italic_chars * 2 > self.chars {
            flags |= StyleFlags::ITALIC;
        }
        flags
    }
}

impl<'a> TextNormalizer<'a> {
    /// Create a normalizer from outline options.
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self {
            noise: &options.noise,
            min_len: options.min_block_len,
            max_len: options.max_block_len,
            size_tolerance: options.merge_size_tolerance,
        }
    }

    /// Normalize spans in reading order into blocks.
    ///
    /// Never fails: spans that are empty, boilerplate or overlong after
    /// cleaning are dropped.
    pub fn normalize(&self, spans: &[TextSpan]) -> Vec<TextBlock> {
        let mut blocks = Vec::new();
        let mut current: Option<PendingBlock> = None;
        let mut dropped = 0usize;

        for span in spans {
            let text = normalize_text(&span.text);
            let len = text.chars().count();
            if len == 0 || len > self.max_len || self.noise.is_noise(&text) {
                dropped += 1;
                continue;
            }

            let joins = current
                .as_ref()
                .is_some_and(|p| p.accepts(span, len, self.size_tolerance, self.max_len));

            if joins {
                if let Some(pending) = current.as_mut() {
                    pending.push(&text, span.flags);
                }
            } else if let Some(done) = current.replace(PendingBlock::start(span, text)) {
                blocks.extend(self.finish(done));
            }
        }

        if let Some(done) = current {
            blocks.extend(self.finish(done));
        }

        log::debug!(
            "Normalized {} spans into {} blocks ({} dropped)",
            spans.len(),
            blocks.len(),
            dropped
        );

        blocks
    }

    /// Re-normalize the joined text and apply the length bounds.
    fn finish(&self, pending: PendingBlock) -> Option<TextBlock> {
        let flags = pending.flags();
        let text = normalize_text(&pending.text);
        let len = text.chars().count();
        if len < self.min_len || len > self.max_len || self.noise.is_noise(&text) {
            return None;
        }
        Some(TextBlock::new(text, pending.size, pending.page, flags))
    }
}
