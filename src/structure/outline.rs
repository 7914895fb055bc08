//! Outline assembly: deduplication, residual noise and ordering.

use std::collections::HashSet;

use regex::Regex;
use std::sync::OnceLock;

use crate::model::{ClassifiedBlock, HeadingLevel, OutlineEntry};

use super::options::{OutlineOptions, OutlineOrder};

fn bare_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}$").unwrap())
}

/// Builds the final outline from classified blocks.
pub struct OutlineBuilder<'a> {
    options: &'a OutlineOptions,
}

impl<'a> OutlineBuilder<'a> {
    /// Create a builder from outline options.
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self { options }
    }

    /// Collect heading blocks into ordered, unique outline entries.
    pub fn build(&self, blocks: &[ClassifiedBlock]) -> Vec<OutlineEntry> {
        let mut seen: HashSet<(HeadingLevel, String)> = HashSet::new();
        let mut outline = Vec::new();

        for classified in blocks {
            let Some(level) = classified.role.heading_level() else {
                continue;
            };
            let text = &classified.block.text;
            if self.is_residual_noise(text) {
                continue;
            }
            if seen.insert((level, self.dedup_key(text))) {
                outline.push(OutlineEntry::new(level, text.clone(), classified.block.page));
            }
        }

        sort_outline(&mut outline, self.options.order);
        outline
    }

    /// Lowercased leading characters compared when deduplicating.
    pub fn dedup_key(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .take(self.options.dedup_prefix_len)
            .collect()
    }

    fn is_residual_noise(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if bare_year().is_match(trimmed) {
            return true;
        }
        let lower = trimmed.to_lowercase();
        self.options.residual_noise.iter().any(|literal| *literal == lower)
    }
}

/// Stable sort so equal keys keep reading order.
pub fn sort_outline(outline: &mut [OutlineEntry], order: OutlineOrder) {
    match order {
        OutlineOrder::PageMajor => outline.sort_by_key(|e| (e.page, e.level)),
        OutlineOrder::LevelMajor => outline.sort_by_key(|e| (e.level, e.page)),
    }
}
