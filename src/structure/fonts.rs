//! Font size statistics for heading detection.

use indexmap::IndexMap;

use crate::model::TextBlock;

/// Number of common sizes kept in a profile.
const COMMON_SIZES: usize = 5;

/// Histogram of observed font sizes.
///
/// Sizes are rounded to 0.1pt and kept in first-seen order, so frequency
/// ties resolve to the size encountered first.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    size_histogram: IndexMap<i32, usize>,
}

impl FontStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics over a document's blocks.
    pub fn from_blocks(blocks: &[TextBlock]) -> Self {
        let mut stats = Self::new();
        for block in blocks {
            stats.add_size(block.size);
        }
        stats
    }

    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        if !size.is_finite() || size <= 0.0 {
            return;
        }
        let key = (size * 10.0).round() as i32; // Round to 0.1 precision
        *self.size_histogram.entry(key).or_insert(0) += 1;
    }

    /// Number of observations.
    pub fn total(&self) -> usize {
        self.size_histogram.values().sum()
    }

    /// Derive the body size and the most common sizes.
    pub fn profile(&self) -> FontProfile {
        let mut ranked: Vec<(i32, usize)> = self
            .size_histogram
            .iter()
            .map(|(key, count)| (*key, *count))
            .collect();
        // Stable: equal counts keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let common_sizes: Vec<f32> = ranked
            .iter()
            .take(COMMON_SIZES)
            .map(|(key, _)| *key as f32 / 10.0)
            .collect();

        FontProfile {
            body_size: common_sizes.first().copied(),
            common_sizes,
        }
    }
}

/// Font baseline of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontProfile {
    /// Most frequent size, or `None` for a document without text
    pub body_size: Option<f32>,
    /// Up to five sizes, most frequent first
    pub common_sizes: Vec<f32>,
}

impl FontProfile {
    /// Ratio of a size to the body size; 1.0 when no baseline is known.
    pub fn size_ratio(&self, size: f32) -> f32 {
        match self.body_size {
            Some(body) if body > 0.0 && size.is_finite() => size / body,
            _ => 1.0,
        }
    }
}
