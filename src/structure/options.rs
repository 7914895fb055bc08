//! Outline inference options and configuration.

use super::cues::CueSet;
use super::noise::NoiseFilter;

/// Shortest and longest allowed dedup prefix, in characters.
const DEDUP_PREFIX_RANGE: (usize, usize) = (30, 50);

/// Options for inferring a document outline.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// How blocks are assigned heading levels
    pub strategy: HeadingStrategy,

    /// Ordered cue-phrase rules (statistical strategy only)
    pub cues: CueSet,

    /// Final ordering of outline entries
    pub order: OutlineOrder,

    /// Boilerplate patterns dropped during normalization
    pub noise: NoiseFilter,

    /// Literal strings dropped from the outline (case-insensitive exact match)
    pub residual_noise: Vec<String>,

    /// Lowercase keywords that mark a title candidate
    pub title_keywords: Vec<String>,

    /// Number of leading characters compared when deduplicating headings
    pub dedup_prefix_len: usize,

    /// Minimum block length in characters
    pub min_block_len: usize,

    /// Maximum block length in characters
    pub max_block_len: usize,

    /// Spans whose size differs by less than this are merged into one block
    pub merge_size_tolerance: f32,

    /// Last page (1-indexed) that may contribute title candidates
    pub title_max_page: u32,

    /// Maximum length of a title candidate
    pub title_max_len: usize,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading strategy.
    pub fn with_strategy(mut self, strategy: HeadingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use the fixed-threshold strategy with its default cutoffs.
    pub fn fixed_thresholds(mut self) -> Self {
        self.strategy = HeadingStrategy::FixedThresholds(FixedThresholds::default());
        self
    }

    /// Set the cue-phrase rules.
    pub fn with_cues(mut self, cues: CueSet) -> Self {
        self.cues = cues;
        self
    }

    /// Set the outline order.
    pub fn with_order(mut self, order: OutlineOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the noise filter.
    pub fn with_noise_filter(mut self, noise: NoiseFilter) -> Self {
        self.noise = noise;
        self
    }

    /// Add a literal string to drop from the outline.
    pub fn with_residual_noise(mut self, literal: impl Into<String>) -> Self {
        self.residual_noise.push(literal.into().to_lowercase());
        self
    }

    /// Replace the title keywords.
    pub fn with_title_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_keywords = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    /// Set the dedup prefix length (clamped to 30..=50).
    pub fn with_dedup_prefix(mut self, len: usize) -> Self {
        self.dedup_prefix_len = len.clamp(DEDUP_PREFIX_RANGE.0, DEDUP_PREFIX_RANGE.1);
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            strategy: HeadingStrategy::Statistical,
            cues: CueSet::standard(),
            order: OutlineOrder::PageMajor,
            noise: NoiseFilter::default(),
            residual_noise: Vec::new(),
            title_keywords: ["rfp", "request for proposal", "proposal", "digital library"]
                .into_iter()
                .map(String::from)
                .collect(),
            dedup_prefix_len: DEDUP_PREFIX_RANGE.0,
            min_block_len: 3,
            max_block_len: 200,
            merge_size_tolerance: 1.0,
            title_max_page: 3,
            title_max_len: 150,
        }
    }
}

/// Heading assignment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HeadingStrategy {
    /// Body-size baseline, cue phrases and size ratios
    #[default]
    Statistical,
    /// Absolute point-size cutoffs
    FixedThresholds(FixedThresholds),
}

/// Point-size cutoffs for [`HeadingStrategy::FixedThresholds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedThresholds {
    /// Minimum size for H1
    pub h1: f32,
    /// Minimum size for H2
    pub h2: f32,
    /// Minimum size for H3
    pub h3: f32,
    /// Minimum heading length in characters
    pub min_heading_len: usize,
}

impl Default for FixedThresholds {
    fn default() -> Self {
        Self {
            h1: 18.0,
            h2: 14.0,
            h3: 12.0,
            min_heading_len: 4,
        }
    }
}

/// Ordering of the final outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineOrder {
    /// Reading order: page, then level
    #[default]
    PageMajor,
    /// Grouped by level, then page
    LevelMajor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = OutlineOptions::default();
        assert_eq!(options.strategy, HeadingStrategy::Statistical);
        assert_eq!(options.order, OutlineOrder::PageMajor);
        assert_eq!(options.dedup_prefix_len, 30);
        assert_eq!(options.max_block_len, 200);
        assert!(!options.cues.is_empty());
    }

    #[test]
    fn test_options_builder() {
        let options = OutlineOptions::new()
            .with_order(OutlineOrder::LevelMajor)
            .with_dedup_prefix(80)
            .with_title_keywords(["Annual", "REPORT", ""])
            .with_residual_noise("March 21, 2003")
            .fixed_thresholds();

        assert_eq!(options.order, OutlineOrder::LevelMajor);
        assert_eq!(options.dedup_prefix_len, 50);
        assert_eq!(options.title_keywords, vec!["annual", "report"]);
        assert_eq!(options.residual_noise, vec!["march 21, 2003"]);
        assert!(matches!(
            options.strategy,
            HeadingStrategy::FixedThresholds(t) if t.h1 == 18.0
        ));
    }

    #[test]
    fn test_dedup_prefix_lower_clamp() {
        let options = OutlineOptions::new().with_dedup_prefix(5);
        assert_eq!(options.dedup_prefix_len, 30);
    }
}
