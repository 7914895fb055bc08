//! End-to-end outline extraction for one document.

use crate::model::{Document, TextBlock, TextSpan};

use super::classify::HeadingClassifier;
use super::fonts::{FontProfile, FontStatistics};
use super::normalize::TextNormalizer;
use super::options::OutlineOptions;
use super::outline::OutlineBuilder;
use super::title::TitleSelector;

/// Infers a title and outline from the spans of one document.
///
/// Holds only configuration, so a single extractor can serve many
/// documents, including from several threads at once.
///
/// # Example
///
/// ```
/// use unoutline::structure::OutlineExtractor;
/// use unoutline::TextSpan;
///
/// let spans = vec![
///     TextSpan::new("Request for Proposal: Digital Library Services", 24.0, 1),
///     TextSpan::new("Body text of the proposal.", 11.0, 1),
///     TextSpan::new("2.1 Intended Audience", 11.0, 2),
/// ];
/// let doc = OutlineExtractor::new().extract(&spans, "rfp");
/// assert_eq!(doc.title, "Request for Proposal: Digital Library Services");
/// assert_eq!(doc.outline[0].text, "2.1 Intended Audience");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Normalize spans into blocks.
    pub fn normalize(&self, spans: &[TextSpan]) -> Vec<TextBlock> {
        TextNormalizer::new(&self.options).normalize(spans)
    }

    /// Font baseline of a set of blocks.
    pub fn profile(&self, blocks: &[TextBlock]) -> FontProfile {
        FontStatistics::from_blocks(blocks).profile()
    }

    /// Infer the document structure.
    ///
    /// Never fails: a document without usable text yields the stem as
    /// title and an empty outline.
    pub fn extract(&self, spans: &[TextSpan], stem: &str) -> Document {
        let blocks = self.normalize(spans);
        if blocks.is_empty() {
            log::debug!("No text blocks in '{}', using fallback", stem);
            return Document::fallback(stem);
        }

        let profile = self.profile(&blocks);
        log::debug!(
            "Font profile for '{}': body={:?}, common={:?}",
            stem,
            profile.body_size,
            profile.common_sizes
        );

        let selector = TitleSelector::new(&self.options);
        let candidates = selector.candidates(&blocks);
        let title = selector.select(&candidates, stem);

        let classified = HeadingClassifier::new(&profile, &self.options).classify_all(blocks);
        let outline = OutlineBuilder::new(&self.options).build(&classified);

        log::debug!("'{}': {} outline entries", stem, outline.len());

        Document::new(title, outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_falls_back() {
        let doc = OutlineExtractor::new().extract(&[], "file01");
        assert_eq!(doc, Document::fallback("file01"));
    }

    #[test]
    fn test_noise_only_input_falls_back() {
        let spans = vec![
            TextSpan::new("1", 10.0, 1),
            TextSpan::new("Page 2 of 3", 10.0, 2),
            TextSpan::new("2024", 10.0, 3),
        ];
        let doc = OutlineExtractor::new().extract(&spans, "");
        assert_eq!(doc.title, crate::model::UNTITLED);
        assert!(doc.outline.is_empty());
    }

    #[test]
    fn test_extractor_is_reusable() {
        let extractor = OutlineExtractor::new();
        let spans = vec![
            TextSpan::new("Annual Library Report", 22.0, 1),
            TextSpan::new("Some body text for the report.", 10.0, 1),
        ];
        let first = extractor.extract(&spans, "a");
        let second = extractor.extract(&spans, "a");
        assert_eq!(first, second);
        assert_eq!(first.title, "Annual Library Report");
    }
}
