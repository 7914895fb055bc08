//! Title selection from early-page blocks.

use std::cmp::Ordering;

use crate::model::TextBlock;

use super::options::OutlineOptions;
use super::repair::clean_text;

/// Keyword hits needed for a candidate to win outright.
const KEYWORD_HITS: usize = 2;

/// A block eligible to become the document title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCandidate {
    pub size: f32,
    pub text: String,
    pub page: u32,
}

impl From<&TextBlock> for TitleCandidate {
    fn from(block: &TextBlock) -> Self {
        Self {
            size: block.size,
            text: block.text.clone(),
            page: block.page,
        }
    }
}

/// Picks one title per document.
pub struct TitleSelector<'a> {
    options: &'a OutlineOptions,
}

impl<'a> TitleSelector<'a> {
    /// Create a selector from outline options.
    pub fn new(options: &'a OutlineOptions) -> Self {
        Self { options }
    }

    /// Blocks on the first pages that are short enough to be a title, in
    /// reading order.
    pub fn candidates(&self, blocks: &[TextBlock]) -> Vec<TitleCandidate> {
        blocks
            .iter()
            .filter(|b| b.page <= self.options.title_max_page)
            .filter(|b| b.char_len() <= self.options.title_max_len)
            .map(TitleCandidate::from)
            .collect()
    }

    /// Choose a title, falling back to the file stem.
    pub fn select(&self, candidates: &[TitleCandidate], stem: &str) -> String {
        let chosen = candidates
            .iter()
            .find(|c| self.keyword_hits(&c.text) >= KEYWORD_HITS)
            .or_else(|| {
                candidates.iter().min_by(|a, b| {
                    a.page
                        .cmp(&b.page)
                        .then(b.size.partial_cmp(&a.size).unwrap_or(Ordering::Equal))
                })
            });

        match chosen {
            Some(candidate) => clean_text(&candidate.text),
            None => stem.to_string(),
        }
    }

    fn keyword_hits(&self, text: &str) -> usize {
        let lower = text.to_lowercase();
        self.options
            .title_keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleFlags;

    fn candidate(text: &str, size: f32, page: u32) -> TitleCandidate {
        TitleCandidate {
            size,
            text: text.to_string(),
            page,
        }
    }

    #[test]
    fn test_keyword_candidate_wins() {
        let options = OutlineOptions::default();
        let selector = TitleSelector::new(&options);
        let candidates = vec![
            candidate("Ontario Library Association", 28.0, 1),
            candidate("RFP: Request for Proposal", 16.0, 1),
            candidate("A Digital Library Proposal", 16.0, 1),
        ];
        assert_eq!(selector.select(&candidates, "file03"), "RFP: Request for Proposal");
    }

    #[test]
    fn test_single_keyword_is_not_enough() {
        let options = OutlineOptions::default();
        let selector = TitleSelector::new(&options);
        let candidates = vec![
            candidate("Business Proposal Summary", 14.0, 1),
            candidate("Annual Overview", 24.0, 1),
        ];
        assert_eq!(selector.select(&candidates, "x"), "Annual Overview");
    }

    #[test]
    fn test_earliest_page_then_largest_size() {
        let options = OutlineOptions::default();
        let selector = TitleSelector::new(&options);
        let candidates = vec![
            candidate("Second Page Banner", 40.0, 2),
            candidate("Small Heading", 12.0, 1),
            candidate("Large Heading", 20.0, 1),
            candidate("Also Large Heading", 20.0, 1),
        ];
        assert_eq!(selector.select(&candidates, "x"), "Large Heading");
    }

    #[test]
    fn test_stem_fallback() {
        let options = OutlineOptions::default();
        let selector = TitleSelector::new(&options);
        assert_eq!(selector.select(&[], "file05"), "file05");
    }

    #[test]
    fn test_candidates_respect_page_and_length() {
        let options = OutlineOptions::default();
        let selector = TitleSelector::new(&options);
        let long = "x".repeat(151);
        let blocks = vec![
            TextBlock::new("Cover Title", 20.0, 1, StyleFlags::empty()),
            TextBlock::new("Late Title", 20.0, 4, StyleFlags::empty()),
            TextBlock::new(long, 20.0, 1, StyleFlags::empty()),
        ];
        let candidates = selector.candidates(&blocks);
        assert_eq!(candidates, vec![candidate("Cover Title", 20.0, 1)]);
    }
}
