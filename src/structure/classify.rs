//! Heading classification from font statistics, style and cue phrases.

use regex::Regex;
use std::sync::OnceLock;

use crate::model::{ClassifiedBlock, HeadingLevel, Role, TextBlock};

use super::cues::CueSet;
use super::fonts::FontProfile;
use super::options::{FixedThresholds, HeadingStrategy, OutlineOptions};

/// Title blocks must be at least this much larger than body text.
const TITLE_RATIO: f32 = 1.4;
const TITLE_MIN_LEN: usize = 20;
const TITLE_MAX_LEN: usize = 150;
const TITLE_MAX_PAGE: u32 = 3;

/// Words that never appear in a fixed-threshold heading.
const FIXED_REJECT_WORDS: &[&str] = &["version", "page", "figure", "table"];

fn month_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(jan(uary)?|feb(ruary)?|mar(ch)?|apr(il)?|may|june?|july?|aug(ust)?|sep(t(ember)?)?|oct(ober)?|nov(ember)?|dec(ember)?)\b",
        )
        .unwrap()
    })
}

/// Assigns a [`Role`] to each block.
pub struct HeadingClassifier<'a> {
    profile: &'a FontProfile,
    strategy: HeadingStrategy,
    cues: &'a CueSet,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier for one document.
    pub fn new(profile: &'a FontProfile, options: &'a OutlineOptions) -> Self {
        Self {
            profile,
            strategy: options.strategy,
            cues: &options.cues,
        }
    }

    /// Classify a single block.
    ///
    /// Depends only on the block and the profile, so repeated calls give
    /// the same role.
    pub fn classify(&self, block: &TextBlock) -> Role {
        match self.strategy {
            HeadingStrategy::Statistical => self.classify_statistical(block),
            HeadingStrategy::FixedThresholds(thresholds) => classify_fixed(block, &thresholds),
        }
    }

    /// Classify every block, keeping reading order.
    pub fn classify_all(&self, blocks: Vec<TextBlock>) -> Vec<ClassifiedBlock> {
        blocks
            .into_iter()
            .map(|block| {
                let role = self.classify(&block);
                ClassifiedBlock::new(block, role)
            })
            .collect()
    }

    fn classify_statistical(&self, block: &TextBlock) -> Role {
        let ratio = self.profile.size_ratio(block.size);
        let len = block.char_len();

        if block.page <= TITLE_MAX_PAGE
            && ratio >= TITLE_RATIO
            && (TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len)
            && !month_prefix().is_match(&block.text)
        {
            return Role::Title;
        }

        if let Some(level) = self.cues.match_level(&block.text) {
            return Role::Heading(level);
        }

        let emphasized = block.flags.is_emphasized();
        let level = if emphasized && ratio >= 1.2 {
            Some(HeadingLevel::H2)
        } else if emphasized && ratio >= 1.1 {
            Some(HeadingLevel::H3)
        } else if ratio >= 1.5 {
            Some(HeadingLevel::H1)
        } else if ratio >= 1.3 {
            Some(HeadingLevel::H2)
        } else if ratio >= 1.1 {
            Some(HeadingLevel::H3)
        } else {
            None
        };

        level.map_or(Role::None, Role::Heading)
    }
}

/// Absolute point-size cutoffs with a minimal text check.
fn classify_fixed(block: &TextBlock, thresholds: &FixedThresholds) -> Role {
    let level = if block.size >= thresholds.h1 {
        HeadingLevel::H1
    } else if block.size >= thresholds.h2 {
        HeadingLevel::H2
    } else if block.size >= thresholds.h3 {
        HeadingLevel::H3
    } else {
        return Role::None;
    };

    if block.char_len() < thresholds.min_heading_len {
        return Role::None;
    }
    let lower = block.text.to_lowercase();
    if FIXED_REJECT_WORDS.iter().any(|word| lower.contains(word)) {
        return Role::None;
    }

    Role::Heading(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleFlags;

    fn profile(body: f32) -> FontProfile {
        FontProfile {
            body_size: Some(body),
            common_sizes: vec![body],
        }
    }

    fn block(text: &str, size: f32, page: u32) -> TextBlock {
        TextBlock::new(text, size, page, StyleFlags::empty())
    }

    #[test]
    fn test_title_role() {
        let options = OutlineOptions::default();
        let profile = profile(10.0);
        let classifier = HeadingClassifier::new(&profile, &options);

        let title = block("Ontario's Digital Library Business Plan", 20.0, 1);
        assert_eq!(classifier.classify(&title), Role::Title);

        // Too short, too late, or a date line
        assert_eq!(
            classifier.classify(&block("Short Title", 20.0, 1)),
            Role::Heading(HeadingLevel::H1)
        );
        assert_eq!(
            classifier.classify(&block("Ontario's Digital Library Business Plan", 20.0, 4)),
            Role::Heading(HeadingLevel::H1)
        );
        assert_eq!(
            classifier.classify(&block("March 2003 Steering Committee Report", 20.0, 1)),
            Role::Heading(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_month_prefix_is_word_bounded() {
        assert!(month_prefix().is_match("Mar 21 Meeting Notes of the Board"));
        assert!(!month_prefix().is_match("Marketing Strategy for Public Libraries"));
        assert!(!month_prefix().is_match("Mayor's Office Library Initiative"));
    }

    #[test]
    fn test_cue_rules_apply_before_size() {
        let options = OutlineOptions::default();
        let profile = profile(11.0);
        let classifier = HeadingClassifier::new(&profile, &options);

        // Body-sized text promoted by a cue phrase
        assert_eq!(
            classifier.classify(&block("2.1 Intended Audience", 11.0, 3)),
            Role::Heading(HeadingLevel::H3)
        );
        assert_eq!(
            classifier.classify(&block("Appendix B: Steering Committee", 20.0, 5)),
            Role::Heading(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_custom_cue_set() {
        let options = OutlineOptions::default().with_cues(CueSet::digital_library_rfp());
        let profile = profile(11.0);
        let classifier = HeadingClassifier::new(&profile, &options);
        assert_eq!(
            classifier.classify(&block("Background", 11.0, 2)),
            Role::Heading(HeadingLevel::H1)
        );
    }

    #[test]
    fn test_style_fallback() {
        let options = OutlineOptions::default();
        let profile = profile(11.0);
        let classifier = HeadingClassifier::new(&profile, &options);

        let bold = |text: &str, size: f32| TextBlock::new(text, size, 2, StyleFlags::BOLD);
        assert_eq!(
            classifier.classify(&bold("Background", 14.0)),
            Role::Heading(HeadingLevel::H2)
        );
        assert_eq!(
            classifier.classify(&bold("Key Findings", 12.5)),
            Role::Heading(HeadingLevel::H3)
        );
        assert_eq!(classifier.classify(&bold("Inline emphasis", 11.0)), Role::None);
    }

    #[test]
    fn test_ratio_fallback() {
        let options = OutlineOptions::default();
        let profile = profile(10.0);
        let classifier = HeadingClassifier::new(&profile, &options);

        assert_eq!(
            classifier.classify(&block("Overview", 16.0, 5)),
            Role::Heading(HeadingLevel::H1)
        );
        assert_eq!(
            classifier.classify(&block("Overview", 13.0, 5)),
            Role::Heading(HeadingLevel::H2)
        );
        assert_eq!(
            classifier.classify(&block("Overview", 11.0, 5)),
            Role::Heading(HeadingLevel::H3)
        );
        assert_eq!(classifier.classify(&block("Overview", 10.5, 5)), Role::None);
    }

    #[test]
    fn test_unknown_baseline_yields_body() {
        let options = OutlineOptions::default();
        let profile = FontProfile::default();
        let classifier = HeadingClassifier::new(&profile, &options);
        assert_eq!(classifier.classify(&block("Anything at all", 40.0, 1)), Role::None);
    }

    #[test]
    fn test_fixed_thresholds() {
        let options = OutlineOptions::default().fixed_thresholds();
        let profile = profile(10.0);
        let classifier = HeadingClassifier::new(&profile, &options);

        assert_eq!(
            classifier.classify(&block("Overview", 18.0, 1)),
            Role::Heading(HeadingLevel::H1)
        );
        assert_eq!(
            classifier.classify(&block("Overview", 14.0, 1)),
            Role::Heading(HeadingLevel::H2)
        );
        assert_eq!(
            classifier.classify(&block("Overview", 12.0, 1)),
            Role::Heading(HeadingLevel::H3)
        );
        assert_eq!(classifier.classify(&block("Overview", 11.9, 1)), Role::None);
        assert_eq!(classifier.classify(&block("Aim", 20.0, 1)), Role::None);
        assert_eq!(classifier.classify(&block("Table 3 Results", 20.0, 1)), Role::None);
        // No title role and no cue rules
        assert_eq!(
            classifier.classify(&block("A Very Long Document Title Here", 30.0, 1)),
            Role::Heading(HeadingLevel::H1)
        );
        assert_eq!(classifier.classify(&block("2.1 Intended Audience", 10.0, 1)), Role::None);
    }

    #[test]
    fn test_classification_is_stable() {
        let options = OutlineOptions::default();
        let profile = profile(11.0);
        let classifier = HeadingClassifier::new(&profile, &options);
        let blocks = vec![
            block("Executive Summary", 24.0, 1),
            block("Phase II: Implementation", 12.0, 4),
            block("Plain body text", 11.0, 4),
        ];
        let first = classifier.classify_all(blocks.clone());
        let second = classifier.classify_all(blocks);
        assert_eq!(first, second);
    }
}
