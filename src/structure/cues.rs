//! Cue-phrase rules: literal text patterns tied to a heading level.
//!
//! Rules are evaluated in order and the first match wins, so a rule set
//! should list its most specific patterns first. Rule sets are plain data;
//! document families with a known section vocabulary get their own set.

use regex::Regex;

use crate::error::Result;
use crate::model::HeadingLevel;

use HeadingLevel::{H1, H2, H3, H4};

/// Patterns shared by every built-in rule set.
const APPENDIX: &str = r"(?i)^appendix\s+[a-z0-9]{1,3}\b";
const PHASE: &str = r"(?i)^phase\s+[ivxlcdm]+\s*:";
const NUMBERED_SECTION: &str = r"^\d+\.\s+\w+";
const NUMBERED_SUBSECTION: &str = r"^\d+\.\d+\s+\w+";

const STANDARD_RULES: &[(&str, HeadingLevel)] = &[
    (APPENDIX, H1),
    (PHASE, H3),
    (NUMBERED_SECTION, H3),
    (NUMBERED_SUBSECTION, H3),
];

const DIGITAL_LIBRARY_RFP_RULES: &[(&str, HeadingLevel)] = &[
    (
        r"(?i)^(summary|background|introduction|conclusion|references|bibliography)$",
        H1,
    ),
    (APPENDIX, H1),
    (
        r"(?i)^(revision history|table of contents|acknowledgements|ontario'?s digital library)$",
        H1,
    ),
    (
        r"(?i)^a critical component for implementing ontario'?s road map to prosperity strategy$",
        H1,
    ),
    (r"(?i)^the business plan to be developed$", H2),
    (r"(?i)^approach and specific proposal requirements$", H2),
    (r"(?i)^evaluation and awarding of contract$", H2),
    (r"(?i)^milestones$", H2),
    (
        r"(?i)^(timeline|milestones|access|guidance and advice|training|purchasing|technological support|funding|governance)\s*:",
        H3,
    ),
    (
        r"(?i)^(equitable access for all ontarians|shared decision-making and accountability|shared governance structure|shared funding|local points of entry)\s*:",
        H3,
    ),
    (r"(?i)^what could the odl really mean\??$", H3),
    (PHASE, H3),
    (NUMBERED_SECTION, H3),
    (NUMBERED_SUBSECTION, H3),
    (
        r"(?i)^for each ontario (citizen|student|library) it could mean\s*:?$",
        H4,
    ),
    (r"(?i)^for the ontario government it could mean\s*:?$", H4),
];

/// A single (pattern, level) rule.
#[derive(Debug, Clone)]
pub struct CueRule {
    pattern: Regex,
    level: HeadingLevel,
}

impl CueRule {
    /// Compile a rule.
    pub fn new(pattern: &str, level: HeadingLevel) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            level,
        })
    }

    /// The level assigned on match.
    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether the rule matches the (cleaned) text.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// An ordered list of cue rules.
#[derive(Debug, Clone)]
pub struct CueSet {
    rules: Vec<CueRule>,
}

impl CueSet {
    /// A set with no rules; classification falls through to size and style.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Corpus-independent rules: appendix headers, phase labels and
    /// numbered sections.
    pub fn standard() -> Self {
        Self::from_table(STANDARD_RULES)
    }

    /// Rules for digital-library request-for-proposal documents: literal
    /// section words, known section titles, process labels and audience
    /// phrases, followed by the standard patterns.
    pub fn digital_library_rfp() -> Self {
        Self::from_table(DIGITAL_LIBRARY_RFP_RULES)
    }

    fn from_table(table: &[(&str, HeadingLevel)]) -> Self {
        let rules = table
            .iter()
            .map(|(pattern, level)| CueRule {
                pattern: Regex::new(pattern).unwrap(),
                level: *level,
            })
            .collect();
        Self { rules }
    }

    /// Append a rule at the lowest priority.
    pub fn push(mut self, pattern: &str, level: HeadingLevel) -> Result<Self> {
        self.rules.push(CueRule::new(pattern, level)?);
        Ok(self)
    }

    /// Append all rules of another set after this set's rules.
    pub fn extend(mut self, other: CueSet) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Level of the first matching rule.
    pub fn match_level(&self, text: &str) -> Option<HeadingLevel> {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(CueRule::level)
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &[CueRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CueSet {
    fn default() -> Self {
        Self::standard()
    }
}
