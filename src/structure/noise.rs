//! Boilerplate filtering: page numbers, running headers, dates and markers.

use regex::Regex;

use crate::error::Result;

/// Patterns that are always noise.
const BUILTIN_PATTERNS: &[&str] = &[
    // Page numbers, optionally dashed: "3", "- 3 -"
    r"^[-–—]?\s*\d{1,3}\s*[-–—]?$",
    // "Page 3", "page 3 of 12", "Page 3/12"
    r"(?i)^page\s+\d+(\s*(of|/)\s*\d+)?$",
    // Bare 4+ digit tokens: years, form numbers
    r"^\d{4,}$",
    // Status markers
    r"(?i)^((strictly\s+)?confidential|draft|final)(\s+(draft|version|copy))?[.!]?$",
];

/// Recurring-header and date patterns included by default.
const RECURRING_PATTERNS: &[&str] = &[
    r"(?i)^(january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}(st|nd|rd|th)?,?\s+\d{4}\.?$",
    r"(?i)^\d{1,2}\s+(january|february|march|april|may|june|july|august|september|october|november|december),?\s+\d{4}\.?$",
    r"^\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}$",
    r"(?i)^version\s+\d+(\.\d+)*$",
    r"(?i)^(copyright\b|all rights reserved).*$",
];

/// Drops blocks that carry no structure.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    /// Only the built-in patterns (page numbers, bare numbers, markers).
    pub fn builtin() -> Self {
        Self {
            patterns: compile(BUILTIN_PATTERNS),
        }
    }

    /// Add a recurring-header or date pattern.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns.push(Regex::new(pattern)?);
        Ok(self)
    }

    /// Whether the (cleaned) text is boilerplate.
    pub fn is_noise(&self, text: &str) -> bool {
        let text = text.trim();
        self.patterns.iter().any(|re| re.is_match(text))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether there are no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for NoiseFilter {
    /// Built-in patterns plus common dates, version stamps and copyright lines.
    fn default() -> Self {
        let mut filter = Self::builtin();
        filter.patterns.extend(compile(RECURRING_PATTERNS));
        filter
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}
