//! Document-level output types.

use super::HeadingLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Title used when neither a candidate nor a file stem is available.
pub const UNTITLED: &str = "Untitled";

/// One heading in the inferred outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The inferred structure of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title (never empty)
    pub title: String,

    /// Headings in output order
    pub outline: Vec<OutlineEntry>,
}

impl Document {
    /// Create a document, substituting a placeholder for an empty title.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };
        Self { title, outline }
    }

    /// The minimal document returned when nothing usable was extracted.
    pub fn fallback(stem: &str) -> Self {
        Self::new(stem, Vec::new())
    }

    /// Number of outline entries.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }

    /// Entries of one level, in output order.
    pub fn headings_at(&self, level: HeadingLevel) -> impl Iterator<Item = &OutlineEntry> {
        self.outline.iter().filter(move |e| e.level == level)
    }
}

/// File name of a path with its extension stripped.
pub fn file_stem<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}
