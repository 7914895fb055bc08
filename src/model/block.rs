//! Normalized text blocks and their structural roles.

use serde::{Deserialize, Serialize};

use super::StyleFlags;

/// Heading depth in the outline.
///
/// The derived ordering is the level priority used when sorting:
/// `H1 < H2 < H3 < H4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// All levels, outermost first.
    pub const ALL: [HeadingLevel; 4] = [Self::H1, Self::H2, Self::H3, Self::H4];

    /// Numeric depth (1-4).
    pub fn depth(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
        }
    }

    /// Label as used in output records ("H1".."H4").
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural role assigned to a block by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Document title candidate (never part of the outline)
    Title,
    /// Outline heading
    Heading(HeadingLevel),
    /// Body text or anything unclassified
    None,
}

impl Role {
    /// Heading level, if this role enters the outline.
    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            Role::Heading(level) => Some(level),
            _ => None,
        }
    }
}

/// A normalized block: one or more merged spans from the same page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Font size of the first constituent span
    pub size: f32,
    /// Cleaned text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Style bits held by the majority of the block's characters
    pub flags: StyleFlags,
}

impl TextBlock {
    /// Create a new text block.
    pub fn new(text: impl Into<String>, size: f32, page: u32, flags: StyleFlags) -> Self {
        Self {
            size,
            text: text.into(),
            page,
            flags,
        }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A block together with its classified role.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedBlock {
    pub block: TextBlock,
    pub role: Role,
}

impl ClassifiedBlock {
    /// Pair a block with a role.
    pub fn new(block: TextBlock, role: Role) -> Self {
        Self { block, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_order() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert!(HeadingLevel::H3 < HeadingLevel::H4);
        assert_eq!(HeadingLevel::H3.depth(), 3);
    }

    #[test]
    fn test_heading_level_serializes_as_label() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
    }

    #[test]
    fn test_role_heading_level() {
        assert_eq!(
            Role::Heading(HeadingLevel::H1).heading_level(),
            Some(HeadingLevel::H1)
        );
        assert_eq!(Role::Title.heading_level(), None);
        assert_eq!(Role::None.heading_level(), None);
    }

    #[test]
    fn test_block_char_len_counts_chars() {
        let block = TextBlock::new("Résumé", 12.0, 1, StyleFlags::empty());
        assert_eq!(block.char_len(), 6);
    }
}
