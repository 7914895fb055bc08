//! JSON rendering of outline records.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document as `{"title": ..., "outline": [...]}`.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> Document {
        Document::new(
            "Ontario's Digital Library",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Summary", 2),
                OutlineEntry::new(HeadingLevel::H3, "Timeline:", 3),
            ],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Ontario's Digital Library\""));
        assert!(json.contains("\"level\": \"H3\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert_eq!(
            json,
            r#"{"title":"Ontario's Digital Library","outline":[{"level":"H1","text":"Summary","page":2},{"level":"H3","text":"Timeline:","page":3}]}"#
        );
    }

    #[test]
    fn test_empty_outline_is_an_array() {
        let json = to_json(&Document::fallback("file01"), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"file01","outline":[]}"#);
    }
}
