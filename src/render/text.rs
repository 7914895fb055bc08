//! Plain text table of contents.

use crate::model::Document;

/// Indentation per heading depth.
const INDENT: &str = "  ";

/// Render a document as an indented table of contents.
///
/// ```text
/// Annual Report
///
/// Summary ..... 2
///     Scope ... 3
/// ```
pub fn to_text(doc: &Document) -> String {
    let mut output = String::new();
    output.push_str(&doc.title);
    output.push('\n');

    if doc.outline.is_empty() {
        return output;
    }
    output.push('\n');

    let width = doc
        .outline
        .iter()
        .map(|e| indent_for(e.level.depth()).len() + e.text.chars().count())
        .max()
        .unwrap_or(0);

    for entry in &doc.outline {
        let indent = indent_for(entry.level.depth());
        let used = indent.len() + entry.text.chars().count();
        let dots = ".".repeat(width - used + 3);
        output.push_str(&format!("{}{} {} {}\n", indent, entry.text, dots, entry.page));
    }

    output
}

fn indent_for(depth: u8) -> String {
    INDENT.repeat(depth.saturating_sub(1) as usize * 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    #[test]
    fn test_to_text() {
        let doc = Document::new(
            "Annual Report",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Summary", 2),
                OutlineEntry::new(HeadingLevel::H2, "Scope", 3),
            ],
        );
        let text = to_text(&doc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Annual Report");
        assert_eq!(lines[2], "Summary ..... 2");
        assert_eq!(lines[3], "    Scope ... 3");
    }

    #[test]
    fn test_to_text_without_outline() {
        assert_eq!(to_text(&Document::fallback("file02")), "file02\n");
    }
}
