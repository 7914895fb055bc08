//! Markdown rendering of outlines.

use crate::model::Document;

/// Render a document as a Markdown heading followed by a nested list.
///
/// Each entry becomes a bullet indented by its depth, with the page in
/// parentheses.
pub fn to_markdown(doc: &Document) -> String {
    let mut output = format!("# {}\n", escape_markdown(&doc.title));
    if doc.outline.is_empty() {
        return output;
    }
    output.push('\n');

    for entry in &doc.outline {
        let indent = "  ".repeat(entry.level.depth().saturating_sub(1) as usize);
        output.push_str(&format!(
            "{}- {} (p. {})\n",
            indent,
            escape_markdown(&entry.text),
            entry.page
        ));
    }
    output
}

/// Escape characters that would otherwise be read as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '|') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    #[test]
    fn test_to_markdown() {
        let doc = Document::new(
            "RFP: Request for Proposal",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Summary", 1),
                OutlineEntry::new(HeadingLevel::H3, "Timeline:", 1),
                OutlineEntry::new(HeadingLevel::H4, "For each Ontario citizen it could mean:", 4),
            ],
        );
        let md = to_markdown(&doc);
        assert!(md.starts_with("# RFP: Request for Proposal\n\n"));
        assert!(md.contains("\n- Summary (p. 1)\n"));
        assert!(md.contains("\n    - Timeline: (p. 1)\n"));
        assert!(md.contains("\n      - For each Ontario citizen it could mean: (p. 4)\n"));
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("a_b *c* [d]"), "a\\_b \\*c\\* \\[d\\]");
        assert_eq!(escape_markdown("2.1 Scope"), "2.1 Scope");
    }
}
