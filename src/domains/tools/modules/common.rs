//! Shared formatting helpers for tool output.

use rmcp::model::Content;

/// Single text content block.
pub fn text(message: impl Into<String>) -> Vec<Content> {
    vec![Content::text(message.into())]
}

/// Header plus one line per item, or a fallback message when empty.
pub fn lines_or(header: &str, lines: Vec<String>, empty: &str) -> Vec<Content> {
    if lines.is_empty() {
        text(empty)
    } else {
        text(format!("{}\n{}", header, lines.join("\n")))
    }
}

/// Truncate on a character boundary, appending an ellipsis when shortened.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn text_of(content: &[Content]) -> &str {
        match &content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_lines_or_empty_fallback() {
        let content = lines_or("Items:", vec![], "No items");
        assert_eq!(text_of(&content), "No items");
    }

    #[test]
    fn test_lines_or_joins() {
        let content = lines_or("Items:", vec!["- a".to_string(), "- b".to_string()], "No items");
        assert_eq!(text_of(&content), "Items:\n- a\n- b");
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }
}
