//! Deterministic pre-wrap line breaking.
//!
//! Widths are estimated from character counts rather than font metrics so that
//! the layout is identical on every machine, with or without the fonts
//! installed.

/// Tab stops expand to this many spaces.
const TAB_WIDTH: usize = 4;

/// Break `text` into display lines of at most `max_chars` characters.
///
/// Explicit newlines are kept, blank lines are kept, trailing blank lines are
/// dropped. Long lines break at whitespace; words longer than a full line are
/// split. Leading indentation is repeated on continuation lines as long as it
/// leaves room for content.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for raw_line in text.trim_end().lines() {
        let line = raw_line.replace('\t', &" ".repeat(TAB_WIDTH));
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut indent = line.len() - trimmed.len();
        if indent >= max_chars / 2 {
            indent = 0;
        }
        wrap_line(trimmed, &" ".repeat(indent), max_chars, &mut lines);
    }
    lines
}

fn wrap_line(text: &str, indent: &str, max_chars: usize, out: &mut Vec<String>) {
    let room = max_chars - indent.len();
    let mut current = String::new();
    let mut current_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed <= room {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
            continue;
        }
        if current_len > 0 {
            out.push(format!("{indent}{current}"));
            current.clear();
            current_len = 0;
        }
        let mut chunk = String::new();
        let mut chunk_len = 0usize;
        for ch in word.chars() {
            if chunk_len == room {
                out.push(format!("{indent}{chunk}"));
                chunk.clear();
                chunk_len = 0;
            }
            chunk.push(ch);
            chunk_len += 1;
        }
        current = chunk;
        current_len = chunk_len;
    }
    if current_len > 0 {
        out.push(format!("{indent}{current}"));
    }
}

/// Shorten `text` to `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_untouched() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wraps_at_whitespace() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_keeps_newlines_and_blank_lines() {
        assert_eq!(wrap_text("a\n\nb\n\n", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_indentation_carries_over() {
        assert_eq!(
            wrap_text("  - one two three", 10),
            vec!["  - one", "  two", "  three"]
        );
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("\n\n", 10).is_empty());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(wrap_text("ééé ééé", 3), vec!["ééé", "ééé"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 10), "abcdef");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
