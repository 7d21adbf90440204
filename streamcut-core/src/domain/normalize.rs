//! Display normalization applied before splitting streamed text

/// Normalizes line endings and spacing for display.
///
/// - `\r\n` and lone `\r` become `\n`
/// - non-breaking spaces become plain spaces
/// - trailing spaces and tabs are trimmed from every line
/// - three or more consecutive newlines collapse to one blank line
///
/// Leading indentation is preserved so code blocks keep their shape.
pub fn normalize_text(text: &str) -> String {
    let unified = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(['\u{00A0}', '\u{202F}'], " ");

    let mut out = String::with_capacity(unified.len());
    let mut newlines = 0usize;

    for (idx, line) in unified.split('\n').enumerate() {
        if idx > 0 {
            newlines += 1;
        }
        let line = line.trim_end_matches([' ', '\t']);
        if line.is_empty() {
            continue;
        }
        // Leading newlines carry no content
        if !out.is_empty() {
            out.push_str(if newlines >= 2 { "\n\n" } else { "\n" });
        }
        newlines = 0;
        out.push_str(line);
    }

    if newlines > 0 && !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_text("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_blank_line_runs_collapse() {
        assert_eq!(normalize_text("一\n\n\n\n二"), "一\n\n二");
        assert_eq!(normalize_text("one\n\ntwo"), "one\n\ntwo");
        assert_eq!(normalize_text("one\n  \n\t\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_trailing_spaces_and_nbsp() {
        assert_eq!(normalize_text("hello\u{00A0}world   \nnext\t"), "hello world\nnext");
    }

    #[test]
    fn test_indentation_kept() {
        assert_eq!(normalize_text("```\n    let x = 1;\n```"), "```\n    let x = 1;\n```");
    }

    #[test]
    fn test_edges() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("\n\n\n"), "");
        assert_eq!(normalize_text("\n\ntext\n"), "text\n");
        assert_eq!(normalize_text("text\n\n\n"), "text\n");
    }
}
