//! Structural classifiers for headings, list items and sentence completeness

use super::chars::{char_len, ends_with_ellipsis, is_letter, is_terminal, STRONG_TERMINALS};
use crate::config::SegmentationConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Length at which a sentence ending in a strong terminal is always complete
pub const COMPLETE_FALLBACK_LENGTH: usize = 15;

/// A trailing colon only completes a sentence longer than this
const COLON_MIN_LENGTH: usize = 10;

/// Discourse-final idioms that close a statement without punctuation
const DISCOURSE_FINALS: &[&str] = &["等等", "而已", "罢了", "如下", "etc"];

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#{1,6}\s|第[一二三四五六七八九十百千零〇两\d]+[章节部分篇回卷])")
        .expect("heading pattern is valid")
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\d{1,3}[.)]\s|\d{1,3}[、）]|[一二三四五六七八九十]{1,3}[、．]|[-*+•·]\s|[a-zA-Z][.)]\s|[(（]\d{1,3}[)）])",
    )
    .expect("list item pattern is valid")
});

/// True for Markdown ATX headings (`# Title`) and CJK chapter headings (`第三章`)
pub fn is_markdown_heading(s: &str) -> bool {
    HEADING.is_match(s.trim_start())
}

/// True for numbered, CJK-numbered, bulleted, lettered and parenthesized list items
pub fn is_list_item(s: &str) -> bool {
    LIST_ITEM.is_match(s.trim_start())
}

/// True for headings and list items, which always stand on their own
pub fn is_structural(s: &str) -> bool {
    is_markdown_heading(s) || is_list_item(s)
}

/// Decides whether `s` is a finished thought that can be shown on its own.
///
/// The strong-terminal fallback counts every character of `s`, surrounding
/// whitespace included; the other rules look at the trimmed text.
pub fn is_complete_sentence(s: &str, config: &SegmentationConfig) -> bool {
    let raw_len = char_len(s);
    let s = s.trim();
    let Some(last) = s.chars().last() else {
        return false;
    };

    if is_structural(s) {
        return true;
    }

    if raw_len >= COMPLETE_FALLBACK_LENGTH && STRONG_TERMINALS.contains(&last) {
        return true;
    }

    let len = char_len(s);
    if len < config.min_sentence_length || len > config.max_sentence_length {
        return false;
    }

    let ends_properly = is_terminal(last)
        || ends_with_ellipsis(s)
        || (matches!(last, ':' | '：') && len > COLON_MIN_LENGTH)
        || DISCOURSE_FINALS.iter().any(|idiom| s.ends_with(idiom));

    ends_properly && s.chars().any(is_letter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SegmentationConfig {
        SegmentationConfig::default()
    }

    #[test]
    fn test_headings() {
        assert!(is_markdown_heading("# Title"));
        assert!(is_markdown_heading("###### Deep"));
        assert!(is_markdown_heading("  ## Indented"));
        assert!(is_markdown_heading("第三章 出发"));
        assert!(is_markdown_heading("第12节"));
        assert!(!is_markdown_heading("####### Too deep"));
        assert!(!is_markdown_heading("#hashtag"));
        assert!(!is_markdown_heading("次第三章"));
    }

    #[test]
    fn test_list_items() {
        assert!(is_list_item("1. First step"));
        assert!(is_list_item("2) Second"));
        assert!(is_list_item("3、第三点"));
        assert!(is_list_item("一、总体思路"));
        assert!(is_list_item("- bullet"));
        assert!(is_list_item("* bullet"));
        assert!(is_list_item("• bullet"));
        assert!(is_list_item("a. lettered"));
        assert!(is_list_item("（1）括号编号"));
        assert!(is_list_item("(2) parenthesized"));
        assert!(!is_list_item("1.5 million users"));
        assert!(!is_list_item("---"));
        assert!(!is_list_item("plain text"));
    }

    #[test]
    fn test_complete_sentences() {
        let config = config();
        assert!(is_complete_sentence("这是一个完整的句子。", &config));
        assert!(is_complete_sentence("Is this done?", &config));
        assert!(is_complete_sentence("Well, I suppose...", &config));
        assert!(is_complete_sentence("然后呢……", &config));
        assert!(is_complete_sentence("具体步骤如下", &config));
        assert!(is_complete_sentence("The steps are as follows:", &config));
        assert!(is_complete_sentence("# Heading", &config));
        assert!(is_complete_sentence("- x", &config));
    }

    #[test]
    fn test_incomplete_sentences() {
        let config = config();
        assert!(!is_complete_sentence("", &config));
        assert!(!is_complete_sentence("   ", &config));
        assert!(!is_complete_sentence("这是一个没有结束的", &config));
        // Too short
        assert!(!is_complete_sentence("好。", &config));
        // Short colon endings stay open
        assert!(!is_complete_sentence("注意：", &config));
        // No letters at all
        assert!(!is_complete_sentence("12345.", &config));
    }

    #[test]
    fn test_long_sentences_rejected_without_strong_terminal() {
        let config = SegmentationConfig::builder()
            .sentence_length(5, 20)
            .build()
            .unwrap();
        let long = format!("{}.", "word ".repeat(10));
        assert!(!is_complete_sentence(&long, &config));
    }

    #[test]
    fn test_fallback_rule_ignores_bounds() {
        let config = SegmentationConfig::builder()
            .sentence_length(5, 10)
            .build()
            .unwrap();
        let s = "一二三四五六七八九十一二三四五！";
        assert!(is_complete_sentence(s, &config));
        let digits = "123456789012345?";
        assert!(is_complete_sentence(digits, &config));
    }

    #[test]
    fn test_fallback_counts_surrounding_whitespace() {
        let config = SegmentationConfig::default();
        let padded = format!("{}a!", " ".repeat(14));
        assert_eq!(padded.chars().count(), 16);
        assert!(is_complete_sentence(&padded, &config));
        assert!(!is_complete_sentence("a!", &config));
    }
}
