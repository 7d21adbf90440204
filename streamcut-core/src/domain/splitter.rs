//! Single-pass sentence splitter
//!
//! Walks the text once, keeping enclosure and code-fence state in running
//! counters. Sentences end at terminal punctuation outside quotes and
//! brackets, at ellipsis runs, at blank lines, before Markdown list items,
//! headings and opening code fences, and at every newline inside (or
//! closing) a fenced code block. Nothing is dropped: leftover text becomes
//! the final sentence, and only surrounding whitespace is trimmed.

use super::chars::{is_cjk_ideograph, is_emphatic_terminal, is_terminal, ELLIPSIS};
use super::classifier::is_structural;
use super::enclosure::{EnclosureTracker, FenceCounter, FENCE};

/// Byte range of a trimmed sentence within the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan {
    /// Offset of the first character
    pub start: usize,
    /// Offset one past the last character
    pub end: usize,
}

impl SentenceSpan {
    /// The sentence text
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Splits `text` into trimmed, non-empty sentences.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    split_spans(text)
        .into_iter()
        .map(|span| span.as_str(text).to_string())
        .collect()
}

/// Splits `text` and reports each sentence as a byte span.
pub fn split_spans(text: &str) -> Vec<SentenceSpan> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let char_at = |idx: usize| chars.get(idx).map(|&(_, ch)| ch);

    let mut spans = Vec::new();
    let mut tracker = EnclosureTracker::new();
    let mut fences = FenceCounter::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];
        fences.advance_to(text, pos);
        let enclosed = tracker.is_inside();

        let (consumed, flush) = if fences.in_code_block() {
            (1, ch == '\n')
        } else if (is_terminal(ch) || ch == ELLIPSIS) && !enclosed {
            terminal_run(&chars, i)
        } else if ch == '\n' {
            if fences.on_closing_fence_line(text, pos) {
                (1, true)
            } else if let Some(len) = blank_line_len(&chars, i) {
                (len, true)
            } else {
                let next = pos + 1;
                (1, next_line_is_structural(text, next) || next_line_opens_fence(text, next))
            }
        } else {
            (1, false)
        };

        for idx in i..i + consumed {
            if let Some(c) = char_at(idx) {
                tracker.observe(c);
            }
        }
        i += consumed;

        if flush {
            let end = chars.get(i).map(|&(p, _)| p).unwrap_or(text.len());
            push_trimmed(text, start, end, &mut spans);
            start = end;
        }
    }

    push_trimmed(text, start, text.len(), &mut spans);
    spans
}

/// Classifies the terminal at `i`: returns how many characters belong to it
/// and whether the sentence ends after them.
fn terminal_run(chars: &[(usize, char)], i: usize) -> (usize, bool) {
    let ch = chars[i].1;
    let run_of = |pred: &dyn Fn(char) -> bool| {
        chars[i..].iter().take_while(|&&(_, c)| pred(c)).count()
    };

    if ch == ELLIPSIS {
        return (run_of(&|c| c == ELLIPSIS), true);
    }

    if ch == '.' {
        let dots = run_of(&|c| c == '.');
        if dots >= 3 {
            return (dots, true);
        }
        if closes_list_number(chars, i) {
            return (1, false);
        }
    }

    if is_emphatic_terminal(ch) {
        let marks = run_of(&is_emphatic_terminal);
        if marks >= 2 {
            return (marks, true);
        }
    }

    match chars.get(i + 1) {
        Some(&(_, next)) => (1, ends_before(ch, next)),
        None => (1, false),
    }
}

/// A single terminator ends the sentence when followed by whitespace or the
/// start of a new word. After an ASCII period only an uppercase letter (or
/// CJK) counts, so decimals and dotted names stay intact.
fn ends_before(terminal: char, next: char) -> bool {
    if next.is_whitespace() || is_cjk_ideograph(next) {
        return true;
    }
    if terminal == '.' {
        next.is_uppercase()
    } else {
        next.is_alphabetic()
    }
}

/// True for the dot of a line-leading `12.` list number
fn closes_list_number(chars: &[(usize, char)], i: usize) -> bool {
    let digits = chars[..i]
        .iter()
        .rev()
        .take_while(|&&(_, c)| c.is_ascii_digit())
        .count();
    if !(1..=3).contains(&digits) {
        return false;
    }
    chars[..i - digits]
        .iter()
        .rev()
        .take_while(|&&(_, c)| c != '\n')
        .all(|&(_, c)| c == ' ' || c == '\t')
}

/// True when the line starting at byte `start` opens a list item or heading
fn next_line_is_structural(text: &str, start: usize) -> bool {
    let Some(rest) = text.get(start..) else {
        return false;
    };
    let line = rest.split('\n').next().unwrap_or_default();
    !line.trim().is_empty() && is_structural(line)
}

/// True when the line starting at byte `start` opens a code fence
fn next_line_opens_fence(text: &str, start: usize) -> bool {
    text.get(start..)
        .is_some_and(|rest| rest.trim_start_matches([' ', '\t']).starts_with(FENCE))
}

/// Length of a blank line starting with the newline at `i`, if there is one.
fn blank_line_len(chars: &[(usize, char)], i: usize) -> Option<usize> {
    let mut j = i + 1;
    while let Some(&(_, c)) = chars.get(j) {
        match c {
            '\n' => return Some(j - i + 1),
            ' ' | '\t' | '\r' => j += 1,
            _ => return None,
        }
    }
    None
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<SentenceSpan>) {
    let slice = &text[start..end];
    let trimmed_start = start + (slice.len() - slice.trim_start().len());
    let trimmed_end = start + slice.trim_end().len();
    if trimmed_start < trimmed_end {
        spans.push(SentenceSpan {
            start: trimmed_start,
            end: trimmed_end,
        });
    }
}
