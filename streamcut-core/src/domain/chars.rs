//! Character classification shared by the tokenizer, classifiers and splitter

/// Sentence-terminal punctuation (ASCII and full-width)
pub const TERMINALS: [char; 6] = ['。', '！', '？', '!', '?', '.'];

/// Terminals that close a sentence regardless of length checks
pub const STRONG_TERMINALS: [char; 5] = ['。', '！', '？', '!', '?'];

/// Horizontal ellipsis, also used doubled as `……`
pub const ELLIPSIS: char = '…';

/// Returns true for CJK unified ideographs (including extensions A and B)
/// and compatibility ideographs.
#[inline]
pub fn is_cjk_ideograph(ch: char) -> bool {
    matches!(ch,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}')
}

/// Returns true for any sentence-terminal mark
#[inline]
pub fn is_terminal(ch: char) -> bool {
    TERMINALS.contains(&ch)
}

/// Returns true for `!`/`?` in either width; these combine into double terminals
#[inline]
pub fn is_emphatic_terminal(ch: char) -> bool {
    matches!(ch, '!' | '?' | '！' | '？')
}

/// Returns true for a letter of any script (CJK ideographs included)
#[inline]
pub fn is_letter(ch: char) -> bool {
    is_cjk_ideograph(ch) || ch.is_alphabetic()
}

/// Length in characters, the unit every budget is expressed in
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Clamps `pos` into `text` and moves it down to the nearest char boundary
pub fn floor_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut pos = pos;
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Byte offset of the `n`th character, or the text length if shorter
pub fn byte_offset_of_char(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Returns true when `text` ends with a double terminal such as `!?` or `？！`
pub fn ends_with_double_terminal(text: &str) -> bool {
    let mut rev = text.chars().rev();
    matches!(
        (rev.next(), rev.next()),
        (Some(last), Some(prev)) if is_emphatic_terminal(last) && is_emphatic_terminal(prev)
    )
}

/// Returns true when `text` ends with `...`, `…` or `……`
pub fn ends_with_ellipsis(text: &str) -> bool {
    text.ends_with("...") || text.ends_with(ELLIPSIS)
}
