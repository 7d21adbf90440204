//! Content-word tokenizer for mixed CJK/Latin text
//!
//! Whitespace splitting does not work for CJK text, which has no spaces
//! between words. Instead the input is cut into runs of one character class
//! (CJK ideographs, or Latin letters and digits); each run longer than one
//! character that is not a stop word becomes a token.

use super::chars::is_cjk_ideograph;

/// Common Chinese function words and English auxiliaries/determiners
const STOP_WORDS: &[&str] = &[
    // Chinese
    "的", "了", "是", "在", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
    "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这", "那",
    "这个", "那个", "这些", "那些", "我们", "你们", "他们", "它", "他", "她", "吗", "呢",
    "吧", "啊", "就是", "还是", "以及", "或者", "而且", "但是", "如果", "因为", "所以",
    // English
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must", "of", "in", "on", "at", "to", "for", "with", "by", "from", "and", "or",
    "but", "not", "this", "that", "these", "those", "it", "its", "as", "so", "if", "than",
    "then", "there", "their", "they", "we", "you", "he", "she", "his", "her", "our", "your",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Cjk,
    Word,
    Other,
}

#[inline]
fn classify(ch: char) -> CharClass {
    if is_cjk_ideograph(ch) {
        CharClass::Cjk
    } else if ch.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Other
    }
}

/// Returns true if `word` (already lower-cased) is a stop word
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Reduces `text` to its normalized content words, in order of appearance.
///
/// Duplicates are kept; callers that need set semantics collect into a set.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_class = CharClass::Other;

    for ch in text.chars() {
        let class = classify(ch);
        if class != current_class {
            flush(&mut current, &mut tokens);
            current_class = class;
        }
        if class != CharClass::Other {
            current.push(ch);
        }
    }
    flush(&mut current, &mut tokens);

    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let token = current.to_lowercase();
    current.clear();
    if token.chars().nth(1).is_some() && !is_stop_word(&token) {
        tokens.push(token);
    }
}
