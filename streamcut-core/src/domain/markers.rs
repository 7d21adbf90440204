//! Coherence marker lexicon
//!
//! A static table of `(kind, phrase)` pairs covering Chinese and English
//! discourse cues. Matching is ASCII case-insensitive; Latin phrases only
//! match on word boundaries so that "overall" is not found inside "overalls".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Discourse function of a coherence marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Adds to the current line of thought
    Continuation,
    /// Introduces a contrast
    Contrast,
    /// States a cause or consequence
    Cause,
    /// Introduces an example
    Example,
    /// Wraps up
    Conclusion,
    /// Moves to a new step or topic
    Transition,
}

impl MarkerKind {
    /// True for kinds that justify starting a new segment on their own
    pub fn is_breaking(&self) -> bool {
        matches!(
            self,
            MarkerKind::Conclusion | MarkerKind::Contrast | MarkerKind::Transition
        )
    }

    /// Snake-case name, as used in serialized decisions
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Continuation => "continuation",
            MarkerKind::Contrast => "contrast",
            MarkerKind::Cause => "cause",
            MarkerKind::Example => "example",
            MarkerKind::Conclusion => "conclusion",
            MarkerKind::Transition => "transition",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexicon phrase found in a sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoherenceMarker {
    /// Category of the phrase
    pub kind: MarkerKind,
    /// The lexicon phrase that matched
    pub phrase: &'static str,
    /// Byte offset of the match
    pub offset: usize,
}

/// Markers found in one sentence; rarely more than a handful
pub type MarkerList = SmallVec<[CoherenceMarker; 4]>;

use MarkerKind::*;

const LEXICON: &[(MarkerKind, &str)] = &[
    (Continuation, "而且"),
    (Continuation, "并且"),
    (Continuation, "此外"),
    (Continuation, "另外"),
    (Continuation, "同时"),
    (Continuation, "接着"),
    (Continuation, "然后"),
    (Continuation, "moreover"),
    (Continuation, "furthermore"),
    (Continuation, "in addition"),
    (Continuation, "additionally"),
    (Continuation, "also"),
    (Contrast, "但是"),
    (Contrast, "然而"),
    (Contrast, "不过"),
    (Contrast, "可是"),
    (Contrast, "相反"),
    (Contrast, "however"),
    (Contrast, "nevertheless"),
    (Contrast, "on the other hand"),
    (Contrast, "in contrast"),
    (Contrast, "although"),
    (Cause, "因为"),
    (Cause, "由于"),
    (Cause, "所以"),
    (Cause, "因此"),
    (Cause, "因而"),
    (Cause, "because"),
    (Cause, "therefore"),
    (Cause, "as a result"),
    (Example, "例如"),
    (Example, "比如"),
    (Example, "譬如"),
    (Example, "for example"),
    (Example, "for instance"),
    (Example, "such as"),
    (Conclusion, "总之"),
    (Conclusion, "总而言之"),
    (Conclusion, "综上所述"),
    (Conclusion, "总的来说"),
    (Conclusion, "in conclusion"),
    (Conclusion, "in summary"),
    (Conclusion, "to sum up"),
    (Conclusion, "overall"),
    (Transition, "因此"),
    (Transition, "首先"),
    (Transition, "其次"),
    (Transition, "最后"),
    (Transition, "接下来"),
    (Transition, "另一方面"),
    (Transition, "next,"),
    (Transition, "meanwhile"),
    (Transition, "finally"),
    (Transition, "first of all"),
    (Transition, "by the way"),
];

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn on_word_boundary(haystack: &str, start: usize, phrase: &str) -> bool {
    let bytes = haystack.as_bytes();
    let end = start + phrase.len();
    let first_is_word = phrase.as_bytes().first().copied().is_some_and(is_word_byte);
    let last_is_word = phrase.as_bytes().last().copied().is_some_and(is_word_byte);

    let before_ok = !first_is_word || start == 0 || !is_word_byte(bytes[start - 1]);
    let after_ok = !last_is_word || end >= bytes.len() || !is_word_byte(bytes[end]);
    before_ok && after_ok
}

/// Finds every lexicon phrase in `text`, ordered by byte offset.
///
/// A phrase listed under several kinds yields one marker per kind.
pub fn detect_markers(text: &str) -> MarkerList {
    let mut markers = MarkerList::new();
    if text.is_empty() {
        return markers;
    }

    // ASCII lower-casing keeps byte offsets stable
    let haystack = text.to_ascii_lowercase();

    for &(kind, phrase) in LEXICON {
        for (offset, _) in haystack.match_indices(phrase) {
            if phrase.is_ascii() && !on_word_boundary(&haystack, offset, phrase) {
                continue;
            }
            markers.push(CoherenceMarker {
                kind,
                phrase,
                offset,
            });
        }
    }

    markers.sort_by_key(|marker| marker.offset);
    markers
}

/// Earliest marker of a breaking kind, if any
pub fn first_breaking_marker(text: &str) -> Option<CoherenceMarker> {
    detect_markers(text)
        .into_iter()
        .find(|marker| marker.kind.is_breaking())
}
