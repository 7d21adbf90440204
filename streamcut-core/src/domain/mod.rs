//! Domain layer: pure text analysis
//!
//! Everything here is a function of its input alone. Nothing holds state
//! between calls except the scanning trackers, which live for one scan.

pub mod chars;
pub mod classifier;
pub mod enclosure;
pub mod markers;
pub mod normalize;
pub mod splitter;
pub mod tokenizer;

pub use classifier::{is_complete_sentence, is_list_item, is_markdown_heading, is_structural};
pub use enclosure::{is_in_bracket, is_in_code_block, is_in_quote, EnclosureTracker, FenceCounter};
pub use markers::{detect_markers, first_breaking_marker, CoherenceMarker, MarkerKind, MarkerList};
pub use normalize::normalize_text;
pub use splitter::{split_into_sentences, split_spans, SentenceSpan};
pub use tokenizer::tokenize;
