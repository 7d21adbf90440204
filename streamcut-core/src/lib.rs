//! Progressive segmentation for streamed LLM output
//!
//! While a language model streams its answer, this crate decides chunk by
//! chunk where to break the growing text into display-ready segments, so a
//! UI can render finished thoughts progressively instead of one blob or one
//! token at a time.
//!
//! # Architecture
//!
//! - **Domain layer**: pure text analysis (tokenizer, structural classifiers,
//!   sentence splitter, coherence marker lexicon)
//! - **Application layer**: the [`Segmenter`] session with its bounded
//!   similarity cache, the decision engine and the [`StreamSession`] consumer
//! - **Configuration**: [`SegmentationConfig`] with TOML loading, presets and
//!   per-call [`SegmentOptions`]
//!
//! # Example
//!
//! ```rust
//! use streamcut_core::{create_segmenter, CutKind};
//!
//! let mut segmenter = create_segmenter();
//! let mut session = segmenter.stream();
//!
//! let mut segments = Vec::new();
//! for delta in ["首先准备好所有的材料。", "接着检查一遍清单。", "总之，一切就绪了。"] {
//!     segments.extend(session.push(delta));
//! }
//! segments.extend(session.finish());
//!
//! assert!(segments.len() >= 2);
//! assert_eq!(segments.last().unwrap().cut, CutKind::Flush);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;

pub use application::{
    coherence_score, create_segmenter, jaccard, CacheStats, CutKind, Segment, SegmentReason,
    SegmentationDecision, Segmenter, StreamSession,
};
pub use config::{ConfigBuilder, ConfigUpdate, SegmentOptions, SegmentationConfig, StreamPace};
pub use domain::{
    detect_markers, is_complete_sentence, is_in_bracket, is_in_code_block, is_in_quote,
    is_list_item, is_markdown_heading, normalize_text, split_into_sentences, tokenize,
    CoherenceMarker, MarkerKind,
};
pub use error::{Error, Result};
