//! Application layer: sessions, caching and segmentation decisions
//!
//! This layer owns the only mutable state in the crate, the similarity
//! cache, and wires the pure domain functions into the decision engine.
//!
//! # Example
//!
//! ```rust
//! use streamcut_core::{create_segmenter, SegmentOptions};
//!
//! let mut segmenter = create_segmenter();
//! let text = "我们尝试了很多次这个方法。结果一直不太理想。因此我们应该换一种方式。";
//! let history: [&str; 0] = [];
//! let decision = segmenter.should_segment(text, &history, &SegmentOptions::new());
//!
//! assert!(decision.should_segment);
//! let position = decision.position.unwrap();
//! assert!(text[position..].starts_with("因此"));
//! ```

pub mod cache;
pub mod coherence;
pub mod decision;
mod engine;
mod pacing;
pub mod segmenter;
pub mod similarity;
pub mod stream;

pub use cache::{CacheStats, SimilarityCache};
pub use coherence::coherence_score;
pub use decision::{SegmentReason, SegmentationDecision};
pub use segmenter::{create_segmenter, Segmenter};
pub use similarity::{jaccard, SimilarityEstimator};
pub use stream::{CutKind, Segment, StreamSession};
