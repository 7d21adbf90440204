//! Decision records returned by the segmentation engine

use crate::domain::markers::MarkerKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the engine did or did not segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentReason {
    /// Fewer characters than the minimum segment budget
    TextTooShort,
    /// Fewer than two sentences so far
    InsufficientSentences,
    /// Neither the first nor the last sentence is complete
    IncompleteSentence,
    /// The last sentence drifts away from recent history
    LowCoherence,
    /// The last sentence opens with a discourse break
    CoherenceMarker,
    /// The last sentence is a heading or list item
    StructuralBreak,
    /// The character budget was reached
    ForceLength,
    /// The time budget was reached
    ForceTime,
    /// A forced cut was due but no candidate point qualified
    NoValidSplit,
    /// Nothing triggered; keep accumulating
    Continue,
}

impl SegmentReason {
    /// Snake-case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentReason::TextTooShort => "text_too_short",
            SegmentReason::InsufficientSentences => "insufficient_sentences",
            SegmentReason::IncompleteSentence => "incomplete_sentence",
            SegmentReason::LowCoherence => "low_coherence",
            SegmentReason::CoherenceMarker => "coherence_marker",
            SegmentReason::StructuralBreak => "structural_break",
            SegmentReason::ForceLength => "force_length",
            SegmentReason::ForceTime => "force_time",
            SegmentReason::NoValidSplit => "no_valid_split",
            SegmentReason::Continue => "continue",
        }
    }

    /// True for the budget-driven reasons
    pub fn is_forced(&self) -> bool {
        matches!(self, SegmentReason::ForceLength | SegmentReason::ForceTime)
    }
}

impl fmt::Display for SegmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one `should_segment` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationDecision {
    /// Whether the caller should close the current segment now
    pub should_segment: bool,

    /// Diagnostic reason
    pub reason: SegmentReason,

    /// Byte offset to cut at; the segment to commit is `text[..position]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,

    /// True when the text after `position` starts a new segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new_segment: Option<bool>,

    /// Kind of the marker behind a `coherence_marker` decision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_type: Option<MarkerKind>,
}

impl SegmentationDecision {
    /// A "keep accumulating" decision
    pub fn hold(reason: SegmentReason) -> Self {
        Self {
            should_segment: false,
            reason,
            position: None,
            is_new_segment: None,
            marker_type: None,
        }
    }

    /// A decision to cut at `position`
    pub fn cut(reason: SegmentReason, position: usize) -> Self {
        Self {
            should_segment: true,
            reason,
            position: Some(position),
            is_new_segment: Some(true),
            marker_type: None,
        }
    }

    pub(crate) fn with_marker(mut self, kind: MarkerKind) -> Self {
        self.marker_type = Some(kind);
        self
    }
}
