//! Streaming consumer
//!
//! [`StreamSession`] is the reference consumer of the decision engine. It
//! accumulates text deltas, asks the engine after every delta whether the
//! current segment should close, and emits finished [`Segment`]s with a
//! pacing hint attached.

use super::decision::SegmentReason;
use super::segmenter::Segmenter;
use crate::config::SegmentOptions;
use crate::domain::chars::{byte_offset_of_char, char_len};
use crate::domain::markers::MarkerKind;
use crate::domain::splitter::split_into_sentences;
use serde::Serialize;
use std::fmt;

/// How a segment was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CutKind {
    /// The engine chose the cut
    Engine,
    /// The buffer outgrew twice the force budget without a valid point
    HardCut,
    /// The stream ended
    Flush,
}

impl CutKind {
    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            CutKind::Engine => "engine",
            CutKind::HardCut => "hard_cut",
            CutKind::Flush => "flush",
        }
    }
}

impl fmt::Display for CutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished, display-ready segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Zero-based position in the stream
    pub index: usize,
    /// Trimmed segment text
    pub text: String,
    /// How the segment was closed
    pub cut: CutKind,
    /// Engine reason, for engine cuts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SegmentReason>,
    /// Marker kind behind a marker-driven cut
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_type: Option<MarkerKind>,
    /// Suggested pause before painting the next segment
    pub delay_ms: u64,
}

/// Accumulates streamed deltas and emits segments
#[derive(Debug)]
pub struct StreamSession<'a> {
    segmenter: &'a mut Segmenter,
    options: SegmentOptions,
    buffer: String,
    history: Vec<String>,
    emitted: usize,
}

impl<'a> StreamSession<'a> {
    pub(crate) fn new(segmenter: &'a mut Segmenter, options: SegmentOptions) -> Self {
        Self {
            segmenter,
            options,
            buffer: String::new(),
            history: Vec::new(),
            emitted: 0,
        }
    }

    /// Text received but not yet emitted
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Recently finalized sentences, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Number of segments emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Appends a delta and returns the segments it completes.
    pub fn push(&mut self, delta: &str) -> Vec<Segment> {
        self.push_inner(delta, None)
    }

    /// Like [`push`](Self::push), with the time since the current segment
    /// started so the time budget can force a cut.
    pub fn push_after(&mut self, delta: &str, elapsed_ms: u64) -> Vec<Segment> {
        self.push_inner(delta, Some(elapsed_ms))
    }

    /// Emits whatever is left in the buffer.
    pub fn finish(&mut self) -> Option<Segment> {
        let rest = std::mem::take(&mut self.buffer);
        self.emit(&rest, CutKind::Flush, None, None)
    }

    fn push_inner(&mut self, delta: &str, mut elapsed_ms: Option<u64>) -> Vec<Segment> {
        self.buffer.push_str(delta);
        let mut segments = Vec::new();

        loop {
            let mut opts = self.options;
            opts.elapsed_ms = elapsed_ms.or(self.options.elapsed_ms);

            let decision = self
                .segmenter
                .should_segment(self.buffer.as_str(), &self.history, &opts);

            let cut = decision
                .position
                .filter(|&pos| decision.should_segment && pos > 0 && pos <= self.buffer.len());

            let (position, kind, reason) = match cut {
                Some(pos) => (pos, CutKind::Engine, Some(decision.reason)),
                None => match self.hard_cut_position() {
                    Some(pos) => {
                        log::debug!("hard cut at byte {pos}, reason {}", decision.reason);
                        (pos, CutKind::HardCut, None)
                    }
                    None => break,
                },
            };

            let rest = self.buffer.split_off(position);
            let head = std::mem::replace(&mut self.buffer, rest);
            segments.extend(self.emit(&head, kind, reason, decision.marker_type));

            // A new segment starts its own clock
            elapsed_ms = None;
        }

        segments
    }

    fn hard_cut_position(&self) -> Option<usize> {
        let force = self
            .options
            .force_chars
            .unwrap_or(self.segmenter.config().max_segment_chars)
            .max(1);
        (char_len(&self.buffer) > force.saturating_mul(2))
            .then(|| byte_offset_of_char(&self.buffer, force))
    }

    fn emit(
        &mut self,
        text: &str,
        cut: CutKind,
        reason: Option<SegmentReason>,
        marker_type: Option<MarkerKind>,
    ) -> Option<Segment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.remember(text);
        let segment = Segment {
            index: self.emitted,
            text: text.to_string(),
            cut,
            reason,
            marker_type,
            delay_ms: self.segmenter.calculate_adaptive_delay(text, &self.options),
        };
        self.emitted += 1;
        Some(segment)
    }

    fn remember(&mut self, text: &str) {
        let keep = self.segmenter.config().coherence_window.max(1);
        self.history.extend(split_into_sentences(text));
        if self.history.len() > keep {
            let excess = self.history.len() - keep;
            self.history.drain(..excess);
        }
    }
}
