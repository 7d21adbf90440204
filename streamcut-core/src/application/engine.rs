//! Segmentation decision engine
//!
//! Decides, for the accumulated text of a stream, whether the current
//! segment should be closed and where. Natural breaks (low coherence,
//! discourse markers, structure) cut at the start of the last sentence.
//! Budget-driven breaks search for the best point between two sentences.

use super::coherence::coherence_score;
use super::decision::{SegmentReason, SegmentationDecision};
use super::similarity::SimilarityEstimator;
use crate::config::{ResolvedOptions, SegmentationConfig};
use crate::domain::chars::char_len;
use crate::domain::classifier::{is_complete_sentence, is_structural};
use crate::domain::markers::first_breaking_marker;
use crate::domain::splitter::split_spans;

/// Bonus when the sentence after a candidate point is complete
const NEXT_COMPLETE_BONUS: f64 = 0.3;

/// Bonus when the sentence after a candidate point is a heading or list item
const STRUCTURAL_BONUS: f64 = 0.2;

/// Bonus when the sentence after a candidate point carries a breaking marker
const MARKER_BONUS: f64 = 0.2;

/// Weight of the forward pair when blending with the previous pair
const FORWARD_WEIGHT: f64 = 0.6;

/// Weight of the previous pair when blending
const BACKWARD_WEIGHT: f64 = 0.4;

/// Best score still accepted below the threshold while the text is within
/// twice the force budget
const FALLBACK_MIN_SCORE: f64 = 0.15;

/// Borrowed view of a session's configuration and similarity cache
pub(crate) struct Engine<'a> {
    pub config: &'a SegmentationConfig,
    pub estimator: &'a mut SimilarityEstimator,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    position: usize,
}

impl Engine<'_> {
    /// Decides whether `text` should be segmented now.
    pub fn should_segment<S: AsRef<str>>(
        &mut self,
        text: &str,
        history: &[S],
        opts: &ResolvedOptions,
    ) -> SegmentationDecision {
        let length = char_len(text);
        if length < opts.min_chars {
            return SegmentationDecision::hold(SegmentReason::TextTooShort);
        }

        let spans = split_spans(text);
        let (Some(first), Some(last)) = (spans.first(), spans.last()) else {
            return SegmentationDecision::hold(SegmentReason::InsufficientSentences);
        };
        if spans.len() < 2 {
            return SegmentationDecision::hold(SegmentReason::InsufficientSentences);
        }

        let last_sentence = last.as_str(text);
        let last_complete = is_complete_sentence(last_sentence, self.config);
        if !last_complete && !is_complete_sentence(first.as_str(text), self.config) {
            return SegmentationDecision::hold(SegmentReason::IncompleteSentence);
        }

        if last_complete {
            if self.drifts_from_history(last_sentence, history) {
                return SegmentationDecision::cut(SegmentReason::LowCoherence, last.start);
            }
            if let Some(marker) = first_breaking_marker(last_sentence) {
                return SegmentationDecision::cut(SegmentReason::CoherenceMarker, last.start)
                    .with_marker(marker.kind);
            }
            if is_structural(last_sentence) {
                return SegmentationDecision::cut(SegmentReason::StructuralBreak, last.start);
            }
        }

        let mut forced = false;
        if length >= opts.force_chars {
            forced = true;
            if let Some(position) = self.find_best_segment_point(text, 0, opts) {
                log::debug!("forced cut at byte {position} after {length} chars");
                return SegmentationDecision::cut(SegmentReason::ForceLength, position);
            }
        }

        if let Some(elapsed) = opts.elapsed_ms.filter(|&ms| ms >= opts.force_time_ms) {
            forced = true;
            if let Some(position) = self.find_best_segment_point(text, 0, opts) {
                log::debug!("forced cut at byte {position} after {elapsed} ms");
                return SegmentationDecision::cut(SegmentReason::ForceTime, position);
            }
        }

        if forced {
            log::debug!("forced cut due but no split point in {length} chars");
            SegmentationDecision::hold(SegmentReason::NoValidSplit)
        } else {
            SegmentationDecision::hold(SegmentReason::Continue)
        }
    }

    /// Both the pairwise and the windowed score must fall below the threshold.
    fn drifts_from_history<S: AsRef<str>>(&mut self, sentence: &str, history: &[S]) -> bool {
        let Some(previous) = history.last() else {
            return false;
        };
        let threshold = self.config.similarity_threshold;
        if self.estimator.similarity(previous.as_ref(), sentence) >= threshold {
            return false;
        }

        let mut window: Vec<&str> = history.iter().map(AsRef::as_ref).collect();
        window.push(sentence);
        coherence_score(self.estimator, &window, self.config.coherence_window) < threshold
    }

    /// Finds the best byte offset to force a cut at, offset by `base_offset`.
    ///
    /// Every adjacent sentence pair whose first sentence is complete is a
    /// candidate. Returns `None` when no candidate qualifies.
    pub fn find_best_segment_point(
        &mut self,
        text: &str,
        base_offset: usize,
        opts: &ResolvedOptions,
    ) -> Option<usize> {
        let spans = split_spans(text);
        if spans.len() < 2 {
            return None;
        }

        let last_pair = spans.len() - 2;
        let mut candidates = Vec::with_capacity(spans.len() - 1);
        let mut previous_similarity = 0.0;

        for (i, pair) in spans.windows(2).enumerate() {
            let current = pair[0].as_str(text);
            let next = pair[1].as_str(text);
            let similarity = self.estimator.similarity(current, next);
            let backward = std::mem::replace(&mut previous_similarity, similarity);

            if !is_complete_sentence(current, self.config) {
                continue;
            }

            let mut score = similarity;
            if is_complete_sentence(next, self.config) {
                score += NEXT_COMPLETE_BONUS;
            }
            if i > 0 && i < last_pair {
                score = score * FORWARD_WEIGHT + backward * BACKWARD_WEIGHT;
            }
            if is_structural(next) {
                score += STRUCTURAL_BONUS;
            }
            if first_breaking_marker(next).is_some() {
                score += MARKER_BONUS;
            }

            candidates.push(Candidate {
                score,
                position: base_offset + pair[0].end,
            });
        }

        // Stable: equal scores keep text order
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        let threshold = self.config.similarity_threshold;
        if let Some(candidate) = candidates.iter().find(|c| c.score >= threshold) {
            return Some(candidate.position);
        }

        let best = candidates.first()?;
        let within_budget = char_len(text) < opts.force_chars.saturating_mul(2);
        (best.score > FALLBACK_MIN_SCORE && within_budget).then_some(best.position)
    }
}
