//! Windowed coherence over a run of sentences

use super::similarity::SimilarityEstimator;

/// Mean similarity over the last `window` adjacent pairs of `sentences`.
///
/// Fewer than two sentences carry no evidence for a break, so the score is
/// then 1.0. A zero window is treated as one pair.
pub fn coherence_score<S: AsRef<str>>(
    estimator: &mut SimilarityEstimator,
    sentences: &[S],
    window: usize,
) -> f64 {
    if sentences.len() < 2 {
        return 1.0;
    }

    let pairs = (sentences.len() - 1).min(window.max(1));
    let first = sentences.len() - 1 - pairs;
    let total: f64 = sentences[first..]
        .windows(2)
        .map(|pair| estimator.similarity(pair[0].as_ref(), pair[1].as_ref()))
        .sum();

    total / pairs as f64
}
