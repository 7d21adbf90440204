//! Memoized Jaccard similarity between sentences

use super::cache::{CacheStats, SimilarityCache};
use crate::domain::chars::char_len;
use crate::domain::tokenizer::tokenize;
use std::collections::HashSet;

/// Jaccard index of the content-word sets of `a` and `b`.
///
/// Returns 0.0 when either side is shorter than two characters or has no
/// content words.
pub fn jaccard(a: &str, b: &str) -> f64 {
    if char_len(a) < 2 || char_len(b) < 2 {
        return 0.0;
    }

    let left: HashSet<String> = tokenize(a).into_iter().collect();
    let right: HashSet<String> = tokenize(b).into_iter().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let shared = left.intersection(&right).count();
    let total = left.union(&right).count();
    shared as f64 / total as f64
}

/// Similarity estimator backed by a session cache
#[derive(Debug, Clone)]
pub struct SimilarityEstimator {
    cache: SimilarityCache,
}

impl SimilarityEstimator {
    /// Creates an estimator whose cache holds at most `capacity` scores
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: SimilarityCache::new(capacity),
        }
    }

    /// Similarity of `a` and `b` in `[0, 1]`, served from the cache when possible
    pub fn similarity(&mut self, a: &str, b: &str) -> f64 {
        if let Some(score) = self.cache.get(a, b) {
            return score;
        }
        let score = jaccard(a, b);
        self.cache.insert(a, b, score);
        score
    }

    /// Empties the cache
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Changes the cache capacity
    pub fn resize_cache(&mut self, capacity: usize) {
        self.cache.resize(capacity);
    }

    /// Cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
