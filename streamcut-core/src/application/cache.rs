//! Bounded similarity cache with insertion-order eviction
//!
//! Entries are evicted strictly in the order they were inserted; a lookup
//! hit does not refresh an entry.

use std::collections::{HashMap, VecDeque};

/// Ordered pair of sentences; `(a, b)` and `(b, a)` are distinct keys
type PairKey = (String, String);

/// Counters describing cache behaviour over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to compute the score
    pub misses: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Entries currently stored
    pub size: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// FIFO-bounded map from sentence pairs to similarity scores
#[derive(Debug, Clone, Default)]
pub struct SimilarityCache {
    entries: HashMap<PairKey, f64>,
    order: VecDeque<PairKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl SimilarityCache {
    /// Creates a cache holding at most `capacity` scores; zero disables caching
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Looks up the score for the ordered pair `(a, b)`
    pub fn get(&mut self, a: &str, b: &str) -> Option<f64> {
        // Tuple keys cannot be borrowed as (&str, &str), so probe with owned strings
        let score = self.entries.get(&(a.to_owned(), b.to_owned())).copied();
        match score {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        score
    }

    /// Stores a score, evicting the oldest entries when full
    pub fn insert(&mut self, a: &str, b: &str, score: f64) {
        if self.capacity == 0 {
            return;
        }
        let key = (a.to_owned(), b.to_owned());
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = score;
            return;
        }
        self.evict_to(self.capacity - 1);
        self.order.push_back(key.clone());
        self.entries.insert(key, score);
    }

    /// Drops every entry; the counters are kept
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Changes the capacity, evicting the oldest entries if it shrank
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict_to(capacity);
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            size: self.entries.len(),
        }
    }

    fn evict_to(&mut self, limit: usize) {
        while self.order.len() > limit {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                self.evictions += 1;
                log::trace!("evicted cached similarity ({} entries left)", self.order.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_insert() {
        let mut cache = SimilarityCache::new(4);
        assert_eq!(cache.get("a", "b"), None);
        cache.insert("a", "b", 0.5);
        assert_eq!(cache.get("a", "b"), Some(0.5));
        // Order matters
        assert_eq!(cache.get("b", "a"), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn test_bound_and_insertion_order_eviction() {
        let mut cache = SimilarityCache::new(3);
        cache.insert("1", "x", 0.1);
        cache.insert("2", "x", 0.2);
        cache.insert("3", "x", 0.3);

        // A hit does not protect the oldest entry
        assert_eq!(cache.get("1", "x"), Some(0.1));

        cache.insert("4", "x", 0.4);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("1", "x"), None);
        assert_eq!(cache.get("2", "x"), Some(0.2));
        assert_eq!(cache.get("4", "x"), Some(0.4));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_reinsert_does_not_grow() {
        let mut cache = SimilarityCache::new(2);
        cache.insert("a", "b", 0.1);
        cache.insert("a", "b", 0.9);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a", "b"), Some(0.9));
    }

    #[test]
    fn test_zero_capacity_disables() {
        let mut cache = SimilarityCache::new(0);
        cache.insert("a", "b", 0.5);
        assert!(cache.is_empty());
        assert_eq!(cache.get("a", "b"), None);
    }

    #[test]
    fn test_resize_and_clear() {
        let mut cache = SimilarityCache::new(5);
        for key in ["1", "2", "3", "4", "5"] {
            cache.insert(key, "x", 0.0);
        }
        cache.resize(2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.get("4", "x"), Some(0.0));
        assert_eq!(cache.get("3", "x"), None);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions, 3);
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = SimilarityCache::new(2);
        assert_eq!(cache.stats().hit_rate(), 0.0);
        cache.insert("a", "b", 1.0);
        cache.get("a", "b");
        cache.get("c", "d");
        assert_eq!(cache.stats().hit_rate(), 0.5);
    }
}
