//! Segmentation session
//!
//! A [`Segmenter`] owns the configuration and the similarity cache for one
//! stream (or one group of streams that share a cache). All engine entry
//! points take `&mut self`, so a configuration change can never interleave
//! with a decision in progress.

use super::decision::SegmentationDecision;
use super::engine::Engine;
use super::pacing;
use super::similarity::SimilarityEstimator;
use super::stream::StreamSession;
use crate::application::cache::CacheStats;
use crate::config::{ConfigUpdate, SegmentOptions, SegmentationConfig};
use crate::domain::splitter;
use crate::error::Result;

/// Creates a session with the default configuration
pub fn create_segmenter() -> Segmenter {
    Segmenter::new()
}

/// Stateful segmentation session
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmentationConfig,
    estimator: SimilarityEstimator,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// Creates a session with the default configuration
    pub fn new() -> Self {
        let config = SegmentationConfig::default();
        let estimator = SimilarityEstimator::new(config.cache_max_size);
        Self { config, estimator }
    }

    /// Creates a session with a validated configuration
    pub fn with_config(config: SegmentationConfig) -> Result<Self> {
        config.validate()?;
        let estimator = SimilarityEstimator::new(config.cache_max_size);
        Ok(Self { config, estimator })
    }

    /// Current configuration
    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Merges `update` into the configuration.
    ///
    /// The merged configuration is validated first; on error nothing
    /// changes. A new cache size takes effect immediately.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<()> {
        let mut next = self.config.clone();
        next.apply(&update);
        next.validate()?;

        if next.cache_max_size != self.config.cache_max_size {
            self.estimator.resize_cache(next.cache_max_size);
        }
        log::debug!("segmentation config updated: {update:?}");
        self.config = next;
        Ok(())
    }

    /// Empties the similarity cache
    pub fn clear_cache(&mut self) {
        self.estimator.clear_cache();
        log::debug!("similarity cache cleared");
    }

    /// Similarity cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.estimator.cache_stats()
    }

    /// Splits `text` into sentences; `None` is treated as empty text
    pub fn split_into_sentences<'a>(&self, text: impl Into<Option<&'a str>>) -> Vec<String> {
        splitter::split_into_sentences(text.into().unwrap_or_default())
    }

    /// Similarity of two sentences, served from the session cache
    pub fn similarity(&mut self, a: &str, b: &str) -> f64 {
        self.estimator.similarity(a, b)
    }

    /// Decides whether the accumulated `text` should be segmented now.
    ///
    /// `history` holds previously finalized sentences, oldest first. `None`
    /// text is treated as empty.
    pub fn should_segment<'a, S: AsRef<str>>(
        &mut self,
        text: impl Into<Option<&'a str>>,
        history: &[S],
        opts: &SegmentOptions,
    ) -> SegmentationDecision {
        let text = text.into().unwrap_or_default();
        let resolved = opts.resolve(&self.config);
        self.engine().should_segment(text, history, &resolved)
    }

    /// Best byte offset for a forced cut in `text`, shifted by `base_offset`
    pub fn find_best_segment_point(
        &mut self,
        text: &str,
        base_offset: usize,
        opts: &SegmentOptions,
    ) -> Option<usize> {
        let resolved = opts.resolve(&self.config);
        self.engine()
            .find_best_segment_point(text, base_offset, &resolved)
    }

    /// Suggested pacing delay in milliseconds after the end of `text`
    pub fn calculate_adaptive_delay<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        opts: &SegmentOptions,
    ) -> u64 {
        let resolved = opts.resolve(&self.config);
        pacing::calculate_adaptive_delay(text.into().unwrap_or_default(), &resolved)
    }

    /// Starts a streaming session with default per-call options
    pub fn stream(&mut self) -> StreamSession<'_> {
        StreamSession::new(self, SegmentOptions::default())
    }

    /// Starts a streaming session with the given per-call options
    pub fn stream_with(&mut self, options: SegmentOptions) -> StreamSession<'_> {
        StreamSession::new(self, options)
    }

    fn engine(&mut self) -> Engine<'_> {
        Engine {
            config: &self.config,
            estimator: &mut self.estimator,
        }
    }
}
