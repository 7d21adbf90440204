//! Segmentation configuration
//!
//! [`SegmentationConfig`] holds the policy parameters read on every decision.
//! It is created with defaults, optionally loaded from TOML, and only changed
//! through an explicit [`ConfigUpdate`] merge. [`SegmentOptions`] carries the
//! per-call overrides supplied by the streaming consumer.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default configuration constants
pub mod defaults {
    /// Similarity below which two sentences are considered unrelated
    pub const SIMILARITY_THRESHOLD: f64 = 0.3;

    /// Shortest sentence (in characters) that can count as complete
    pub const MIN_SENTENCE_LENGTH: usize = 5;

    /// Longest sentence (in characters) that can count as complete
    pub const MAX_SENTENCE_LENGTH: usize = 200;

    /// Number of adjacent sentence pairs averaged by the coherence window
    pub const COHERENCE_WINDOW: usize = 3;

    /// Maximum number of memoized similarity scores
    pub const CACHE_MAX_SIZE: usize = 500;

    /// Accumulated characters required before any segmentation is considered
    pub const MIN_SEGMENT_CHARS: usize = 20;

    /// Accumulated characters after which a cut is forced
    pub const MAX_SEGMENT_CHARS: usize = 300;

    /// Milliseconds after which a cut is forced
    pub const FORCE_TIME_MS: u64 = 3_000;

    /// Base pacing delay in milliseconds
    pub const BASE_DELAY_MS: u64 = 30;

    /// Pacing delay at a sentence end in milliseconds
    pub const SENTENCE_END_DELAY_MS: u64 = 150;
}

/// Policy parameters for the segmentation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Similarity threshold in `[0, 1]`
    pub similarity_threshold: f64,

    /// Minimum sentence length in characters
    pub min_sentence_length: usize,

    /// Maximum sentence length in characters
    pub max_sentence_length: usize,

    /// Coherence window size (adjacent pairs)
    pub coherence_window: usize,

    /// Similarity cache capacity (0 disables memoization)
    pub cache_max_size: usize,

    /// Minimum segment budget in characters
    pub min_segment_chars: usize,

    /// Maximum segment budget in characters, the default force length
    pub max_segment_chars: usize,

    /// Default force-time budget in milliseconds
    pub force_time_ms: u64,

    /// Default base delay in milliseconds
    pub base_delay_ms: u64,

    /// Default sentence-end delay in milliseconds
    pub sentence_end_delay_ms: u64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::SIMILARITY_THRESHOLD,
            min_sentence_length: defaults::MIN_SENTENCE_LENGTH,
            max_sentence_length: defaults::MAX_SENTENCE_LENGTH,
            coherence_window: defaults::COHERENCE_WINDOW,
            cache_max_size: defaults::CACHE_MAX_SIZE,
            min_segment_chars: defaults::MIN_SEGMENT_CHARS,
            max_segment_chars: defaults::MAX_SEGMENT_CHARS,
            force_time_ms: defaults::FORCE_TIME_MS,
            base_delay_ms: defaults::BASE_DELAY_MS,
            sentence_end_delay_ms: defaults::SENTENCE_END_DELAY_MS,
        }
    }
}

impl SegmentationConfig {
    /// Creates a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Creates the configuration for a stream pace preset
    pub fn for_pace(pace: StreamPace) -> Self {
        let mut config = Self::default();
        config.apply(&pace.update());
        config
    }

    /// Parses a configuration from TOML; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Renders the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::invalid(
                "similarity_threshold",
                format!("{} is outside [0, 1]", self.similarity_threshold),
            ));
        }

        if self.max_sentence_length == 0 {
            return Err(Error::invalid(
                "max_sentence_length",
                "must be greater than 0",
            ));
        }

        if self.min_sentence_length > self.max_sentence_length {
            return Err(Error::invalid(
                "min_sentence_length",
                format!(
                    "{} exceeds max_sentence_length {}",
                    self.min_sentence_length, self.max_sentence_length
                ),
            ));
        }

        if self.coherence_window == 0 {
            return Err(Error::invalid("coherence_window", "must be greater than 0"));
        }

        if self.max_segment_chars == 0 {
            return Err(Error::invalid("max_segment_chars", "must be greater than 0"));
        }

        if self.min_segment_chars > self.max_segment_chars {
            return Err(Error::invalid(
                "min_segment_chars",
                format!(
                    "{} exceeds max_segment_chars {}",
                    self.min_segment_chars, self.max_segment_chars
                ),
            ));
        }

        Ok(())
    }

    /// Shallow-merges an update into this configuration without validating
    pub(crate) fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(value) = update.similarity_threshold {
            self.similarity_threshold = value;
        }
        if let Some(value) = update.min_sentence_length {
            self.min_sentence_length = value;
        }
        if let Some(value) = update.max_sentence_length {
            self.max_sentence_length = value;
        }
        if let Some(value) = update.coherence_window {
            self.coherence_window = value;
        }
        if let Some(value) = update.cache_max_size {
            self.cache_max_size = value;
        }
        if let Some(value) = update.min_segment_chars {
            self.min_segment_chars = value;
        }
        if let Some(value) = update.max_segment_chars {
            self.max_segment_chars = value;
        }
        if let Some(value) = update.force_time_ms {
            self.force_time_ms = value;
        }
        if let Some(value) = update.base_delay_ms {
            self.base_delay_ms = value;
        }
        if let Some(value) = update.sentence_end_delay_ms {
            self.sentence_end_delay_ms = value;
        }
    }
}

/// Partial configuration applied by [`Segmenter::update_config`](crate::Segmenter::update_config)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    pub similarity_threshold: Option<f64>,
    pub min_sentence_length: Option<usize>,
    pub max_sentence_length: Option<usize>,
    pub coherence_window: Option<usize>,
    pub cache_max_size: Option<usize>,
    pub min_segment_chars: Option<usize>,
    pub max_segment_chars: Option<usize>,
    pub force_time_ms: Option<u64>,
    pub base_delay_ms: Option<u64>,
    pub sentence_end_delay_ms: Option<u64>,
}

/// Fluent builder for [`SegmentationConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    update: ConfigUpdate,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold
    pub fn similarity_threshold(mut self, value: f64) -> Self {
        self.update.similarity_threshold = Some(value);
        self
    }

    /// Set the accepted sentence length range in characters
    pub fn sentence_length(mut self, min: usize, max: usize) -> Self {
        self.update.min_sentence_length = Some(min);
        self.update.max_sentence_length = Some(max);
        self
    }

    /// Set the coherence window size
    pub fn coherence_window(mut self, pairs: usize) -> Self {
        self.update.coherence_window = Some(pairs);
        self
    }

    /// Set the similarity cache capacity
    pub fn cache_max_size(mut self, entries: usize) -> Self {
        self.update.cache_max_size = Some(entries);
        self
    }

    /// Set the segment character budgets
    pub fn segment_chars(mut self, min: usize, max: usize) -> Self {
        self.update.min_segment_chars = Some(min);
        self.update.max_segment_chars = Some(max);
        self
    }

    /// Set the force-time budget
    pub fn force_time_ms(mut self, ms: u64) -> Self {
        self.update.force_time_ms = Some(ms);
        self
    }

    /// Set the pacing delays
    pub fn delays(mut self, base_ms: u64, sentence_end_ms: u64) -> Self {
        self.update.base_delay_ms = Some(base_ms);
        self.update.sentence_end_delay_ms = Some(sentence_end_ms);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SegmentationConfig> {
        let mut config = SegmentationConfig::default();
        config.apply(&self.update);
        config.validate()?;
        Ok(config)
    }
}

/// User-facing stream pace presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamPace {
    /// Short pauses, smaller segments
    Fast,
    /// Library defaults
    #[default]
    Balanced,
    /// Long reading pauses, larger segments
    Relaxed,
}

impl StreamPace {
    /// All presets in display order
    pub const ALL: [StreamPace; 3] = [StreamPace::Fast, StreamPace::Balanced, StreamPace::Relaxed];

    /// Preset name
    pub fn name(&self) -> &'static str {
        match self {
            StreamPace::Fast => "fast",
            StreamPace::Balanced => "balanced",
            StreamPace::Relaxed => "relaxed",
        }
    }

    /// Configuration update applied by this preset
    pub fn update(&self) -> ConfigUpdate {
        match self {
            StreamPace::Fast => ConfigUpdate {
                max_segment_chars: Some(200),
                force_time_ms: Some(1_500),
                base_delay_ms: Some(10),
                sentence_end_delay_ms: Some(60),
                ..Default::default()
            },
            StreamPace::Balanced => ConfigUpdate {
                max_segment_chars: Some(defaults::MAX_SEGMENT_CHARS),
                force_time_ms: Some(defaults::FORCE_TIME_MS),
                base_delay_ms: Some(defaults::BASE_DELAY_MS),
                sentence_end_delay_ms: Some(defaults::SENTENCE_END_DELAY_MS),
                ..Default::default()
            },
            StreamPace::Relaxed => ConfigUpdate {
                max_segment_chars: Some(400),
                force_time_ms: Some(5_000),
                base_delay_ms: Some(50),
                sentence_end_delay_ms: Some(300),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for StreamPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StreamPace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(StreamPace::Fast),
            "balanced" => Ok(StreamPace::Balanced),
            "relaxed" => Ok(StreamPace::Relaxed),
            _ => Err(Error::UnknownPreset(s.to_string())),
        }
    }
}

/// Per-call overrides supplied by the streaming consumer
///
/// Unset fields fall back to the session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Characters required before segmentation is considered
    pub min_chars: Option<usize>,
    /// Characters after which a cut is forced
    pub force_chars: Option<usize>,
    /// Milliseconds after which a cut is forced
    pub force_time_ms: Option<u64>,
    /// Milliseconds since the current segment started
    pub elapsed_ms: Option<u64>,
    /// Base pacing delay
    pub base_delay_ms: Option<u64>,
    /// Sentence-end pacing delay
    pub sentence_end_delay_ms: Option<u64>,
}

impl SegmentOptions {
    /// Options with every value taken from the configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the minimum character budget
    pub fn min_chars(mut self, chars: usize) -> Self {
        self.min_chars = Some(chars);
        self
    }

    /// Override the force length
    pub fn force_chars(mut self, chars: usize) -> Self {
        self.force_chars = Some(chars);
        self
    }

    /// Override the force time
    pub fn force_time_ms(mut self, ms: u64) -> Self {
        self.force_time_ms = Some(ms);
        self
    }

    /// Report how long the current segment has been open
    pub fn elapsed_ms(mut self, ms: u64) -> Self {
        self.elapsed_ms = Some(ms);
        self
    }

    /// Override the base delay
    pub fn base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = Some(ms);
        self
    }

    /// Override the sentence-end delay
    pub fn sentence_end_delay_ms(mut self, ms: u64) -> Self {
        self.sentence_end_delay_ms = Some(ms);
        self
    }

    pub(crate) fn resolve(&self, config: &SegmentationConfig) -> ResolvedOptions {
        ResolvedOptions {
            min_chars: self.min_chars.unwrap_or(config.min_segment_chars),
            force_chars: self.force_chars.unwrap_or(config.max_segment_chars).max(1),
            force_time_ms: self.force_time_ms.unwrap_or(config.force_time_ms),
            elapsed_ms: self.elapsed_ms,
            base_delay_ms: self.base_delay_ms.unwrap_or(config.base_delay_ms),
            sentence_end_delay_ms: self
                .sentence_end_delay_ms
                .unwrap_or(config.sentence_end_delay_ms),
        }
    }
}

/// Options after merging per-call overrides with the configuration
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedOptions {
    pub min_chars: usize,
    pub force_chars: usize,
    pub force_time_ms: u64,
    pub elapsed_ms: Option<u64>,
    pub base_delay_ms: u64,
    pub sentence_end_delay_ms: u64,
}
