//! Configuration module
//!
//! The CLI reads one TOML file with a `[segmentation]` table handed to the
//! engine unchanged and a `[replay]` table for the simulated stream.

use crate::error::CliError;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use streamcut_core::SegmentationConfig;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Engine configuration
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Replay configuration
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Replay-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    /// Characters per simulated delta
    pub chunk_chars: usize,

    /// Simulated milliseconds between deltas
    pub chunk_interval_ms: u64,

    /// Default output format
    pub format: OutputFormat,

    /// Normalize input before streaming it
    pub normalize: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 4,
            chunk_interval_ms: 50,
            format: OutputFormat::Text,
            normalize: false,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = fs::read_to_string(path)
            .map_err(|_| CliError::FileNotFound(path.display().to_string()))?;
        let config: Self = toml::from_str(&source)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        config.segmentation.validate()?;
        if config.replay.chunk_chars == 0 {
            return Err(CliError::ConfigError(
                "replay.chunk_chars must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}
