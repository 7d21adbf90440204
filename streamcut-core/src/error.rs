//! Error types for configuration handling
//!
//! The segmentation entry points never fail: malformed text degrades to a
//! conservative decision. Errors only arise while building, updating or
//! loading a [`SegmentationConfig`](crate::SegmentationConfig).

use std::path::PathBuf;
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range or inconsistent
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// TOML configuration could not be parsed
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration file could not be read
    #[error("failed to read configuration file {}: {source}", path.display())]
    ConfigIo {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Unknown stream pace preset name
    #[error("unknown stream pace preset: {0}")]
    UnknownPreset(String),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = Error::invalid("coherence_window", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration for `coherence_window`: must be greater than 0"
        );
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }

    #[test]
    fn test_unknown_preset_display() {
        let err = Error::UnknownPreset("turbo".to_string());
        assert_eq!(err.to_string(), "unknown stream pace preset: turbo");
    }
}
