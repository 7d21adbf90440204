//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Flag combination the engine cannot run with
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<streamcut_core::Error> for CliError {
    fn from(err: streamcut_core::Error) -> Self {
        CliError::ConfigError(err.to_string())
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("answer.txt".to_string());
        assert_eq!(error.to_string(), "File not found: answer.txt");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_invalid_argument_display() {
        let error = CliError::InvalidArgument("--chunk-chars must be at least 1".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid argument: --chunk-chars must be at least 1"
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let core = streamcut_core::SegmentationConfig::builder()
            .segment_chars(50, 10)
            .build()
            .unwrap_err();
        let error = CliError::from(core);
        assert!(matches!(error, CliError::ConfigError(_)));
        assert!(error.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_anyhow_wrapping() {
        let result: CliResult<()> = Err(CliError::FileNotFound("missing.txt".to_string()).into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("missing.txt"));
    }
}
