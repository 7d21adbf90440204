//! Output formatting module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use streamcut_core::{CutKind, MarkerKind, Segment, SegmentReason};

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one record per line
    #[default]
    Text,
    /// JSON array of records with metadata
    Json,
    /// Markdown formatted output
    Markdown,
}

impl OutputFormat {
    /// All formats in display order
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Markdown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "Plain text, segments separated by blank lines",
            OutputFormat::Json => "JSON array with cut kind, reason and delay per record",
            OutputFormat::Markdown => "Numbered Markdown list with a summary footer",
        }
    }
}

/// One line of output: a split sentence or a streamed segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    /// Input file the record came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Zero-based position within its source
    pub index: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut: Option<CutKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SegmentReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_type: Option<MarkerKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl OutputRecord {
    /// Record for a sentence from the splitter
    pub fn sentence(source: Option<String>, index: usize, text: String) -> Self {
        Self {
            source,
            index,
            text,
            cut: None,
            reason: None,
            marker_type: None,
            delay_ms: None,
        }
    }

    /// Record for a segment emitted by a stream session
    pub fn segment(source: Option<String>, segment: Segment) -> Self {
        Self {
            source,
            index: segment.index,
            text: segment.text,
            cut: Some(segment.cut),
            reason: segment.reason,
            marker_type: segment.marker_type,
            delay_ms: Some(segment.delay_ms),
        }
    }

    /// Whether this record came from a stream session
    pub fn is_segment(&self) -> bool {
        self.cut.is_some()
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Format and output a single record
    fn write_record(&mut self, record: &OutputRecord) -> Result<()>;

    /// Push buffered records to the writer; formatters that only render on
    /// `finish` keep the default
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Build a formatter writing to `output`, or stdout when absent
pub fn create_formatter(
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Box<dyn OutputFormatter>> {
    let writer: Box<dyn Write + Send> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    })
}
