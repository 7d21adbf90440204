//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use streamcut_core::{SegmentationConfig, StreamPace};

use crate::config::ReplayConfig;
use crate::error::CliError;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Preset whose values fill the template
    #[arg(short, long, value_name = "PACE", default_value = "balanced")]
    pub pace: StreamPace,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            return Err(CliError::InvalidArgument(format!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            ))
            .into());
        }

        println!("Generating configuration template...");
        println!("  Pace preset: {}", self.pace);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template();

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the thresholds and budgets to taste");
        println!("2. Replay a saved answer with it:");
        println!(
            "   streamcut replay -i answer.txt --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        let engine = SegmentationConfig::for_pace(self.pace);
        let replay = ReplayConfig::default();
        format!(
            r#"# streamcut configuration ({pace} pace)

# Engine policy, passed to the segmenter as-is
[segmentation]
# Jaccard similarity below which the last sentence counts as a topic drift
similarity_threshold = {similarity_threshold:?}

# A sentence must hold at least this many characters to count as complete
min_sentence_length = {min_sentence_length}
max_sentence_length = {max_sentence_length}

# Number of adjacent sentence pairs averaged for the coherence score
coherence_window = {coherence_window}

# Similarity cache entries (0 disables caching)
cache_max_size = {cache_max_size}

# Segment length budget in characters; reaching the maximum forces a cut
min_segment_chars = {min_segment_chars}
max_segment_chars = {max_segment_chars}

# Time budget for one segment before a cut is forced
force_time_ms = {force_time_ms}

# Pacing hints attached to emitted segments
base_delay_ms = {base_delay_ms}
sentence_end_delay_ms = {sentence_end_delay_ms}

# Simulated stream used by `streamcut replay`
[replay]
chunk_chars = {chunk_chars}
chunk_interval_ms = {chunk_interval_ms}
# One of: text, json, markdown
format = "{format}"
normalize = {normalize}
"#,
            pace = self.pace,
            similarity_threshold = engine.similarity_threshold,
            min_sentence_length = engine.min_sentence_length,
            max_sentence_length = engine.max_sentence_length,
            coherence_window = engine.coherence_window,
            cache_max_size = engine.cache_max_size,
            min_segment_chars = engine.min_segment_chars,
            max_segment_chars = engine.max_segment_chars,
            force_time_ms = engine.force_time_ms,
            base_delay_ms = engine.base_delay_ms,
            sentence_end_delay_ms = engine.sentence_end_delay_ms,
            chunk_chars = replay.chunk_chars,
            chunk_interval_ms = replay.chunk_interval_ms,
            format = replay.format.name(),
            normalize = replay.normalize,
        )
    }
}
