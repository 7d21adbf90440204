//! Split command implementation

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use streamcut_core::{normalize_text, split_into_sentences};

use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, OutputFormat, OutputRecord};
use crate::progress::ProgressReporter;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Normalize line endings and whitespace before splitting
    #[arg(long)]
    pub normalize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::info!("Starting sentence splitting");
        log::debug!("Arguments: {:?}", self);

        let files = resolve_patterns(&self.input)?;
        log::info!(
            "Splitting {} file(s), {} bytes",
            files.len(),
            FileReader::total_size(&files)?
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);
        let multiple = files.len() > 1;

        let results: Vec<Result<Vec<OutputRecord>>> = files
            .par_iter()
            .map(|path| -> Result<Vec<OutputRecord>> {
                let mut text = FileReader::read_text(path)?;
                if self.normalize {
                    text = normalize_text(&text);
                }
                let source = multiple.then(|| path.display().to_string());
                let records = split_into_sentences(&text)
                    .into_iter()
                    .enumerate()
                    .map(|(index, sentence)| {
                        OutputRecord::sentence(source.clone(), index, sentence)
                    })
                    .collect();
                progress.file_completed(&path.display().to_string());
                Ok(records)
            })
            .collect();

        let mut formatter = create_formatter(self.format, self.output.as_deref())?;
        let mut total = 0;
        for records in results {
            for record in records? {
                formatter.write_record(&record)?;
                total += 1;
            }
        }
        formatter.finish()?;
        progress.finish();

        log::info!("Split complete: {} sentences", total);
        Ok(())
    }
}
