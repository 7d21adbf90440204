//! Replay command implementation
//!
//! Feeds each input file to a [`StreamSession`](streamcut_core::StreamSession)
//! in fixed-size character deltas, the way a model would stream it, and
//! prints the segments the engine closes.

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use streamcut_core::{normalize_text, Segment, SegmentOptions, Segmenter, StreamPace};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, OutputFormat, OutputRecord};
use crate::progress::ProgressReporter;

/// Arguments for the replay command
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: from config, else text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "STREAMCUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stream pace preset (fast, balanced, relaxed)
    #[arg(short, long, value_name = "PACE")]
    pub pace: Option<StreamPace>,

    /// Characters per simulated delta
    #[arg(long, value_name = "N")]
    pub chunk_chars: Option<usize>,

    /// Simulated milliseconds between deltas
    #[arg(long, value_name = "MS")]
    pub chunk_interval_ms: Option<u64>,

    /// Override the minimum segment length in characters
    #[arg(long, value_name = "N")]
    pub min_chars: Option<usize>,

    /// Override the forced-cut length in characters
    #[arg(long, value_name = "N")]
    pub force_chars: Option<usize>,

    /// Override the forced-cut time budget
    #[arg(long, value_name = "MS")]
    pub force_time_ms: Option<u64>,

    /// Sleep for real between deltas and honour segment delays
    #[arg(long)]
    pub realtime: bool,

    /// Normalize line endings and whitespace before streaming
    #[arg(long)]
    pub normalize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved replay parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayPlan {
    pub chunk_chars: usize,
    pub chunk_interval_ms: u64,
    pub options: SegmentOptions,
}

impl ReplayArgs {
    /// Execute the replay command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::info!("Starting replay");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let segmenter = self.build_segmenter(&config)?;
        let plan = self.plan(&config)?;
        let format = self.format.unwrap_or(config.replay.format);
        let normalize = self.normalize || config.replay.normalize;

        let files = resolve_patterns(&self.input)?;
        log::info!("Replaying {} file(s) with plan {:?}", files.len(), plan);

        let mut formatter = create_formatter(format, self.output.as_deref())?;
        let multiple = files.len() > 1;

        if self.realtime {
            for path in &files {
                let source = multiple.then(|| path.display().to_string());
                let text = read_input(path, normalize)?;
                let mut segmenter = segmenter.clone();
                let emit = |segment: Segment| -> Result<()> {
                    let delay = segment.delay_ms;
                    formatter.write_record(&OutputRecord::segment(source.clone(), segment))?;
                    formatter.flush()?;
                    thread::sleep(Duration::from_millis(delay));
                    Ok(())
                };
                replay_text(&mut segmenter, &text, &plan, emit, |interval| {
                    thread::sleep(Duration::from_millis(interval))
                })?;
            }
        } else {
            let mut progress = ProgressReporter::new(self.quiet);
            progress.init_files(files.len() as u64);

            let results: Vec<Result<Vec<OutputRecord>>> = files
                .par_iter()
                .map(|path| -> Result<Vec<OutputRecord>> {
                    let text = read_input(path, normalize)?;
                    let mut segmenter = segmenter.clone();
                    let source = multiple.then(|| path.display().to_string());
                    let mut records = Vec::new();
                    let collect = |segment: Segment| -> Result<()> {
                        records.push(OutputRecord::segment(source.clone(), segment));
                        Ok(())
                    };
                    replay_text(&mut segmenter, &text, &plan, collect, |_| {})?;
                    progress.file_completed(&path.display().to_string());
                    Ok(records)
                })
                .collect();

            for records in results {
                for record in records? {
                    formatter.write_record(&record)?;
                }
            }
            progress.finish();
        }

        formatter.finish()?;
        log::info!("Replay complete");
        Ok(())
    }

    /// Engine for this run: config file values with the preset applied on top
    fn build_segmenter(&self, config: &CliConfig) -> Result<Segmenter> {
        let mut segmenter =
            Segmenter::with_config(config.segmentation.clone()).map_err(CliError::from)?;
        if let Some(pace) = self.pace {
            segmenter.update_config(pace.update()).map_err(CliError::from)?;
        }
        Ok(segmenter)
    }

    /// Chunking and per-call overrides from the config file and flags
    fn plan(&self, config: &CliConfig) -> Result<ReplayPlan> {
        let chunk_chars = self.chunk_chars.unwrap_or(config.replay.chunk_chars);
        if chunk_chars == 0 {
            let reason = "--chunk-chars must be at least 1".to_string();
            return Err(CliError::InvalidArgument(reason).into());
        }
        if self.force_chars == Some(0) {
            let reason = "--force-chars must be at least 1".to_string();
            return Err(CliError::InvalidArgument(reason).into());
        }

        let mut options = SegmentOptions::new();
        options.min_chars = self.min_chars;
        options.force_chars = self.force_chars;
        options.force_time_ms = self.force_time_ms;

        Ok(ReplayPlan {
            chunk_chars,
            chunk_interval_ms: self
                .chunk_interval_ms
                .unwrap_or(config.replay.chunk_interval_ms),
            options,
        })
    }
}

fn read_input(path: &Path, normalize: bool) -> Result<String> {
    let text = FileReader::read_text(path)?;
    Ok(if normalize { normalize_text(&text) } else { text })
}

/// Streams `text` through a session in `plan.chunk_chars` deltas.
///
/// The simulated clock advances `plan.chunk_interval_ms` per delta and is
/// reset whenever a segment closes. `wait` is called with the interval
/// before each delta after the first. Returns the number of segments.
pub fn replay_text<F, W>(
    segmenter: &mut Segmenter,
    text: &str,
    plan: &ReplayPlan,
    mut on_segment: F,
    mut wait: W,
) -> Result<usize>
where
    F: FnMut(Segment) -> Result<()>,
    W: FnMut(u64),
{
    let chars: Vec<char> = text.chars().collect();
    let mut session = segmenter.stream_with(plan.options);
    let mut elapsed_ms = 0u64;
    let mut count = 0;

    for (i, chunk) in chars.chunks(plan.chunk_chars.max(1)).enumerate() {
        if i > 0 {
            wait(plan.chunk_interval_ms);
            elapsed_ms = elapsed_ms.saturating_add(plan.chunk_interval_ms);
        }
        let delta: String = chunk.iter().collect();
        let segments = session.push_after(&delta, elapsed_ms);
        if !segments.is_empty() {
            elapsed_ms = 0;
        }
        for segment in segments {
            count += 1;
            on_segment(segment)?;
        }
    }

    if let Some(segment) = session.finish() {
        count += 1;
        on_segment(segment)?;
    }

    log::debug!("{} chars replayed into {} segments", chars.len(), count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamcut_core::{CutKind, SegmentReason};

    fn plan(chunk_chars: usize, chunk_interval_ms: u64) -> ReplayPlan {
        ReplayPlan {
            chunk_chars,
            chunk_interval_ms,
            options: SegmentOptions::new(),
        }
    }

    fn collect(text: &str, plan: &ReplayPlan) -> Vec<Segment> {
        let mut segmenter = Segmenter::new();
        let mut segments = Vec::new();
        let count = replay_text(
            &mut segmenter,
            text,
            plan,
            |segment| {
                segments.push(segment);
                Ok(())
            },
            |_| {},
        )
        .unwrap();
        assert_eq!(count, segments.len());
        segments
    }

    #[test]
    fn test_replay_closes_on_marker() {
        let text = "我们尝试了很多次这个方法。结果一直不太理想。总之，我们应该换一种方式来处理。";
        let segments = collect(text, &plan(3, 0));

        assert!(segments.len() >= 2);
        assert_eq!(segments.last().unwrap().cut, CutKind::Flush);
        assert!(segments.last().unwrap().text.starts_with("总之"));
        assert!(segments
            .iter()
            .any(|s| s.reason == Some(SegmentReason::CoherenceMarker)));
    }

    #[test]
    fn test_simulated_clock_forces_cuts() {
        let text = "今天早上下了一场大雨。街上的行人都撑着伞。";
        let quiet = collect(text, &plan(4, 0));
        let slow = collect(text, &plan(4, 5_000));

        assert_eq!(quiet.len(), 1);
        assert!(slow
            .iter()
            .any(|s| s.reason == Some(SegmentReason::ForceTime)));
    }

    #[test]
    fn test_wait_called_between_deltas() {
        let mut segmenter = Segmenter::new();
        let mut waits = Vec::new();
        replay_text(
            &mut segmenter,
            "abcdefghij",
            &plan(4, 25),
            |_| Ok(()),
            |ms| waits.push(ms),
        )
        .unwrap();
        assert_eq!(waits, vec![25, 25]);
    }

    #[test]
    fn test_empty_input() {
        assert!(collect("", &plan(4, 10)).is_empty());
        assert!(collect("  \n\n ", &plan(4, 10)).is_empty());
    }

    #[test]
    fn test_callback_error_stops_replay() {
        let mut segmenter = Segmenter::new();
        let result = replay_text(
            &mut segmenter,
            "第一句话写在这里。",
            &plan(2, 0),
            |_| Err(anyhow::anyhow!("sink closed")),
            |_| {},
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_layered_over_config() {
        let args = ReplayArgs {
            input: vec!["a.txt".to_string()],
            output: None,
            format: None,
            config: None,
            pace: Some(StreamPace::Relaxed),
            chunk_chars: None,
            chunk_interval_ms: Some(10),
            min_chars: None,
            force_chars: Some(40),
            force_time_ms: None,
            realtime: false,
            normalize: false,
            quiet: true,
            verbose: 0,
        };
        let mut config = CliConfig::default();
        config.segmentation.similarity_threshold = 0.5;

        let segmenter = args.build_segmenter(&config).unwrap();
        assert_eq!(segmenter.config().similarity_threshold, 0.5);
        assert_eq!(segmenter.config().max_segment_chars, 400);

        let plan = args.plan(&config).unwrap();
        assert_eq!(plan.chunk_chars, 4);
        assert_eq!(plan.chunk_interval_ms, 10);
        assert_eq!(plan.options.force_chars, Some(40));
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let args = ReplayArgs {
            input: vec!["a.txt".to_string()],
            output: None,
            format: None,
            config: None,
            pace: None,
            chunk_chars: Some(0),
            chunk_interval_ms: None,
            min_chars: None,
            force_chars: None,
            force_time_ms: None,
            realtime: false,
            normalize: false,
            quiet: true,
            verbose: 0,
        };
        let err = args.plan(&CliConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidArgument(_))
        ));
    }
}
