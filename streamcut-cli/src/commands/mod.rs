//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use streamcut_core::{SegmentationConfig, StreamPace};

use crate::output::OutputFormat;

pub mod generate_config;
pub mod replay;
pub mod split;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay files as a simulated token stream and print the segments
    Replay(replay::ReplayArgs),

    /// Split files into sentences
    Split(split::SplitArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List stream pace presets
    Presets,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Replay(args) => args.execute(),
            Commands::Split(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Print the requested listing to stdout
    pub fn execute(&self) {
        match self {
            ListCommands::Presets => {
                println!("Stream pace presets:");
                for pace in StreamPace::ALL {
                    let config = SegmentationConfig::for_pace(pace);
                    println!(
                        "  {:<10} max {} chars, force after {} ms, delays {}/{} ms",
                        pace.name(),
                        config.max_segment_chars,
                        config.force_time_ms,
                        config.base_delay_ms,
                        config.sentence_end_delay_ms,
                    );
                }
            }
            ListCommands::Formats => {
                println!("Output formats:");
                for format in OutputFormat::ALL {
                    println!("  {:<10} {}", format.name(), format.description());
                }
            }
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // A second init in the same process is harmless
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}
