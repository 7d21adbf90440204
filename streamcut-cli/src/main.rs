//! streamcut command-line entry point

use clap::Parser;
use streamcut_cli::commands::Commands;

/// Segment streamed LLM output into display-ready chunks
#[derive(Debug, Parser)]
#[command(name = "streamcut", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
