//! streamcut CLI library
//!
//! This library provides the command-line interface for the streamcut
//! segmentation engine: replaying saved model answers as simulated streams
//! and splitting text into sentences.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
