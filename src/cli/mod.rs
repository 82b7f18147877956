//! CLI module for cavid
//!
//! This module handles command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

pub mod args;

pub use args::RunOptions;

/// Scene-split video redaction pipeline
///
/// Cuts the source video at scene changes, waits for the operator to pick
/// the segments to leave untouched, masks the others and joins everything
/// back into a single file.
#[derive(Parser, Debug)]
#[command(name = "cavid")]
#[command(about = "Scene-split video redaction pipeline")]
#[command(version)]
pub struct Cli {
    /// Source video to redact
    pub source: PathBuf,

    #[command(flatten)]
    pub options: RunOptions,
}
