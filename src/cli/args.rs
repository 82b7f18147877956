//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Optional overrides for the run; everything has a config or default value
#[derive(Args, Debug, Default, Clone)]
pub struct RunOptions {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Configuration file (default: cavid.toml in the working directory)
    #[arg(long, env = "CAVID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the mask, segments and final output
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Maximum number of concurrent ffmpeg jobs
    #[arg(long)]
    pub workers: Option<usize>,

    /// Segments to leave untouched (e.g. 002.mp4,005.mp4); skips the interactive checkpoint
    #[arg(long, value_delimiter = ',')]
    pub untouched: Option<Vec<String>>,
}
