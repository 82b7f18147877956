//! cavid - scene-split video redaction
//!
//! # Usage
//!
//! ```bash
//! cavid interview.mov
//! cavid interview.mov --work-dir ./job --workers 4 --log-level debug
//! ```
//!
//! The working directory must contain `mask.png`; the redacted video is
//! written there as `final.mp4`.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{error, info};

use cavid::app::{AppContainer, DefaultAppContainer};
use cavid::cli::Cli;
use cavid::config_initialization::{initialize_configuration_hierarchy, PipelineConfig};
use cavid::domain::model::{PipelineOutcome, EXIT_FAILURE};
use cavid::utils::format_duration;
use cavid::utils::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging depends on the resolved configuration, so report its errors directly
    let config = match initialize_configuration_hierarchy(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    init_logging(&config.logging);
    info!("Starting cavid {}", env!("CARGO_PKG_VERSION"));

    let started = std::time::Instant::now();
    match run(&cli, &config).await {
        Ok(outcome) => {
            match &outcome {
                PipelineOutcome::Completed {
                    output,
                    segments,
                    redacted,
                    ..
                } => info!(
                    "Done in {}: {} of {} segments redacted, output {}",
                    format_duration(started.elapsed()),
                    redacted,
                    segments,
                    output.display()
                ),
                PipelineOutcome::Aborted => info!("Aborted by operator"),
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(cli: &Cli, config: &PipelineConfig) -> Result<PipelineOutcome> {
    let container = DefaultAppContainer::new(config);
    container
        .pipeline()
        .run(&cli.source)
        .await
        .with_context(|| format!("Failed to redact {}", cli.source.display()))
}
