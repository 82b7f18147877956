// Redaction pipeline - Orchestrates every stage of one run

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, info_span, Instrument};

use crate::app::cleanup::Cleanup;
use crate::app::concatenator::Concatenator;
use crate::app::normalizer::Normalizer;
use crate::app::redactor::Redactor;
use crate::app::scene_splitter::SceneSplitter;
use crate::app::workspace::Workspace;
use crate::config_initialization::PipelineConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::Stage;
use crate::ports::*;
use crate::utils::format_duration;

/// Ports a pipeline run talks to
pub struct PipelinePorts {
    pub probe: Arc<dyn ProbePort>,
    pub execute: Arc<dyn ExecutePort>,
    pub fs: Arc<dyn FsPort>,
    pub approval: Arc<dyn ApprovalPort>,
}

/// Split, checkpoint, redact, normalize, concatenate, clean up.
///
/// Stages run strictly in that order. Any error ends the run immediately and
/// leaves the working directory as the failing stage found it.
pub struct RedactionPipeline {
    workspace: Arc<Workspace>,
    approval_port: Arc<dyn ApprovalPort>,
    splitter: SceneSplitter,
    redactor: Redactor,
    normalizer: Normalizer,
    concatenator: Concatenator,
    cleanup: Cleanup,
    mask_path: PathBuf,
    output_path: PathBuf,
}

impl RedactionPipeline {
    pub fn new(ports: PipelinePorts, config: &PipelineConfig) -> Self {
        let workspace = Arc::new(Workspace::new(config.work_dir.clone(), ports.fs));

        Self {
            splitter: SceneSplitter::new(
                Arc::clone(&ports.probe),
                Arc::clone(&ports.execute),
                Arc::clone(&workspace),
                config.workers,
            ),
            redactor: Redactor::new(
                Arc::clone(&ports.probe),
                Arc::clone(&ports.execute),
                Arc::clone(&workspace),
                config.mask_path(),
                config.workers,
            ),
            normalizer: Normalizer::new(
                Arc::clone(&ports.execute),
                Arc::clone(&workspace),
                NormalizeSettings::default(),
                config.workers,
            ),
            concatenator: Concatenator::new(
                Arc::clone(&ports.execute),
                Arc::clone(&workspace),
                config.manifest.clone(),
                config.output.clone(),
            ),
            cleanup: Cleanup::new(Arc::clone(&workspace)),
            approval_port: ports.approval,
            mask_path: config.mask_path(),
            output_path: config.output_path(),
            workspace,
        }
    }

    /// Run every stage against `source`
    pub async fn run(&self, source: &Path) -> Result<PipelineOutcome, DomainError> {
        let source = self.preflight(source).await?;
        info!("Redacting {} in {}", source.display(), self.workspace.dir().display());

        let segments = self.stage(Stage::Split, self.splitter.split(&source)).await?;
        info!("✓ {} segments ready for review", segments.len());

        let approval = self
            .stage(Stage::Checkpoint, self.approval_port.await_approval())
            .await?;
        let untouched = match approval {
            Approval::Approved(untouched) => untouched,
            Approval::Quit => {
                info!(
                    "Stopped at the checkpoint; {} segments left in {}",
                    segments.len(),
                    self.workspace.dir().display()
                );
                return Ok(PipelineOutcome::Aborted);
            }
        };

        let redaction = self
            .stage(Stage::Redact, self.redactor.redact(&untouched))
            .await?;
        if redaction.synthesized > 0 {
            info!(
                "{} segments had no video stream and were rebuilt from the mask",
                redaction.synthesized
            );
        }

        self.stage(Stage::Normalize, self.normalizer.normalize())
            .await?;
        let concatenation = self
            .stage(Stage::Concatenate, self.concatenator.concatenate())
            .await?;
        self.stage(Stage::Cleanup, self.cleanup.run(&concatenation))
            .await?;

        info!("✓ Redacted video written to {}", concatenation.output.display());
        Ok(PipelineOutcome::Completed {
            output: concatenation.output,
            segments: concatenation.segments.len(),
            redacted: redaction.redacted,
            synthesized: redaction.synthesized,
        })
    }

    /// Check the inputs before anything is written
    async fn preflight(&self, source: &Path) -> Result<PathBuf, DomainError> {
        let fs = self.workspace.fs();

        let source = fs.resolve_path(source).await?;
        if !fs.file_exists(&source).await? {
            return Err(DomainError::SourceNotFound(source));
        }
        if !fs.file_exists(&self.mask_path).await? {
            return Err(DomainError::MaskNotFound(self.mask_path.clone()));
        }
        if fs.file_exists(&self.output_path).await? {
            return Err(DomainError::OutputExists(self.output_path.clone()));
        }

        let stale = self.workspace.list_segments().await?;
        if !stale.is_empty() {
            return Err(DomainError::StaleSegments {
                dir: self.workspace.dir().to_path_buf(),
                count: stale.len(),
            });
        }
        Ok(source)
    }

    async fn stage<T, F>(&self, stage: Stage, work: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        let span = info_span!("stage", name = %stage);
        let started = Instant::now();
        let result = work.instrument(span.clone()).await;
        if result.is_ok() {
            span.in_scope(|| {
                info!("✓ {} finished in {}", stage, format_duration(started.elapsed()))
            });
        }
        result
    }
}
