// Redactor - Masks every segment the operator did not exempt

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::workspace::Workspace;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules;
use crate::engine::{run_stage, Stage};
use crate::ports::*;

/// Counts reported by one redaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedactionReport {
    /// Segments rewritten with the mask
    pub redacted: usize,
    /// Of those, segments whose video track was built from the mask alone
    pub synthesized: usize,
    /// Segments left untouched
    pub skipped: usize,
}

pub struct Redactor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    workspace: Arc<Workspace>,
    mask: PathBuf,
    workers: usize,
}

impl Redactor {
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        workspace: Arc<Workspace>,
        mask: PathBuf,
        workers: usize,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            workspace,
            mask,
            workers,
        }
    }

    /// Rewrite every segment not in `untouched` in place.
    ///
    /// Each job writes an `h` temporary; renames happen only after every job
    /// has succeeded, so a failure leaves the original segments intact.
    pub async fn redact(&self, untouched: &UntouchedSet) -> Result<RedactionReport, DomainError> {
        let segments = self.workspace.list_segments().await?;
        for name in rules::unmatched_untouched(&segments, untouched) {
            debug!("untouched entry {} matches no segment", name);
        }

        let (targets, skipped) = rules::partition_targets(&segments, untouched);
        info!(
            "Redacting {} segments, leaving {} untouched",
            targets.len(),
            skipped.len()
        );

        let synthesized = Arc::new(AtomicUsize::new(0));
        let probe_port = Arc::clone(&self.probe_port);
        let execute_port = Arc::clone(&self.execute_port);
        let workspace = Arc::clone(&self.workspace);
        let mask = self.mask.clone();
        let counter = Arc::clone(&synthesized);
        run_stage(
            Stage::Redact.as_str(),
            targets.clone(),
            self.workers,
            move |segment: SegmentName| {
                let probe_port = Arc::clone(&probe_port);
                let execute_port = Arc::clone(&execute_port);
                let counter = Arc::clone(&counter);
                let input = workspace.path_of(segment.file_name());
                let output = workspace.path_of(&segment.temporary(REDACT_PREFIX));
                let mask = mask.clone();
                async move {
                    let streams = probe_port.probe_streams(&input).await?;
                    if streams.has_video {
                        execute_port.overlay_mask(&input, &mask, &output).await
                    } else if streams.has_audio {
                        warn!("{} has no video stream, synthesizing one from the mask", segment);
                        execute_port.synthesize_video(&input, &mask, &output).await?;
                        counter.fetch_add(1, Ordering::Relaxed);
                        Ok(())
                    } else {
                        Err(DomainError::ToolOutput {
                            tool: "stream probe".to_string(),
                            message: format!("{} has neither a video nor an audio stream", segment),
                        })
                    }
                }
            },
        )
        .await?;

        self.workspace.promote(REDACT_PREFIX, &targets).await?;

        Ok(RedactionReport {
            redacted: targets.len(),
            synthesized: synthesized.load(Ordering::Relaxed),
            skipped: skipped.len(),
        })
    }
}
