// Normalizer - Re-encodes every segment to one uniform format

use std::sync::Arc;

use tracing::info;

use crate::app::workspace::Workspace;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::{run_stage, Stage};
use crate::ports::*;

pub struct Normalizer {
    execute_port: Arc<dyn ExecutePort>,
    workspace: Arc<Workspace>,
    settings: NormalizeSettings,
    workers: usize,
}

impl Normalizer {
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        workspace: Arc<Workspace>,
        settings: NormalizeSettings,
        workers: usize,
    ) -> Self {
        Self {
            execute_port,
            workspace,
            settings,
            workers,
        }
    }

    /// Re-encode every segment, untouched ones included, so the concat
    /// demuxer sees identical stream parameters. Returns the segment count.
    pub async fn normalize(&self) -> Result<usize, DomainError> {
        let segments = self.workspace.list_segments().await?;
        info!("Normalizing {} segments", segments.len());

        let execute_port = Arc::clone(&self.execute_port);
        let workspace = Arc::clone(&self.workspace);
        let settings = self.settings;
        run_stage(
            Stage::Normalize.as_str(),
            segments.clone(),
            self.workers,
            move |segment: SegmentName| {
                let execute_port = Arc::clone(&execute_port);
                let input = workspace.path_of(segment.file_name());
                let output = workspace.path_of(&segment.temporary(NORMALIZE_PREFIX));
                async move { execute_port.normalize(&input, &output, settings).await }
            },
        )
        .await?;

        self.workspace.promote(NORMALIZE_PREFIX, &segments).await?;
        Ok(segments.len())
    }
}
