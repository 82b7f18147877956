// Scene splitter - Cuts the source video at detected scene changes

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::workspace::Workspace;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::{run_stage, Stage};
use crate::ports::*;

/// Splits a source video into one stream-copied file per scene
pub struct SceneSplitter {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    workspace: Arc<Workspace>,
    workers: usize,
}

impl SceneSplitter {
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        workspace: Arc<Workspace>,
        workers: usize,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            workspace,
            workers,
        }
    }

    /// Detect scene boundaries, then cut every segment concurrently.
    ///
    /// Returns the segment names in playback order once all cuts exist.
    pub async fn split(&self, source: &Path) -> Result<Vec<SegmentName>, DomainError> {
        info!("Detecting scene changes (threshold {})...", SCENE_THRESHOLD);
        let cuts = self
            .probe_port
            .detect_scene_cuts(source, SCENE_THRESHOLD)
            .await?;
        let duration = self.probe_port.query_duration(source).await?;
        let timecodes = Timecodes::from_detections(cuts, duration)?;
        info!(
            "✓ {} scene changes found, cutting {} segments",
            timecodes.segment_count() - 1,
            timecodes.segment_count()
        );

        let segments = timecodes.segments();
        let names: Vec<SegmentName> = segments.iter().map(|(name, _)| name.clone()).collect();

        let execute_port = Arc::clone(&self.execute_port);
        let workspace = Arc::clone(&self.workspace);
        let source = source.to_path_buf();
        run_stage(
            Stage::Split.as_str(),
            segments,
            self.workers,
            move |(name, range): (SegmentName, SegmentRange)| {
                let execute_port = Arc::clone(&execute_port);
                let output = workspace.path_of(name.file_name());
                let source = source.clone();
                async move {
                    debug!("cutting {} {}", name, range);
                    execute_port.cut_segment(&source, range, &output).await
                }
            },
        )
        .await?;

        Ok(names)
    }
}
