// Concatenator - Joins the normalized segments into the final video

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::app::workspace::Workspace;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// What the concatenation produced and consumed
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatenationReport {
    pub output: PathBuf,
    pub manifest: PathBuf,
    pub segments: Vec<SegmentName>,
}

pub struct Concatenator {
    execute_port: Arc<dyn ExecutePort>,
    workspace: Arc<Workspace>,
    manifest_name: String,
    output_name: String,
}

impl Concatenator {
    pub fn new(
        execute_port: Arc<dyn ExecutePort>,
        workspace: Arc<Workspace>,
        manifest_name: String,
        output_name: String,
    ) -> Self {
        Self {
            execute_port,
            workspace,
            manifest_name,
            output_name,
        }
    }

    /// Write the manifest in index order and stream-copy every segment into
    /// the final output
    pub async fn concatenate(&self) -> Result<ConcatenationReport, DomainError> {
        let segments = self.workspace.list_segments().await?;
        if segments.is_empty() {
            return Err(DomainError::NoSegments(self.workspace.dir().to_path_buf()));
        }

        let manifest = Manifest::new(segments);
        let manifest_path = self.workspace.path_of(&self.manifest_name);
        let output_path = self.workspace.path_of(&self.output_name);

        self.workspace
            .fs()
            .write_text(&manifest_path, &manifest.render())
            .await?;
        info!(
            "Concatenating {} segments into {}",
            manifest.entries().len(),
            output_path.display()
        );
        self.execute_port
            .concatenate(&manifest_path, &output_path)
            .await?;

        Ok(ConcatenationReport {
            output: output_path,
            manifest: manifest_path,
            segments: manifest.entries().to_vec(),
        })
    }
}
