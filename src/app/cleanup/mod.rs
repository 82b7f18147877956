// Cleanup - Removes intermediate files once the final output exists

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::concatenator::ConcatenationReport;
use crate::app::workspace::Workspace;
use crate::domain::errors::*;

pub struct Cleanup {
    workspace: Arc<Workspace>,
}

impl Cleanup {
    pub fn new(workspace: Arc<Workspace>) -> Self {
        Self { workspace }
    }

    /// Delete the concatenated segments and the manifest.
    ///
    /// Refuses to delete anything unless the final output is on disk.
    /// Returns the number of files removed.
    pub async fn run(&self, report: &ConcatenationReport) -> Result<usize, DomainError> {
        let fs = self.workspace.fs();
        if !fs.file_exists(&report.output).await? {
            return Err(DomainError::Internal(format!(
                "final output {} is missing, keeping intermediate files",
                report.output.display()
            )));
        }

        let mut removed = 0;
        for segment in &report.segments {
            let path = self.workspace.path_of(segment.file_name());
            debug!("removing {}", path.display());
            fs.remove_file(&path).await?;
            removed += 1;
        }
        fs.remove_file(&report.manifest).await?;
        removed += 1;

        info!("Removed {} intermediate files", removed);
        Ok(removed)
    }
}
