// Workspace - Segment files inside the working directory

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules;
use crate::ports::*;

/// Flat directory shared by every stage.
///
/// The set of files matching the segment pattern is the only state passed
/// from one stage to the next.
pub struct Workspace {
    dir: PathBuf,
    fs_port: Arc<dyn FsPort>,
}

impl Workspace {
    pub fn new(dir: PathBuf, fs_port: Arc<dyn FsPort>) -> Self {
        Self { dir, fs_port }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn fs(&self) -> &Arc<dyn FsPort> {
        &self.fs_port
    }

    /// Absolute path of `file_name` inside the working directory
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Current segment files, in playback order
    pub async fn list_segments(&self) -> Result<Vec<SegmentName>, DomainError> {
        let names = self.fs_port.list_file_names(&self.dir).await?;
        Ok(rules::select_segments(names))
    }

    /// Replace every segment with its `prefix` temporary
    pub async fn promote(&self, prefix: &str, segments: &[SegmentName]) -> Result<(), DomainError> {
        for segment in segments {
            let temporary = self.path_of(&segment.temporary(prefix));
            let target = self.path_of(segment.file_name());
            debug!("{} -> {}", temporary.display(), target.display());
            self.fs_port.rename(&temporary, &target).await?;
        }
        Ok(())
    }
}
