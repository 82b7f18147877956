// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media analysis: scene detection, duration and stream queries
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Run scene-change detection and return every detected cut, in seconds
    async fn detect_scene_cuts(&self, source: &Path, threshold: f64)
        -> Result<Vec<f64>, DomainError>;

    /// Total duration of a media file, in seconds
    async fn query_duration(&self, file: &Path) -> Result<f64, DomainError>;

    /// Which stream kinds a media file carries
    async fn probe_streams(&self, file: &Path) -> Result<StreamSummary, DomainError>;
}

/// Port for media-producing tool invocations
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Stream-copy `range` of `source` into `output`
    async fn cut_segment(
        &self,
        source: &Path,
        range: SegmentRange,
        output: &Path,
    ) -> Result<(), DomainError>;

    /// Overlay `mask`, scaled to the video frame, on the video of `input`
    async fn overlay_mask(&self, input: &Path, mask: &Path, output: &Path)
        -> Result<(), DomainError>;

    /// Build a video track out of `mask` for an input that has none
    async fn synthesize_video(
        &self,
        input: &Path,
        mask: &Path,
        output: &Path,
    ) -> Result<(), DomainError>;

    /// Re-encode `input` to the uniform format
    async fn normalize(
        &self,
        input: &Path,
        output: &Path,
        settings: NormalizeSettings,
    ) -> Result<(), DomainError>;

    /// Stream-copy every file listed in `manifest` into `output`
    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), DomainError>;
}

/// Port for file system operations on the working directory
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Names of the regular files directly inside `dir`
    async fn list_file_names(&self, dir: &Path) -> Result<Vec<String>, DomainError>;

    /// Replace `to` with `from`
    async fn rename(&self, from: &Path, to: &Path) -> Result<(), DomainError>;

    /// Delete file
    async fn remove_file(&self, path: &Path) -> Result<(), DomainError>;

    /// Create or truncate `path` with `contents`
    async fn write_text(&self, path: &Path, contents: &str) -> Result<(), DomainError>;

    /// Resolve relative path to absolute path
    async fn resolve_path(&self, path: &Path) -> Result<PathBuf, DomainError>;
}

/// Port for the manual approval gate between splitting and redaction
#[async_trait]
pub trait ApprovalPort: Send + Sync {
    /// Block until the operator approves an untouched set or quits
    async fn await_approval(&self) -> Result<Approval, DomainError>;
}

/// Port for line-based operator input
#[async_trait]
pub trait PromptPort: Send + Sync {
    /// Show `question` and read one answer; `None` once input is closed
    async fn ask(&self, question: &str) -> Result<Option<String>, DomainError>;
}

/// Port for reading the system clipboard
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Current clipboard contents as text
    async fn read_text(&self) -> Result<String, DomainError>;
}
