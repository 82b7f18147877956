//! Parallel execution engine shared by the per-segment stages

pub mod pool;
pub mod progress;

pub use pool::run_stage;
pub use progress::StageProgress;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Detecting scene cuts and cutting segments
    Split,
    /// Waiting for the operator's untouched selection
    Checkpoint,
    /// Masking segments that were not exempted
    Redact,
    /// Re-encoding every segment to a uniform format
    Normalize,
    /// Joining segments into the final output
    Concatenate,
    /// Removing segments and the manifest
    Cleanup,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Split => "split",
            Stage::Checkpoint => "checkpoint",
            Stage::Redact => "redact",
            Stage::Normalize => "normalize",
            Stage::Concatenate => "concatenate",
            Stage::Cleanup => "cleanup",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
