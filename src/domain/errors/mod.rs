// Domain errors - Error types for the domain layer

use std::path::PathBuf;

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// An external tool ran and exited unsuccessfully
    #[error("{tool} failed while {action} ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        action: String,
        status: String,
        stderr: String,
    },

    /// An external tool could not be started at all
    #[error("Failed to start {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool succeeded but printed something we cannot read
    #[error("Unexpected output from {tool}: {message}")]
    ToolOutput { tool: String, message: String },

    /// Source duration is not a usable positive number
    #[error("Invalid source duration: {0}")]
    InvalidDuration(f64),

    /// Source video does not exist
    #[error("Source video not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Mask image missing from the working directory
    #[error("Mask image not found: {}", .0.display())]
    MaskNotFound(PathBuf),

    /// Final output would be overwritten
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// Segment files from an earlier run would mix into this one
    #[error("{} already holds {count} segment files; move them away first", .dir.display())]
    StaleSegments { dir: PathBuf, count: usize },

    /// Nothing left to concatenate
    #[error("No segment files found in {}", .0.display())]
    NoSegments(PathBuf),

    /// Clipboard could not be read
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// Operator prompt could not be read
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether this error came from an external media tool
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            DomainError::ToolFailed { .. } | DomainError::ToolSpawn { .. } | DomainError::ToolOutput { .. }
        )
    }
}
