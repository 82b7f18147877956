// Process adapter - Runs external tools and captures their output

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;

/// Lines of diagnostic output kept in a failure report
const STDERR_TAIL_LINES: usize = 20;

/// Captured output of a successful tool run
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// One invocation of an external tool
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    program: String,
    action: String,
    args: Vec<OsString>,
}

impl ToolInvocation {
    /// `action` describes what the run is for and ends up in failure messages
    pub fn new(program: &str, action: impl Into<String>) -> Self {
        Self {
            program: program.to_string(),
            action: action.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    /// Human-readable command line, for logs
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Run to completion; a non-zero exit is an error carrying the stderr tail.
    ///
    /// The child never inherits stdin, and is killed if the returned future is
    /// dropped before it exits.
    pub async fn run(self) -> Result<ToolOutput, DomainError> {
        debug!(command = %self.command_line(), "running {}", self.action);

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| DomainError::ToolSpawn {
                tool: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(DomainError::ToolFailed {
                tool: self.program,
                action: self.action,
                status: output.status.to_string(),
                stderr: stderr_tail(&stderr, STDERR_TAIL_LINES),
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

/// File name of `path` for log and error messages
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Last `lines` non-empty lines of a diagnostic stream
pub fn stderr_tail(stderr: &str, lines: usize) -> String {
    let kept: Vec<&str> = stderr
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let start = kept.len().saturating_sub(lines);
    kept[start..].join("\n")
}
