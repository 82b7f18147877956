// System clipboard adapter - Reads clipboard text through the platform's paste tool

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::process::ToolInvocation;
use crate::domain::errors::*;
use crate::ports::*;

/// A command that prints the clipboard contents on stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const WL_PASTE: PasteTool = PasteTool {
    program: "wl-paste",
    args: &["--no-newline"],
};
const XCLIP: PasteTool = PasteTool {
    program: "xclip",
    args: &["-selection", "clipboard", "-o"],
};
const XSEL: PasteTool = PasteTool {
    program: "xsel",
    args: &["--clipboard", "--output"],
};
const PBPASTE: PasteTool = PasteTool {
    program: "pbpaste",
    args: &[],
};

/// Clipboard adapter trying each paste tool until one works
pub struct SystemClipboardAdapter {
    tools: Vec<PasteTool>,
}

impl SystemClipboardAdapter {
    /// Tool order for the current session: Wayland first when it is running
    pub fn new() -> Self {
        Self::with_tools(Self::detect_tools(std::env::var_os("WAYLAND_DISPLAY").is_some()))
    }

    pub fn with_tools(tools: Vec<PasteTool>) -> Self {
        Self { tools }
    }

    pub fn detect_tools(wayland: bool) -> Vec<PasteTool> {
        if cfg!(target_os = "macos") {
            vec![PBPASTE]
        } else if wayland {
            vec![WL_PASTE, XCLIP, XSEL]
        } else {
            vec![XCLIP, XSEL, WL_PASTE]
        }
    }
}

impl Default for SystemClipboardAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardPort for SystemClipboardAdapter {
    async fn read_text(&self) -> Result<String, DomainError> {
        let mut failures = Vec::new();

        for tool in &self.tools {
            let result = ToolInvocation::new(tool.program, "reading the clipboard")
                .args(tool.args)
                .run()
                .await;
            match result {
                Ok(output) => return Ok(output.stdout),
                Err(err) => {
                    debug!(tool = tool.program, "clipboard read failed: {}", err);
                    failures.push(format!("{}: {}", tool.program, err));
                }
            }
        }

        Err(DomainError::Clipboard(if failures.is_empty() {
            "no clipboard tool configured".to_string()
        } else {
            failures.join("; ")
        }))
    }
}
