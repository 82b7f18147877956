// Checkpoint gate - Operator approval through prompt and clipboard

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

const QUESTION: &str = "Done selecting? [y]es to continue, [q]uit to stop";

/// One operator answer at the checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Confirm,
    Quit,
    Other,
}

impl Answer {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "o" => Answer::Confirm,
            "q" | "quit" => Answer::Quit,
            _ => Answer::Other,
        }
    }
}

/// Interactive gate: the operator copies the segment files to keep from a
/// file manager, then confirms at the prompt
pub struct CheckpointGate {
    prompt_port: Arc<dyn PromptPort>,
    clipboard_port: Arc<dyn ClipboardPort>,
}

impl CheckpointGate {
    pub fn new(prompt_port: Arc<dyn PromptPort>, clipboard_port: Arc<dyn ClipboardPort>) -> Self {
        Self {
            prompt_port,
            clipboard_port,
        }
    }
}

#[async_trait]
impl ApprovalPort for CheckpointGate {
    async fn await_approval(&self) -> Result<Approval, DomainError> {
        info!("Select the segments to leave untouched in a file manager and copy them (Ctrl+C)");

        loop {
            let Some(input) = self.prompt_port.ask(QUESTION).await? else {
                warn!("Input closed at the checkpoint, quitting");
                return Ok(Approval::Quit);
            };

            match Answer::parse(&input) {
                Answer::Quit => return Ok(Approval::Quit),
                Answer::Other => continue,
                Answer::Confirm => {
                    let text = self.clipboard_port.read_text().await?;
                    let untouched = UntouchedSet::from_text(&text);
                    if untouched.is_empty() {
                        warn!("No segment file name found in the clipboard");
                        continue;
                    }
                    info!("✓ {} segments will be left untouched", untouched.len());
                    return Ok(Approval::Approved(untouched));
                }
            }
        }
    }
}
