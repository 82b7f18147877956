// Stdin prompt adapter - Line-based operator input on the terminal

use std::io::Write;

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::domain::errors::*;
use crate::ports::*;

/// Prompt adapter reading answers from standard input
pub struct StdinPromptAdapter {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinPromptAdapter {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdinPromptAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptPort for StdinPromptAdapter {
    async fn ask(&self, question: &str) -> Result<Option<String>, DomainError> {
        {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{} ", format!("[?] {}", question).blue().bold())
                .and_then(|_| stdout.flush())
                .map_err(|e| DomainError::Prompt(e.to_string()))?;
        }

        let mut lines = self.lines.lock().await;
        lines
            .next_line()
            .await
            .map_err(|e| DomainError::Prompt(e.to_string()))
    }
}
