//! Per-stage completion counter

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tracing::info;

/// Completion counter shared by every job of one stage.
///
/// Re-created for each stage. It only feeds progress output; nothing in the
/// pipeline branches on its value.
#[derive(Debug)]
pub struct StageProgress {
    stage: String,
    total: usize,
    completed: AtomicUsize,
    started: Instant,
}

impl StageProgress {
    pub fn new(stage: &str, total: usize) -> Self {
        Self {
            stage: stage.to_string(),
            total,
            completed: AtomicUsize::new(0),
            started: Instant::now(),
        }
    }

    /// Record one finished job and report the running ratio
    pub fn complete(&self) -> usize {
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        info!(stage = %self.stage, "✓ job {}/{}", done, self.total);
        done
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_progress_counts_up() {
        let progress = StageProgress::new("normalize", 3);
        assert_eq!(progress.completed(), 0);
        assert_eq!(progress.complete(), 1);
        assert_eq!(progress.complete(), 2);
        assert_eq!(progress.completed(), 2);
        assert_eq!(progress.total(), 3);
        assert_eq!(progress.stage(), "normalize");
    }

    #[test]
    fn test_progress_shared_across_threads() {
        let progress = Arc::new(StageProgress::new("split", 64));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let progress = Arc::clone(&progress);
                std::thread::spawn(move || {
                    for _ in 0..8 {
                        progress.complete();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.completed(), 64);
    }
}
