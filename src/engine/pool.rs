//! Bounded fan-out/fan-in worker pool for per-segment jobs

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::engine::progress::StageProgress;

/// Run `job` once per item with at most `workers` jobs in flight.
///
/// Returns only after every job has finished, so the next stage never sees a
/// half-written file. The first failure aborts the jobs still running and is
/// returned; the remaining results are discarded.
pub async fn run_stage<T, F, Fut>(
    stage: &str,
    items: Vec<T>,
    workers: usize,
    job: F,
) -> Result<usize, DomainError>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), DomainError>> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        debug!(stage, "no jobs to run");
        return Ok(0);
    }

    let progress = Arc::new(StageProgress::new(stage, total));
    let permits = Arc::new(Semaphore::new(workers.max(1)));
    let job = Arc::new(job);
    let mut jobs = JoinSet::new();

    for item in items {
        let permits = Arc::clone(&permits);
        let progress = Arc::clone(&progress);
        let job = Arc::clone(&job);
        jobs.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| DomainError::Internal(format!("worker pool closed: {}", e)))?;
            (*job)(item).await?;
            progress.complete();
            Ok::<(), DomainError>(())
        });
    }

    while let Some(joined) = jobs.join_next().await {
        let result = joined
            .map_err(|e| DomainError::Internal(format!("{} job did not finish: {}", stage, e)))
            .and_then(|outcome| outcome);

        if let Err(err) = result {
            debug!(stage, "job failed, cancelling {} remaining", jobs.len());
            jobs.abort_all();
            while jobs.join_next().await.is_some() {}
            return Err(err);
        }
    }

    debug!(
        stage,
        elapsed_ms = progress.elapsed().as_millis() as u64,
        "all jobs finished"
    );
    Ok(progress.completed())
}
