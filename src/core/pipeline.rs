//! Bounded-concurrency pipeline executor.
//!
//! A fixed number of workers share one lazy source. Pulling the next item is
//! serialized behind an async mutex (so a stream cursor is never advanced
//! twice for one logical "next") while the per-item work overlaps freely.

use crate::utils::error::{MetaIndexerError, Result};
use crate::utils::logging::log_progress;
use futures_util::future::try_join_all;
use futures_util::{Stream, StreamExt};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// Progress is logged every this many completed items.
pub const PROGRESS_INTERVAL: usize = 100;

/// How a pipeline run is paced and reported.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Number of concurrent workers; zero is treated as one.
    pub jobs: usize,
    /// Pause a worker takes after each item before pulling the next.
    pub delay: Option<Duration>,
    /// Name used in progress logs.
    pub label: String,
}

impl PipelineOptions {
    pub fn new(label: impl Into<String>, jobs: usize) -> Self {
        Self {
            jobs,
            delay: None,
            label: label.into(),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }
}

/// Drives `worker(item, index)` over every item of `source`.
///
/// Resolves with the number of processed items once the source is exhausted
/// and every worker has finished. The first worker error aborts the run and
/// is returned.
#[tracing::instrument(skip_all, fields(pipeline = %options.label, jobs = options.jobs))]
pub async fn run_pipeline<S, F, Fut>(source: S, options: &PipelineOptions, worker: F) -> Result<usize>
where
    S: Stream + Unpin,
    F: Fn(S::Item, usize) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    // Fused: idle workers keep pulling after the first one sees the end.
    let cursor = Mutex::new(source.enumerate().fuse());
    let completed = AtomicUsize::new(0);

    let workers = (0..options.jobs.max(1)).map(|_| async {
        loop {
            let next = cursor.lock().await.next().await;
            let Some((index, item)) = next else {
                break;
            };

            worker(item, index).await?;

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_INTERVAL == 0 {
                log_progress(&options.label, done);
            }
            if let Some(delay) = options.delay {
                tokio::time::sleep(delay).await;
            }
        }
        Ok::<(), MetaIndexerError>(())
    });

    try_join_all(workers).await?;

    let total = completed.load(Ordering::Relaxed);
    tracing::debug!(pipeline = %options.label, total, "Pipeline drained");
    Ok(total)
}
