//! Chunked batch executor.
//!
//! Bulk operations run in fixed-size chunks with a fixed pause between
//! chunk starts — a crude rate limiter matching what the backend is
//! assumed to tolerate. Within a chunk the sub-operations are issued
//! together on scoped threads and awaited together.
//!
//! Best-effort only: a failing sub-operation does not roll back its chunk
//! and does not stop the run. Failures are logged as they are observed and
//! returned once, aggregated, in the [`BatchReport`].

use std::thread;
use std::time::Duration;

use atelier_client::ApiError;

/// Pacing for bulk operations.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Sub-operations issued together per chunk.
    pub chunk_size: usize,
    /// Pause between one chunk completing and the next starting.
    pub chunk_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: 20,
            chunk_delay: Duration::from_millis(1000),
        }
    }
}

/// One failed sub-operation.
#[derive(Debug)]
pub struct BatchFailure {
    pub id: String,
    pub error: ApiError,
}

/// Aggregate outcome of a chunked run.
#[derive(Debug)]
pub struct BatchReport {
    /// Total sub-operations issued.
    pub attempted: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Single aggregate line for surfacing after the run.
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            format!("{} operations completed", self.attempted)
        } else {
            format!(
                "{} of {} operations failed",
                self.failures.len(),
                self.attempted
            )
        }
    }
}

/// Run `op` over every id, chunked per `config`.
///
/// Chunks execute in order; ids within a chunk run concurrently. The run
/// always covers every chunk — failures are collected, never fatal.
pub fn run_chunked<F>(ids: &[String], config: &BatchConfig, op: F) -> BatchReport
where
    F: Fn(&str) -> Result<(), ApiError> + Sync,
{
    let chunk_size = config.chunk_size.max(1);
    let mut failures = Vec::new();

    for (index, chunk) in ids.chunks(chunk_size).enumerate() {
        if index > 0 {
            thread::sleep(config.chunk_delay);
        }

        let op = &op;
        let results: Vec<(String, Result<(), ApiError>)> = thread::scope(|scope| {
            let handles: Vec<_> = chunk
                .iter()
                .map(|id| scope.spawn(move || (id.clone(), op(id))))
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        for (id, result) in results {
            if let Err(error) = result {
                log::warn!("batch operation failed for {id}: {error}");
                failures.push(BatchFailure { id, error });
            }
        }
    }

    BatchReport {
        attempted: ids.len(),
        failures,
    }
}
