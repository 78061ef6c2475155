//! Bounded worker pool for the parallel scan, diff and delete phases

use crate::error::NuPruneResult;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use tracing::debug;

/// Available hardware concurrency, falling back to 1
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Resolve a configured job count, where 0 means "use all cores"
pub fn resolve_jobs(configured: usize) -> usize {
    if configured == 0 {
        default_jobs()
    } else {
        configured
    }
}

/// Build a pool with exactly `jobs` threads (at least one)
pub fn build_pool(jobs: usize) -> NuPruneResult<ThreadPool> {
    let jobs = jobs.max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("nuprune-worker-{}", i))
        .build()?;
    debug!("Worker pool started with {} thread(s)", jobs);
    Ok(pool)
}
