//! Best-effort removal of unused cache directories

use super::CacheEntry;
use crate::error::DeletionError;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Totals after a deletion pass
#[derive(Debug, Clone, Default)]
pub struct PruneSummary {
    /// Directories removed
    pub deleted: usize,
    /// Directories that could not be removed, sorted by path
    pub failures: Vec<DeletionError>,
}

impl PruneSummary {
    fn merge(mut self, other: PruneSummary) -> Self {
        self.deleted += other.deleted;
        self.failures.extend(other.failures);
        self
    }

    /// Number of directories attempted
    pub fn attempted(&self) -> usize {
        self.deleted + self.failures.len()
    }
}

/// Remove every entry's directory tree on `pool`.
///
/// Deletions are independent: a failure is recorded and the remaining
/// entries are still attempted. `on_outcome` runs on the worker thread as
/// each deletion finishes. A directory that is already gone counts as a
/// failure.
pub fn delete_entries<F>(
    entries: &[CacheEntry],
    pool: &ThreadPool,
    on_outcome: F,
) -> PruneSummary
where
    F: Fn(&CacheEntry, &Result<(), DeletionError>) + Sync,
{
    let mut summary = pool.install(|| {
        entries
            .par_iter()
            .fold(PruneSummary::default, |mut acc, entry| {
                let result = delete_dir(&entry.path);
                on_outcome(entry, &result);
                match result {
                    Ok(()) => acc.deleted += 1,
                    Err(e) => acc.failures.push(e),
                }
                acc
            })
            .reduce(PruneSummary::default, PruneSummary::merge)
    });

    summary.failures.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        "Deleted {} of {} director(ies)",
        summary.deleted,
        summary.attempted()
    );
    summary
}

fn delete_dir(path: &Path) -> Result<(), DeletionError> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!("Deleted {}", path.display());
            Ok(())
        }
        Err(e) => {
            debug!("Failed to delete {}: {}", path.display(), e);
            Err(DeletionError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }
}
