//! Classify cache version directories as used or unused

use super::CacheEntry;
use crate::error::{NuPruneError, NuPruneResult};
use crate::scan::UsedPackageSet;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of diffing the cache against the used set
#[derive(Debug, Clone, Default)]
pub struct DiffReport {
    /// Package directories inspected (reserved directories excluded)
    pub package_dirs: usize,
    /// Version directories inspected
    pub version_dirs: usize,
    /// Version directories no manifest references, sorted by path
    pub unused: Vec<CacheEntry>,
    /// Package directories whose versions could not be listed
    pub unreadable: Vec<PathBuf>,
}

impl DiffReport {
    fn merge(mut self, other: DiffReport) -> Self {
        self.package_dirs += other.package_dirs;
        self.version_dirs += other.version_dirs;
        self.unused.extend(other.unused);
        self.unreadable.extend(other.unreadable);
        self
    }
}

/// Find cache version directories whose identity is absent from `used`.
///
/// Top-level directories named in `reserved` (case-insensitive) are skipped
/// entirely. Package directories are processed in parallel on `pool`; the
/// walk never modifies the cache.
pub fn find_unused(
    cache_root: &Path,
    used: &UsedPackageSet,
    reserved: &[String],
    pool: &ThreadPool,
) -> NuPruneResult<DiffReport> {
    if !cache_root.is_dir() {
        return Err(NuPruneError::CacheRootNotFound(cache_root.to_path_buf()));
    }

    let package_dirs: Vec<(String, PathBuf)> = subdirectories(cache_root)
        .map_err(|e| NuPruneError::io(format!("listing {}", cache_root.display()), e))?
        .into_iter()
        .filter(|(name, _)| !is_reserved(name, reserved))
        .collect();

    debug!(
        "Diffing {} package directories under {}",
        package_dirs.len(),
        cache_root.display()
    );

    let mut report = pool.install(|| {
        package_dirs
            .par_iter()
            .fold(DiffReport::default, |mut acc, (package_id, package_dir)| {
                acc.package_dirs += 1;
                match subdirectories(package_dir) {
                    Ok(versions) => {
                        for (version, path) in versions {
                            acc.version_dirs += 1;
                            if !used.contains_parts(package_id, &version) {
                                acc.unused.push(CacheEntry {
                                    package_id: package_id.clone(),
                                    version,
                                    path,
                                });
                            }
                        }
                    }
                    Err(e) => {
                        debug!("Skipping {}: {}", package_dir.display(), e);
                        acc.unreadable.push(package_dir.clone());
                    }
                }
                acc
            })
            .reduce(DiffReport::default, DiffReport::merge)
    });

    report.unused.sort_by(|a, b| a.path.cmp(&b.path));
    report.unreadable.sort();
    debug!(
        "{} of {} version directories unused",
        report.unused.len(),
        report.version_dirs
    );
    Ok(report)
}

fn is_reserved(name: &str, reserved: &[String]) -> bool {
    let name = name.to_lowercase();
    reserved.iter().any(|r| r.to_lowercase() == name)
}

/// Immediate subdirectories of `dir` as (name, path) pairs.
///
/// Names that are not valid UTF-8 cannot be package ids or versions and are
/// left alone.
fn subdirectories(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => dirs.push((name, path)),
            Err(name) => warn!("Ignoring non UTF-8 directory name: {:?}", name),
        }
    }
    Ok(dirs)
}
