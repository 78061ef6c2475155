//! Used-package set construction

use crate::error::ManifestError;
use crate::manifest::{discover_manifests, parse_manifest, ManifestFile};
use crate::package::PackageIdentity;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Distinct package identities referenced by the workspace
#[derive(Debug, Clone, Default)]
pub struct UsedPackageSet {
    packages: HashSet<PackageIdentity>,
}

impl UsedPackageSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity if no case-insensitive equal is present
    pub fn insert(&mut self, package: PackageIdentity) -> bool {
        self.packages.insert(package)
    }

    /// Membership under case-insensitive identity equality
    pub fn contains(&self, package: &PackageIdentity) -> bool {
        self.packages.contains(package)
    }

    /// Membership test for raw id/version strings (e.g. cache directory names)
    pub fn contains_parts(&self, id: &str, version: &str) -> bool {
        PackageIdentity::new(id, version).is_some_and(|p| self.contains(&p))
    }

    /// Number of distinct identities
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageIdentity> {
        self.packages.iter()
    }

    /// Union another set into this one
    pub fn merge(&mut self, other: UsedPackageSet) {
        if self.packages.len() < other.packages.len() {
            let mut other = other;
            other.packages.extend(self.packages.drain());
            *self = other;
        } else {
            self.packages.extend(other.packages);
        }
    }

    /// Identities ordered case-insensitively by id, then version
    pub fn to_sorted_vec(&self) -> Vec<PackageIdentity> {
        let mut packages: Vec<_> = self.packages.iter().cloned().collect();
        packages.sort_by_cached_key(PackageIdentity::sort_key);
        packages
    }
}

impl Extend<PackageIdentity> for UsedPackageSet {
    fn extend<I: IntoIterator<Item = PackageIdentity>>(&mut self, iter: I) {
        self.packages.extend(iter);
    }
}

impl FromIterator<PackageIdentity> for UsedPackageSet {
    fn from_iter<I: IntoIterator<Item = PackageIdentity>>(iter: I) -> Self {
        Self {
            packages: iter.into_iter().collect(),
        }
    }
}

/// Outcome of scanning a workspace
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Number of manifests discovered
    pub manifest_count: usize,
    /// Distinct identities referenced
    pub used: UsedPackageSet,
    /// Manifests that could not be parsed, sorted by path
    pub failures: Vec<ManifestError>,
}

impl ScanReport {
    fn merge(mut self, other: ScanReport) -> Self {
        self.manifest_count += other.manifest_count;
        self.used.merge(other.used);
        self.failures.extend(other.failures);
        self
    }
}

/// Parse every manifest on `pool` and union the results.
///
/// Each worker folds into its own partial report and partial reports are
/// merged afterwards, so the result does not depend on scheduling.
pub fn build_used_set(manifests: &[ManifestFile], pool: &ThreadPool) -> ScanReport {
    let mut report = pool.install(|| {
        manifests
            .par_iter()
            .fold(ScanReport::default, |mut acc, manifest| {
                acc.manifest_count += 1;
                match parse_manifest(&manifest.path, manifest.kind) {
                    Ok(packages) => acc.used.extend(packages),
                    Err(e) => {
                        debug!("{}", e);
                        acc.failures.push(e);
                    }
                }
                acc
            })
            .reduce(ScanReport::default, ScanReport::merge)
    });

    report.failures.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        "Used set: {} package(s) from {} manifest(s), {} failure(s)",
        report.used.len(),
        report.manifest_count,
        report.failures.len()
    );
    report
}

/// Discover manifests under `root` and build the used set
pub fn scan_workspace(root: &Path, exclude: &[String], pool: &ThreadPool) -> ScanReport {
    let manifests = discover_manifests(root, exclude);
    build_used_set(&manifests, pool)
}
