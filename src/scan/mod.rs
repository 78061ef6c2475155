//! Workspace scanning
//!
//! Discovers manifests under the workspace root and folds their package
//! references into a single `UsedPackageSet`.

pub mod used_set;

pub use used_set::{build_used_set, scan_workspace, ScanReport, UsedPackageSet};
