//! NuGet global packages folder handling
//!
//! The cache is laid out as `<root>/<package id>/<version>/...`, with
//! tooling-internal directories (such as `.tools`) living beside the package
//! directories.
//!
//! # Phases
//!
//! | Phase | Module | Mutates disk |
//! |-------|--------|--------------|
//! | Diff | `differ` | no |
//! | Delete | `prune` | yes, after confirmation |

pub mod differ;
pub mod prune;

pub use differ::{find_unused, DiffReport};
pub use prune::{delete_entries, PruneSummary};

use std::fmt;
use std::path::PathBuf;

/// Directories under the cache root that never hold packages
pub const DEFAULT_RESERVED_DIRS: &[&str] = &[".tools"];

/// One `<package id>/<version>` directory in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Package id taken from the directory name
    pub package_id: String,
    /// Version taken from the directory name
    pub version: String,
    /// Absolute path of the version directory
    pub path: PathBuf,
}

impl fmt::Display for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
