//! Workspace walk for manifest files

use super::{ManifestFile, ManifestKind};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Recursively find project manifests under `root`.
///
/// Directories whose name matches an entry of `exclude` (case-insensitive)
/// are not descended into. Symlinked manifest files are included, symlinked
/// directories are not walked. Unreadable entries are logged and skipped.
/// Results are sorted by path.
pub fn discover_manifests(root: &Path, exclude: &[String]) -> Vec<ManifestFile> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, exclude));

    let mut manifests = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable workspace entry: {}", e);
                continue;
            }
        };

        if !is_manifest_candidate(&entry) {
            continue;
        }

        if let Some(kind) = ManifestKind::detect(entry.path()) {
            debug!("Found {} manifest: {}", kind, entry.path().display());
            manifests.push(ManifestFile {
                path: entry.into_path(),
                kind,
            });
        }
    }

    manifests.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("Discovered {} manifest(s)", manifests.len());
    manifests
}

/// Regular files, plus symlinks that resolve to one. Directory links are
/// never followed.
fn is_manifest_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn is_excluded_dir(entry: &DirEntry, exclude: &[String]) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && name_matches(entry.file_name(), exclude)
}

fn name_matches(name: &OsStr, names: &[String]) -> bool {
    let Some(name) = name.to_str() else {
        return false;
    };
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}
