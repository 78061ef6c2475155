//! Project manifest discovery and parsing
//!
//! Two manifest shapes declare NuGet references:
//!
//! | Kind | Files | Element | Id | Version |
//! |------|-------|---------|----|---------|
//! | Project | `*.csproj`, `*.fsproj`, `*.vbproj` | `PackageReference` | `Include` | `Version` attr, else `<Version>` child |
//! | PackagesConfig | `packages.config` | `package` | `id` | `version` |

pub mod discover;
pub mod parse;

pub use discover::discover_manifests;
pub use parse::{parse_manifest, parse_manifest_str};

use std::fmt;
use std::path::{Path, PathBuf};

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// SDK-style project file with `PackageReference` items
    Project,
    /// Legacy `packages.config`
    PackagesConfig,
}

impl ManifestKind {
    /// Project file extensions, compared case-insensitively
    const PROJECT_EXTENSIONS: &'static [&'static str] = &["csproj", "fsproj", "vbproj"];

    const PACKAGES_CONFIG: &'static str = "packages.config";

    /// Classify a file path, returning `None` for non-manifests
    pub fn detect(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if file_name.eq_ignore_ascii_case(Self::PACKAGES_CONFIG) {
            return Some(Self::PackagesConfig);
        }

        let extension = path.extension()?.to_str()?;
        Self::PROJECT_EXTENSIONS
            .iter()
            .any(|ext| extension.eq_ignore_ascii_case(ext))
            .then_some(Self::Project)
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Project => "project",
            Self::PackagesConfig => "packages.config",
        };
        write!(f, "{}", name)
    }
}

/// A manifest file found in the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    /// Absolute path to the manifest
    pub path: PathBuf,
    /// Declared format
    pub kind: ManifestKind,
}
