//! Configuration schema for nuprune
//!
//! Configuration is stored at `~/.config/nuprune/config.toml`

use crate::cache::DEFAULT_RESERVED_DIRS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Workspace scanning
    pub workspace: WorkspaceConfig,

    /// Package cache settings
    pub cache: CacheConfig,

    /// Worker pool sizing
    pub parallelism: ParallelismConfig,
}

impl Config {
    /// Check values serde cannot: known log format and bare directory names
    pub fn validate(&self) -> Result<(), String> {
        match self.general.log_format.to_ascii_lowercase().as_str() {
            "text" | "json" => {}
            other => {
                return Err(format!(
                    "general.log_format must be \"text\" or \"json\", got \"{}\"",
                    other
                ))
            }
        }

        let names = [
            ("cache.reserved", &self.cache.reserved),
            ("workspace.exclude", &self.workspace.exclude),
        ];
        for (key, list) in names {
            if let Some(bad) = list.iter().find(|n| !is_bare_dir_name(n)) {
                return Err(format!("{} entries must be directory names, got \"{}\"", key, bad));
            }
        }
        Ok(())
    }
}

fn is_bare_dir_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Workspace scanning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Default workspace root (current directory when unset)
    pub root: Option<PathBuf>,

    /// Directory names never descended into while looking for manifests
    pub exclude: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            exclude: vec![".git".to_string()],
        }
    }
}

/// Package cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root, used when neither --cache nor NUGET_PACKAGES is set
    pub root: Option<PathBuf>,

    /// Top-level cache directories that are not packages
    pub reserved: Vec<String>,

    /// Number of unused directories listed before confirmation
    pub preview_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: None,
            reserved: DEFAULT_RESERVED_DIRS.iter().map(|s| s.to_string()).collect(),
            preview_limit: 20,
        }
    }
}

/// Worker pool settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelismConfig {
    /// Worker threads for scan/diff/delete (0 = available cores)
    pub jobs: usize,
}
