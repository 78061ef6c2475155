//! Run context: the resolved inputs every phase of a prune run shares

use crate::cache::DEFAULT_RESERVED_DIRS;
use crate::config::Config;
use crate::error::{NuPruneError, NuPruneResult};
use crate::workers::resolve_jobs;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable NuGet itself uses to relocate the global packages folder
pub const CACHE_ENV_VAR: &str = "NUGET_PACKAGES";

/// Stages of a prune run, in order. No stage is entered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Scanning,
    Aggregating,
    Diffing,
    AwaitingConfirmation,
    Deleting,
    Done,
    Cancelled,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scanning => "scanning",
            Self::Aggregating => "aggregating",
            Self::Diffing => "diffing",
            Self::AwaitingConfirmation => "awaiting-confirmation",
            Self::Deleting => "deleting",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

/// Values given on the command line, each overriding the config file
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub workspace: Option<PathBuf>,
    pub cache: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub preview_limit: Option<usize>,
}

/// Inputs of one prune run, built once at startup
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Canonical workspace root scanned for manifests
    pub workspace_root: PathBuf,
    /// Global packages folder
    pub cache_root: PathBuf,
    /// Worker threads per parallel phase
    pub jobs: usize,
    /// Unused directories listed before the prompt
    pub preview_limit: usize,
    /// Cache-root directory names that are never packages
    pub reserved: Vec<String>,
    /// Workspace directory names not descended into
    pub exclude: Vec<String>,
}

impl RunContext {
    /// Resolve the context from CLI overrides, the environment and config
    pub fn resolve(overrides: RunOverrides, config: &Config) -> NuPruneResult<Self> {
        Self::resolve_with_env(overrides, config, std::env::var_os(CACHE_ENV_VAR))
    }

    fn resolve_with_env(
        overrides: RunOverrides,
        config: &Config,
        env_cache: Option<OsString>,
    ) -> NuPruneResult<Self> {
        let workspace_root = resolve_workspace(overrides.workspace, config)?;
        let cache_root = resolve_cache_root(overrides.cache, env_cache, config)?;
        let jobs = resolve_jobs(overrides.jobs.unwrap_or(config.parallelism.jobs));
        let preview_limit = overrides
            .preview_limit
            .unwrap_or(config.cache.preview_limit);

        let ctx = Self {
            workspace_root,
            cache_root,
            jobs,
            preview_limit,
            reserved: reserved_dirs(config),
            exclude: config.workspace.exclude.clone(),
        };
        debug!("Run context: {:?}", ctx);
        Ok(ctx)
    }
}

/// Workspace root: CLI value, else config, else the current directory.
///
/// The result is canonical and must be an existing directory.
pub fn resolve_workspace(cli: Option<PathBuf>, config: &Config) -> NuPruneResult<PathBuf> {
    let requested = match cli.or_else(|| config.workspace.root.clone()) {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| NuPruneError::io("getting current directory", e))?,
    };

    match requested.canonicalize() {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(NuPruneError::WorkspaceNotFound(requested)),
    }
}

/// Cache root: CLI value, else `NUGET_PACKAGES`, else config, else
/// `~/.nuget/packages`. An empty environment value counts as unset.
pub fn resolve_cache_root(
    cli: Option<PathBuf>,
    env_cache: Option<OsString>,
    config: &Config,
) -> NuPruneResult<PathBuf> {
    let env_cache = env_cache.filter(|v| !v.is_empty()).map(PathBuf::from);

    let root = match cli.or(env_cache).or_else(|| config.cache.root.clone()) {
        Some(root) => root,
        None => default_cache_root().ok_or(NuPruneError::HomeDirUnknown)?,
    };

    Ok(std::path::absolute(&root).unwrap_or(root))
}

/// NuGet's default global packages folder under the user profile
pub fn default_cache_root() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nuget").join("packages"))
}

/// Configured reserved names, always including the built-in ones
fn reserved_dirs(config: &Config) -> Vec<String> {
    let mut reserved = config.cache.reserved.clone();
    for builtin in DEFAULT_RESERVED_DIRS {
        if !reserved.iter().any(|r| r.eq_ignore_ascii_case(builtin)) {
            reserved.push(builtin.to_string());
        }
    }
    reserved
}
