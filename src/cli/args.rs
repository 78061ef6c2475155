//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// nuprune - reclaim disk space from the NuGet package cache
///
/// Scans a workspace for project manifests and deletes cached package
/// versions that none of them reference.
#[derive(Parser, Debug)]
#[command(name = "nuprune")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "NUPRUNE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete cached package versions no manifest references
    Prune(PruneArgs),

    /// List the packages referenced by the workspace
    Scan(ScanArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the prune command
#[derive(Parser, Debug)]
pub struct PruneArgs {
    /// Workspace to scan for manifests (defaults to config, then current directory)
    pub workspace: Option<PathBuf>,

    /// Package cache root (overrides NUGET_PACKAGES and config)
    #[arg(long, value_name = "DIR")]
    pub cache: Option<PathBuf>,

    /// Worker threads per phase (0 = all cores)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Unused directories to list before asking
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Show what would be deleted without prompting or deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short, long, conflicts_with = "dry_run")]
    pub yes: bool,
}

/// Arguments for the scan command
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Workspace to scan for manifests (defaults to config, then current directory)
    pub workspace: Option<PathBuf>,

    /// Worker threads (0 = all cores)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for the scan command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one id/version per line)
    Plain,
}
