//! nuprune - reclaim disk space from the NuGet package cache
//!
//! Scans a workspace for project manifests (`*.csproj`, `*.fsproj`,
//! `*.vbproj`, `packages.config`), builds the set of referenced package
//! versions, and deletes the version directories in the global package
//! cache that nothing references.

pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod manifest;
pub mod package;
pub mod scan;
pub mod ui;
pub mod workers;

pub use error::{NuPruneError, NuPruneResult};
