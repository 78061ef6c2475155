//! Package identity model
//!
//! NuGet treats package ids and versions case-insensitively, so identities
//! found in manifests and directory names from the cache must compare the
//! same way.

pub mod identity;

pub use identity::PackageIdentity;
