//! CLI command implementations

pub mod config;
pub mod prune;
pub mod scan;

pub use config::execute as config;
pub use prune::execute as prune;
pub use scan::execute as scan;
