//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how the repository tree is
//! walked while looking for Terragrunt projects.

/// Configuration for directory scanning behavior.
///
/// The marker suffix and the excluded cache directory are fixed constants of
/// the scanner; these options only tune the traversal itself.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to report discovered projects and pruned cache directories
    pub verbose: bool,

    /// Whether to hide the progress spinner
    pub quiet: bool,

    /// Whether to follow symbolic links to directories
    pub follow_links: bool,

    /// Maximum directory depth to scan (None = unlimited)
    pub max_depth: Option<usize>,
}
