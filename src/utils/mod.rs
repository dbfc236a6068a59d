//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as path relativization and manifest path rendering.

pub mod path;

pub use path::{relative_to, to_manifest_dir};
