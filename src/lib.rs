//! # atlantis-gen
//!
//! A small CLI tool that scans a Terragrunt repository and generates the
//! `atlantis.yaml` repo config listing every deployable project directory.
//!
//! A directory counts as a project when it directly contains a file whose name
//! ends with `terragrunt.hcl`. Terragrunt's `.terragrunt-cache` directories are
//! pruned from the walk, and the scanned root itself is never reported.
//!
//! ## Usage
//!
//! ```bash
//! # Print the manifest to stdout
//! atlantis-gen ./infrastructure
//!
//! # Write it straight to a file
//! atlantis-gen ./infrastructure --output atlantis.yaml
//! ```

pub mod config;
pub mod output;
pub mod project;
pub mod scanner;
pub mod utils;

pub use config::{FileConfig, ScanOptions};
pub use output::{Manifest, ManifestProject, OutputTarget};
pub use project::{Project, Projects};
pub use scanner::Scanner;
