//! Discovered Terragrunt projects.
//!
//! ## Main Parts
//!
//! - [`Project`] - One directory that directly contains a `terragrunt.hcl` marker
//! - [`Projects`] - The sorted, deduplicated set of projects found by a scan

#[allow(clippy::module_inception)]
pub mod project;
pub mod projects;

pub use project::Project;
pub use projects::Projects;
