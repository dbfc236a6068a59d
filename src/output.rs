//! Atlantis manifest generation.
//!
//! This module provides the serializable `atlantis.yaml` document built from a
//! scan and the logic that routes it either to a file or to stdout. The YAML
//! is emitted in block style, one `- dir: ...` entry per project:
//!
//! ```yaml
//! version: 3
//! projects:
//! - dir: infra/network
//! - dir: infra/database
//! ```

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::project::{Project, Projects};

/// Repo config version written to every manifest.
pub const MANIFEST_VERSION: u32 = 3;

/// Instructions printed ahead of the manifest when writing to stdout.
pub const STDOUT_BANNER: &str = "\nReplace the content of atlantis.yaml by this output:\n\n\n";

/// Top-level `atlantis.yaml` document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    /// Repo config format version, always [`MANIFEST_VERSION`] when generated.
    pub version: u32,

    /// One entry per discovered project, sorted by directory.
    pub projects: Vec<ManifestProject>,
}

/// A single project entry in the manifest.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ManifestProject {
    /// Project directory relative to the repository root, `/`-separated.
    pub dir: String,
}

/// Where a rendered manifest goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// Create or truncate the file and write the bare YAML to it.
    File(PathBuf),

    /// Print to stdout, optionally wrapped in [`STDOUT_BANNER`].
    Stdout {
        /// Whether to print the instructional banner
        banner: bool,
    },
}

impl From<&Project> for ManifestProject {
    fn from(project: &Project) -> Self {
        Self {
            dir: project.manifest_dir().to_string(),
        }
    }
}

impl Manifest {
    /// Build a manifest listing every project in the set, in sorted order.
    #[must_use]
    pub fn from_projects(projects: &Projects) -> Self {
        Self {
            version: MANIFEST_VERSION,
            projects: projects.iter().map(ManifestProject::from).collect(),
        }
    }

    /// Render the manifest as block-style YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).context("Failed to serialize manifest")
    }

    /// Parse a manifest from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml_ng::from_str(text).context("Failed to parse manifest")
    }

    /// The project directories listed in the manifest, in document order.
    #[must_use]
    pub fn dirs(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.dir.as_str()).collect()
    }
}

/// Render `manifest` and send it to `target`.
///
/// Stdout output is written to `stdout` so callers (and tests) can supply any
/// writer. With [`OutputTarget::File`] nothing is written to `stdout`.
///
/// # Errors
///
/// Returns an error if serialization fails, if the output file cannot be
/// created or written (e.g. its parent directory is missing or read-only), or
/// if writing to `stdout` fails.
pub fn emit<W: Write>(manifest: &Manifest, target: &OutputTarget, stdout: &mut W) -> Result<()> {
    let yaml = manifest.to_yaml()?;

    match target {
        OutputTarget::File(path) => write_file(path, &yaml),
        OutputTarget::Stdout { banner: true } => {
            writeln!(stdout, "{STDOUT_BANNER}{yaml}\n").context("Failed to write to stdout")
        }
        OutputTarget::Stdout { banner: false } => {
            stdout
                .write_all(yaml.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}

fn write_file(path: &Path, yaml: &str) -> Result<()> {
    fs::write(path, yaml)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))
}
