//! Core project data structure.

use std::{
    fmt::{self, Display, Formatter},
    path::Path,
};

use anyhow::Result;

use crate::utils::to_manifest_dir;

/// A directory that directly contains at least one Terragrunt marker file.
///
/// The directory is kept in its manifest form: relative to the scan's
/// reference directory and `/`-separated. Ordering compares that string, so
/// the manifest lists projects sorted lexicographically by `dir`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Project {
    dir: String,
}

impl Project {
    /// Create a project from a directory already in manifest form.
    #[must_use]
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a project from a reference-relative filesystem path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8.
    pub fn from_relative_path(path: &Path) -> Result<Self> {
        to_manifest_dir(path).map(Self::new)
    }

    /// The directory as written to the manifest.
    #[must_use]
    pub fn manifest_dir(&self) -> &str {
        &self.dir
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_project_from_relative_path_uses_manifest_form() {
        let path: PathBuf = ["live", "prod", "vpc"].iter().collect();
        let project = Project::from_relative_path(&path).unwrap();

        assert_eq!(project.manifest_dir(), "live/prod/vpc");
        assert_eq!(project.to_string(), "live/prod/vpc");
    }

    #[test]
    fn test_project_ordering_follows_dir_string() {
        let dash = Project::new("a-b");
        let nested = Project::new("a/b");
        let sibling = Project::new("a/c");

        assert!(dash < nested);
        assert!(nested < sibling);
    }

    #[cfg(unix)]
    #[test]
    fn test_project_from_non_utf8_path_fails() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"m\xffx"));

        assert!(Project::from_relative_path(path).is_err());
    }
}
