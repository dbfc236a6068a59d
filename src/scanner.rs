//! Directory scanning and Terragrunt project detection.
//!
//! This module walks a repository tree top-down, prunes Terragrunt cache
//! directories before descending into them, and records every directory that
//! directly contains a `terragrunt.hcl` marker file.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::{DirEntry, WalkDir};

use crate::{
    config::ScanOptions,
    project::{Project, Projects},
    utils::relative_to,
};

/// File name suffix that marks a directory as a Terragrunt project.
pub const MARKER_SUFFIX: &str = "terragrunt.hcl";

/// Directory names that are never descended into.
pub const EXCLUDED_DIRS: [&str; 1] = [".terragrunt-cache"];

/// Directory scanner for detecting Terragrunt projects.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self { scan_options }
    }

    /// Scan a repository for Terragrunt projects, relative to the root itself.
    ///
    /// Equivalent to [`Scanner::scan_directory_relative_to`] with `root` as the
    /// reference directory, which is what an `atlantis.yaml` placed at the
    /// repository root expects.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan_directory_relative_to`].
    pub fn scan_directory(&self, root: &Path) -> Result<Projects> {
        self.scan_directory_relative_to(root, root)
    }

    /// Scan a repository for Terragrunt projects.
    ///
    /// Every directory below `root` that directly contains at least one file
    /// whose name ends with [`MARKER_SUFFIX`] is recorded once, expressed
    /// relative to `base`. Directories named in [`EXCLUDED_DIRS`] are pruned
    /// before descending, so nothing inside them is ever visited. The root
    /// directory itself is never recorded, even if it holds a marker file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `root` does not exist, cannot be read, or is not a directory
    /// - any directory below `root` cannot be read during the walk
    /// - `root` cannot be expressed relative to `base`
    pub fn scan_directory_relative_to(&self, root: &Path, base: &Path) -> Result<Projects> {
        let metadata = fs::metadata(root)
            .with_context(|| format!("Failed to access {}", root.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", root.display());
        }

        let prefix = Self::root_prefix(root, base)?;
        let progress = self.progress_bar();

        let mut walker = WalkDir::new(root).follow_links(self.scan_options.follow_links);
        if let Some(depth) = self.scan_options.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut projects = Projects::default();
        let mut skipped = Vec::new();

        for entry in walker.into_iter().filter_entry(|entry| {
            let prune = Self::should_prune(entry);
            if prune {
                skipped.push(entry.path().to_path_buf());
            }
            !prune
        }) {
            let entry =
                entry.with_context(|| format!("Failed to scan {}", root.display()))?;

            // Markers directly under the root belong to the root, which is never a project.
            if entry.depth() < 2 || !Self::is_marker_file(&entry) {
                continue;
            }

            let Some(dir) = entry.path().parent() else {
                continue;
            };
            let Ok(suffix) = dir.strip_prefix(root) else {
                continue;
            };

            let project = Project::from_relative_path(&prefix.join(suffix))
                .with_context(|| format!("Cannot list project {}", dir.display()))?;
            if projects.insert(project) {
                progress.set_message(format!("Scanning... {} found", projects.len()));
            }
        }

        progress.finish_and_clear();

        if self.scan_options.verbose {
            for path in &skipped {
                eprintln!(
                    "{} {}",
                    "Skipped cache directory:".dimmed(),
                    path.display().to_string().dimmed()
                );
            }
        }

        Ok(projects)
    }

    /// Compute the path of `root` relative to `base`.
    ///
    /// Falls back to canonical paths when the two cannot be related as given,
    /// e.g. a relative root with an absolute base.
    fn root_prefix(root: &Path, base: &Path) -> Result<PathBuf> {
        if let Some(prefix) = relative_to(root, base) {
            return Ok(prefix);
        }

        let canonical_root = fs::canonicalize(root)
            .with_context(|| format!("Failed to resolve {}", root.display()))?;
        let canonical_base = fs::canonicalize(base)
            .with_context(|| format!("Failed to resolve {}", base.display()))?;

        relative_to(&canonical_root, &canonical_base).with_context(|| {
            format!(
                "Cannot express {} relative to {}",
                root.display(),
                base.display()
            )
        })
    }

    fn progress_bar(&self) -> ProgressBar {
        if self.scan_options.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Scanning...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Whether the walk must not descend into this entry.
    ///
    /// The root is always walked, even when it happens to be named like a cache.
    fn should_prune(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && Self::is_excluded_directory(entry.path())
    }

    /// Check if directory is in the excluded list
    fn is_excluded_directory(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
    }

    /// Whether the entry is a non-directory whose name ends with the marker suffix.
    ///
    /// The name is compared as raw bytes, so names that are not valid UTF-8
    /// still match.
    fn is_marker_file(entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            return false;
        }

        entry
            .file_name()
            .as_encoded_bytes()
            .ends_with(MARKER_SUFFIX.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_scanner() -> Scanner {
        Scanner::new(ScanOptions {
            quiet: true,
            ..ScanOptions::default()
        })
    }

    /// Helper to create a file with content, ensuring parent dirs exist.
    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn dirs(projects: &Projects) -> Vec<String> {
        projects
            .iter()
            .map(|p| p.manifest_dir().to_string())
            .collect()
    }

    #[test]
    fn test_is_excluded_directory() {
        assert!(Scanner::is_excluded_directory(Path::new(
            "/repo/live/.terragrunt-cache"
        )));
        assert!(!Scanner::is_excluded_directory(Path::new("/repo/live")));
        assert!(!Scanner::is_excluded_directory(Path::new(
            "/repo/.terragrunt-cache-old"
        )));
        assert!(!Scanner::is_excluded_directory(Path::new(".terraform")));
    }

    #[test]
    fn test_marker_suffix_matches_prefixed_names() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        create_file(&root.join("a/prod.terragrunt.hcl"), "");
        create_file(&root.join("b/terragrunt.hcl.bak"), "");
        create_file(&root.join("c/main.tf"), "");

        let projects = default_scanner().scan_directory(root).unwrap();

        assert_eq!(dirs(&projects), vec!["a"]);
    }

    #[test]
    fn test_directory_named_like_marker_is_not_a_marker() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/terragrunt.hcl")).unwrap();

        let projects = default_scanner().scan_directory(root).unwrap();

        assert!(projects.is_empty());
    }

    #[test]
    fn test_root_named_like_cache_is_still_scanned() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join(".terragrunt-cache");
        create_file(&root.join("app/terragrunt.hcl"), "");

        let projects = default_scanner().scan_directory(&root).unwrap();

        assert_eq!(dirs(&projects), vec!["app"]);
    }

    #[test]
    fn test_max_depth_limits_discovery() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        create_file(&root.join("shallow/terragrunt.hcl"), "");
        create_file(&root.join("deep/er/still/terragrunt.hcl"), "");

        let scanner = Scanner::new(ScanOptions {
            quiet: true,
            max_depth: Some(2),
            ..ScanOptions::default()
        });
        let projects = scanner.scan_directory(root).unwrap();

        assert_eq!(dirs(&projects), vec!["shallow"]);
    }

    #[test]
    fn test_scan_relative_to_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("repo");
        create_file(&root.join("infra/network/terragrunt.hcl"), "");

        let projects = default_scanner()
            .scan_directory_relative_to(&root, tmp.path())
            .unwrap();

        assert_eq!(dirs(&projects), vec!["repo/infra/network"]);
    }

    #[test]
    fn test_root_prefix_for_same_directory_is_empty() {
        let tmp = TempDir::new().unwrap();

        let prefix = Scanner::root_prefix(tmp.path(), tmp.path()).unwrap();

        assert_eq!(prefix, PathBuf::new());
    }

    #[test]
    fn test_scan_resolves_parent_components_in_root() {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        create_file(&repo.join("infra/x/terragrunt.hcl"), "");

        let projects = default_scanner()
            .scan_directory_relative_to(&repo.join("infra").join(".."), &repo)
            .unwrap();

        assert_eq!(dirs(&projects), vec!["infra/x"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_marker_name_is_detected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("app");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(OsStr::from_bytes(b"\xff.terragrunt.hcl")), "").unwrap();

        let projects = default_scanner().scan_directory(tmp.path()).unwrap();

        assert_eq!(dirs(&projects), vec!["app"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_project_directory_fails_scan() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(OsStr::from_bytes(b"m\xffx"));
        create_file(&dir.join("terragrunt.hcl"), "");

        let err = default_scanner().scan_directory(tmp.path()).unwrap_err();

        assert!(format!("{err:#}").contains("not valid UTF-8"));
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let err = default_scanner().scan_directory(&missing).unwrap_err();

        assert!(err.to_string().contains("Failed to access"));
    }

    #[test]
    fn test_scan_file_root_fails() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("terragrunt.hcl");
        create_file(&file, "");

        let err = default_scanner().scan_directory(&file).unwrap_err();

        assert!(err.to_string().contains("is not a directory"));
    }
}
