//! Collection of discovered projects.
//!
//! This module provides the `Projects` set, which deduplicates directories
//! (a directory holding several marker files is one project) and iterates
//! them in sorted order so generated manifests are reproducible.

use std::collections::BTreeSet;

use colored::Colorize;

use super::Project;

/// The deduplicated, ordered set of projects found by a scan.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Projects(BTreeSet<Project>);

impl FromIterator<Project> for Projects {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Projects {
    type Item = &'a Project;
    type IntoIter = std::collections::btree_set::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Projects {
    /// Add a project, returning `false` if it was already present.
    pub fn insert(&mut self, project: Project) -> bool {
        self.0.insert(project)
    }

    /// Iterate the projects in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.0.iter()
    }

    /// Get the number of projects in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Print a summary of the discovered projects to stderr.
    ///
    /// Stdout is reserved for the manifest itself, so the listing never
    /// contaminates piped output.
    pub fn print_summary(&self) {
        for project in self {
            eprintln!("  {} {}", "📁".cyan(), project.to_string().bright_white());
        }

        eprintln!(
            "{} {}",
            "Total:".bold(),
            format!("{} project(s)", self.0.len()).bright_white()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_deduplicate() {
        let mut projects = Projects::default();

        assert!(projects.insert(Project::new("infra/network")));
        assert!(!projects.insert(Project::new("infra/network")));
        assert_eq!(projects.len(), 1);
    }

    #[test]
    fn test_projects_iterate_sorted() {
        let projects: Projects = ["zeta", "alpha/b", "alpha-b", "alpha"]
            .into_iter()
            .map(Project::new)
            .collect();

        let dirs: Vec<&str> = projects.iter().map(Project::manifest_dir).collect();
        assert_eq!(dirs, vec!["alpha", "alpha-b", "alpha/b", "zeta"]);
    }

    #[test]
    fn test_projects_empty() {
        let projects = Projects::default();

        assert!(projects.is_empty());
        assert_eq!(projects.len(), 0);
        assert_eq!((&projects).into_iter().count(), 0);
    }
}
