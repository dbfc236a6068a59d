//! Path helpers for turning walked directories into manifest entries.

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

/// Express `path` relative to `base`.
///
/// Both paths are compared component-wise after lexical normalization: `.`
/// components are dropped and `name/..` pairs collapse, so `./infra/net`
/// relative to `.` yields `infra/net` and `repo/infra/../live` relative to
/// `repo` yields `live`. When `path` is not under
/// `base`, the result climbs out with `..` components, which mirrors how
/// `os.path.relpath`-style helpers behave. Returns `None` when the two paths
/// cannot be related (for example one absolute and one relative, or different
/// Windows prefixes).
///
/// An empty path is returned when `path` and `base` are the same directory.
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if path.is_absolute() != base.is_absolute() {
        return None;
    }

    let path_parts = normalized(path);
    let base_parts = normalized(base);

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    // Differing roots or prefixes mean the paths live on different trees.
    let is_anchor = |c: &Component<'_>| matches!(c, Component::Prefix(_) | Component::RootDir);
    if base_parts[common..].iter().any(is_anchor) || path_parts[common..].iter().any(is_anchor) {
        return None;
    }

    let mut relative = PathBuf::new();
    for part in &base_parts[common..] {
        if matches!(part, Component::ParentDir) {
            return None;
        }
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }

    Some(relative)
}

/// Render a relative directory the way the manifest stores it.
///
/// Components are joined with `/` regardless of platform so that a manifest
/// generated on Windows is identical to one generated on Linux.
///
/// # Errors
///
/// Returns an error if any component is not valid UTF-8, since a lossy
/// rendering would name a directory that does not exist.
pub fn to_manifest_dir(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        let Some(part) = component.as_os_str().to_str() else {
            bail!("{} is not valid UTF-8", path.display());
        };
        parts.push(part);
    }
    Ok(parts.join("/"))
}

/// Lexically normalize a path into its components.
///
/// A `..` removes the preceding normal component; leading `..` components are
/// kept, and `..` directly after a root is dropped.
fn normalized(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    parts
}
