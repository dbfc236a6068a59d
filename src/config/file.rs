//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/atlantis-gen/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! [output]
//! file = "atlantis.yaml"
//! banner = true
//!
//! [scanning]
//! verbose = false
//! follow_links = false
//! max_depth = 10
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,
}

/// Output options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    /// Default file to write the manifest to
    pub file: Option<PathBuf>,

    /// Whether to print the instructional banner in stdout mode
    pub banner: Option<bool>,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileScanConfig {
    /// Whether to show verbose output
    pub verbose: Option<bool>,

    /// Whether to follow symbolic links to directories
    pub follow_links: Option<bool>,

    /// Maximum directory depth to scan
    pub max_depth: Option<usize>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/atlantis-gen/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    ///
    /// Returns `None` if the config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("atlantis-gen").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// contains invalid TOML or unexpected fields.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.output.file.is_none());
        assert!(config.output.banner.is_none());
        assert!(config.scanning.verbose.is_none());
        assert!(config.scanning.follow_links.is_none());
        assert!(config.scanning.max_depth.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[output]
file = "~/infra/atlantis.yaml"
banner = false

[scanning]
verbose = true
follow_links = true
max_depth = 5
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(
            config.output.file,
            Some(PathBuf::from("~/infra/atlantis.yaml"))
        );
        assert_eq!(config.output.banner, Some(false));
        assert_eq!(config.scanning.verbose, Some(true));
        assert_eq!(config.scanning.follow_links, Some(true));
        assert_eq!(config.scanning.max_depth, Some(5));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r"
[scanning]
max_depth = 2
";

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert!(config.output.file.is_none());
        assert_eq!(config.scanning.max_depth, Some(2));
        assert!(config.scanning.verbose.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.output.file.is_none());
        assert!(config.scanning.max_depth.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[scanning]
max_depth = "deep"
"#;
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_unknown_field_errors() {
        let toml_content = r#"
[scanning]
marker = "main.tf"
"#;
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with(Path::new("atlantis-gen").join("config.toml")));
        }
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = FileConfig::load_from(&tmp.path().join("absent.toml")).unwrap();

        assert!(config.output.file.is_none());
    }

    #[test]
    fn test_load_from_reports_path_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[output]\nbanner = \"yes\"\n").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(&PathBuf::from("~/infra"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("infra"));
        }
    }

    #[test]
    fn test_expand_tilde_leaves_other_paths_unchanged() {
        let absolute = PathBuf::from("/srv/infra");
        assert_eq!(expand_tilde(&absolute), absolute);

        let relative = PathBuf::from("infra/live");
        assert_eq!(expand_tilde(&relative), relative);
    }
}
