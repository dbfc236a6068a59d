//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and options using the
//! [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use atlantis_gen::config::ScanOptions;
use atlantis_gen::config::file::{FileConfig, expand_tilde};
use atlantis_gen::output::OutputTarget;

/// Command-line arguments for controlling directory scanning behavior.
#[derive(Parser)]
struct ScanningArgs {
    /// List discovered projects and skipped cache directories on stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Hide the scanning progress spinner
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Follow symbolic links to directories while scanning
    #[arg(long)]
    follow_links: bool,

    /// Maximum directory depth to scan
    ///
    /// A value of 1 only looks at files directly inside PATH, which never
    /// yields a project since the root itself is not one.
    /// When not set, the scan is unlimited.
    #[arg(long)]
    max_depth: Option<usize>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser)]
#[command(name = "atlantis-gen")]
#[command(about = "Generate an atlantis.yaml config from a terragrunt repository")]
#[command(version)]
#[command(author)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Path to the terragrunt repository
    #[arg(value_name = "PATH", required = true)]
    path: Option<PathBuf>,

    /// Name of the created file. Without it, the config is printed to stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory that project paths in the manifest are relative to
    ///
    /// Defaults to PATH, which matches an atlantis.yaml placed at the
    /// repository root.
    #[arg(long, value_name = "DIR")]
    relative_to: Option<PathBuf>,

    /// Print only the YAML when writing to stdout
    #[arg(long)]
    no_banner: bool,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// The repository root to scan.
    ///
    /// Clap only lets `path` be absent when a subcommand is given; `.` is the
    /// fallback for that case.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// The directory manifest paths are expressed relative to.
    ///
    /// Priority: `--relative-to` > the scanned root.
    #[must_use]
    pub fn reference_dir(&self) -> PathBuf {
        self.relative_to.clone().unwrap_or_else(|| self.root())
    }

    /// Resolve where the manifest is written.
    ///
    /// - **file**: `--output` > config `output.file` (tilde expanded) > stdout
    /// - **banner**: printed unless `--no-banner` or config `output.banner = false`
    #[must_use]
    pub fn output_target(&self, config: &FileConfig) -> OutputTarget {
        let file = self
            .output
            .clone()
            .or_else(|| config.output.file.as_deref().map(expand_tilde));

        file.map_or_else(
            || OutputTarget::Stdout {
                banner: !self.no_banner && config.output.banner.unwrap_or(true),
            },
            OutputTarget::File,
        )
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **verbose** / **`follow_links`**: CLI flag `||` config value `||` `false`
    /// - **quiet**: CLI flag only
    /// - **`max_depth`**: CLI > config > unlimited
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            quiet: self.scanning.quiet,
            follow_links: self.scanning.follow_links
                || config.scanning.follow_links.unwrap_or(false),
            max_depth: self.scanning.max_depth.or(config.scanning.max_depth),
        }
    }
}
