//! # atlantis-gen
//!
//! Scan a Terragrunt repository and generate the matching `atlantis.yaml`.
//!
//! ## Usage
//!
//! ```bash
//! # Print the config to stdout, wrapped in instructions
//! atlantis-gen ./infrastructure
//!
//! # Write the config to a file
//! atlantis-gen ./infrastructure -o ./infrastructure/atlantis.yaml
//! ```

mod cli;

use std::fs;
use std::io;
use std::path::Path;
use std::process::exit;

use anyhow::{Context, Ok, Result, bail};
use atlantis_gen::{
    config::FileConfig,
    output::{Manifest, OutputTarget, emit},
    scanner::Scanner,
};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;

/// Entry point for the atlantis-gen application.
///
/// This function handles all errors by calling [`inner_main`] and printing
/// the error chain to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err:#}", "Error:".red().bold());

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, scans the repository, builds the manifest and hands it
/// to the selected output target.
///
/// # Errors
///
/// Returns errors from directory scanning, YAML serialization, or writing
/// the output file.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();
    let scan_options = args.scan_options(&file_config);
    let verbose = scan_options.verbose;

    let root = args.root();
    let scanner = Scanner::new(scan_options);
    let projects = scanner.scan_directory_relative_to(&root, &args.reference_dir())?;

    if verbose {
        eprintln!(
            "{} {}",
            "📊 Found projects under".bold(),
            root.display().to_string().bright_white()
        );
        projects.print_summary();
    }

    let manifest = Manifest::from_projects(&projects);
    let target = args.output_target(&file_config);
    emit(&manifest, &target, &mut io::stdout().lock())?;

    if let OutputTarget::File(path) = &target {
        eprintln!(
            "{} {}",
            format!("✅ Wrote {} project(s) to", projects.len()).green(),
            path.display()
        );
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# atlantis-gen configuration
# All values shown are their defaults. Uncomment and change as needed.

[output]
# Write the manifest to this file instead of stdout (same as --output)
# file = "atlantis.yaml"

# Print the "Replace the content of atlantis.yaml" banner in stdout mode
# banner = true

[scanning]
# List discovered projects and skipped cache directories on stderr
# verbose = false

# Follow symbolic links to directories
# follow_links = false

# Maximum directory depth to scan (unlimited when unset)
# max_depth = 10
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let file = config.output.file.as_ref().map_or_else(
        || "(stdout)  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let max_depth = config
        .scanning
        .max_depth
        .map_or_else(|| "(unlimited)  (default)".to_string(), |v| v.to_string());

    format!(
        "\
[output]
file          = {file}
banner        = {banner}

[scanning]
verbose       = {verbose}
follow_links  = {follow_links}
max_depth     = {max_depth}",
        banner = show_bool(config.output.banner, true),
        verbose = show_bool(config.scanning.verbose, false),
        follow_links = show_bool(config.scanning.follow_links, false),
    )
}

/// Create the config file from the template unless one already exists.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if write_config_template(&path)? {
        println!("Config file written to: {}", path.display());
    } else {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
    }
    Ok(())
}

/// Write [`CONFIG_TEMPLATE`] to `path`, creating parent directories.
///
/// Returns `false` without touching anything when `path` already exists.
fn write_config_template(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    Ok(true)
}

/// Load the configuration file; a broken file only warns and yields defaults.
fn load_config() -> FileConfig {
    FileConfig::load().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Warning: ignoring config file:".yellow());
        FileConfig::default()
    })
}
