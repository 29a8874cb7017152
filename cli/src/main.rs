//! # Projgen Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the projgen CLI, which
//! generates an Xcode `project.pbxproj` for the Finora iOS app from the
//! Swift sources found under a root directory. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Resolving the scan root and configuration file shared by all commands
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each command (`generate`, `scan`, `verify`) is a variant of `Commands`
//!   and maps to a `handle_*` function in `commands/`.
//! - `generate` runs when no command is given.
//! - All errors are propagated to this level for consistent handling.
//!
//! ## Examples
//!
//! ```bash
//! # Generate Finora.xcodeproj in the current directory
//! projgen
//!
//! # Compile every discovered file and derive groups from the tree
//! projgen --root ~/src/finora generate --all-sources --groups discovered
//!
//! # Show what the scanner sees
//! projgen -v scan --tree
//!
//! # Check a project file
//! projgen verify Finora.xcodeproj/project.pbxproj
//! ```
//!
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // generate, scan, verify
mod common; // Shared filesystem and console utilities
mod core; // Errors, configuration, templating
mod project; // Project document model, rendering and verification

use commands::RunContext;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "projgen",
    about = "📱 projgen: Xcode project generator for Finora",
    long_about = "Scans a directory of Swift sources and writes <Name>.xcodeproj/project.pbxproj\n\
                  with an application target, a unit-test target and their build settings.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory to scan and to write the project into. Defaults to the
    /// current directory.
    #[arg(short, long, env = "PROJGEN_ROOT", global = true)]
    root: Option<String>,

    /// Project configuration file. Defaults to `<root>/.projgen.toml`.
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the project (default).
    #[command(alias = "g")]
    Generate(commands::generate::GenerateArgs),
    /// List the source files that would be included.
    #[command(alias = "s")]
    Scan(commands::scan::ScanArgs),
    /// Check an existing project.pbxproj for structural problems.
    Verify(commands::verify::VerifyArgs),
}

/// Expands `~` and makes `raw` absolute against the working directory.
/// `None` resolves to the working directory itself.
fn resolve_path(raw: Option<&str>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(match raw {
        Some(raw) => cwd.join(shellexpand::tilde(raw).as_ref()),
        None => cwd,
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = resolve_path(cli.root.as_deref())?;
    let config_path = match cli.config.as_deref() {
        Some(raw) => Some(resolve_path(Some(raw))?),
        None => None,
    };
    let ctx = RunContext::new(root, config_path);
    tracing::debug!("Run context: {:?}", ctx);

    match cli
        .command
        .unwrap_or_else(|| Commands::Generate(Default::default()))
    {
        Commands::Generate(args) => commands::generate::handle_generate(args, &ctx),
        Commands::Scan(args) => commands::scan::handle_scan(args, &ctx),
        Commands::Verify(args) => commands::verify::handle_verify(args, &ctx),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_generate() {
        let cli = Cli::parse_from(["projgen"]);
        assert!(cli.command.is_none());
        let cli = Cli::parse_from(["projgen", "generate", "--all-sources", "--groups", "discovered"]);
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert!(args.all_sources);
                assert_eq!(args.groups, Some(crate::core::config::GroupMode::Discovered));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_resolve_path_expands_tilde() -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        assert_eq!(resolve_path(None)?, cwd);
        assert_eq!(resolve_path(Some("sub"))?, cwd.join("sub"));
        let expanded = resolve_path(Some("~/finora"))?;
        assert!(!expanded.to_string_lossy().contains('~'));
        Ok(())
    }
}
