//! # Projgen Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per subcommand. Each defines a Clap `Args` struct and a
//! `handle_*` function that `main.rs` routes to.
//!
//! - `generate`: scan, build the model, render, verify and write the project
//! - `scan`: list the source files the generator would see
//! - `verify`: check an existing `project.pbxproj`
//!
//! Options shared by every command (`--root`, `--config`) are resolved once
//! in `main.rs` into a `RunContext`.
//!
use crate::core::config::{self, Config};
use crate::core::error::Result;
use std::path::{Path, PathBuf};

pub mod generate;
pub mod scan;
pub mod verify;

/// Resolved global options.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Directory that is scanned and that receives `<Name>.xcodeproj`.
    pub root: PathBuf,
    /// Explicit `--config` file, if one was given.
    pub config_path: Option<PathBuf>,
}

impl RunContext {
    pub fn new(root: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self { root, config_path }
    }

    /// Loads the layered configuration for this root.
    pub fn load_config(&self) -> Result<Config> {
        config::load_config(&self.root, self.config_path.as_deref())
    }

    /// `<root>/<name>.xcodeproj`
    pub fn project_dir(&self, config: &Config) -> PathBuf {
        self.root.join(format!("{}.xcodeproj", config.project.name))
    }
}

/// Path for user messages: relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    match std::env::current_dir() {
        Ok(cwd) => pathdiff::diff_paths(path, &cwd)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| path.display().to_string()),
        Err(_) => path.display().to_string(),
    }
}
