//! # Projgen Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the settings that shape the
//! generated project: the project name and entry file, what the scanner
//! treats as a source file, which files get compiled, and how the group
//! hierarchy is built.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line overrides (applied by the `generate` command)
//! 2. Project file: `--config <FILE>` or `<root>/.projgen.toml`
//! 3. User file: `<platform config dir>/projgen/config.toml`
//! 4. Defaults defined in this module, which reproduce the Finora layout
//!
//! Every table uses `deny_unknown_fields`, so a misspelled key is an error
//! rather than a silently ignored setting.
//!
//! ## Examples
//!
//! ```toml
//! [project]
//! name = "Finora"
//! deployment_target = "17.0"
//!
//! [sources]
//! register_all = true
//!
//! [groups]
//! mode = "discovered"
//! ```
//!
use crate::core::error::{ProjgenError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashSet;
use std::{
    fs,
    path::{Path, PathBuf},
};
use toml::{Table, Value};
use tracing::{debug, info, warn};

/// Name of the per-project configuration file looked up in the scan root.
pub const PROJECT_CONFIG_FILENAME: &str = ".projgen.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub groups: GroupsConfig,
}

/// Identity of the generated project and its targets.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project and application target name. The test target is `<name>Tests`.
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Application entry point, relative to the scan root. Defaults to `<name>App.swift`.
    #[serde(default)]
    pub entry_file: Option<String>,
    /// Prefix for PRODUCT_BUNDLE_IDENTIFIER; the target name is appended.
    #[serde(default = "default_bundle_id_prefix")]
    pub bundle_id_prefix: String,
    /// IPHONEOS_DEPLOYMENT_TARGET written into every build configuration.
    #[serde(default = "default_deployment_target")]
    pub deployment_target: String,
    /// Development region; also listed first in `knownRegions`.
    #[serde(default = "default_development_region")]
    pub development_region: String,
}

/// Controls which files the directory scanner reports.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Source file extension, with or without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Directory names that are never descended into.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    /// Skip directories whose name starts with `.`.
    #[serde(default = "default_true")]
    pub skip_hidden: bool,
}

/// Controls which discovered files are wired into a Sources build phase.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// Register every discovered file, not only the entry file.
    #[serde(default)]
    pub register_all: bool,
    /// Files below this directory are compiled by the test target.
    #[serde(default = "default_test_dir")]
    pub test_dir: String,
}

/// How the group hierarchy below the main group is produced.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupsConfig {
    #[serde(default)]
    pub mode: GroupMode,
    /// Hand-enumerated group paths used in `static` mode, in display order.
    #[serde(default = "default_group_paths")]
    pub paths: Vec<String>,
}

/// Group hierarchy mode.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// Use the configured list of group paths, regardless of the scanned tree.
    #[default]
    Static,
    /// Derive one group per directory that contains a discovered file.
    Discovered,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            entry_file: None,
            bundle_id_prefix: default_bundle_id_prefix(),
            deployment_target: default_deployment_target(),
            development_region: default_development_region(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            exclude_dirs: default_exclude_dirs(),
            skip_hidden: true,
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            register_all: false,
            test_dir: default_test_dir(),
        }
    }
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            mode: GroupMode::default(),
            paths: default_group_paths(),
        }
    }
}

impl Config {
    /// The entry file path, falling back to `<name>App.swift`.
    pub fn entry_file(&self) -> String {
        self.project
            .entry_file
            .clone()
            .unwrap_or_else(|| format!("{}App.swift", self.project.name))
    }

    /// The source extension without its leading dot.
    pub fn extension(&self) -> &str {
        self.scan.extension.trim_start_matches('.')
    }

    /// Name of the unit-test target.
    pub fn test_target_name(&self) -> String {
        format!("{}Tests", self.project.name)
    }

    /// Bundle identifier for the given target name.
    pub fn bundle_identifier(&self, target: &str) -> String {
        format!("{}.{}", self.project.bundle_id_prefix, target)
    }
}

fn default_project_name() -> String {
    "Finora".to_string()
}
fn default_bundle_id_prefix() -> String {
    "com.finora".to_string()
}
fn default_deployment_target() -> String {
    "16.0".to_string()
}
fn default_development_region() -> String {
    "en".to_string()
}
fn default_extension() -> String {
    "swift".to_string()
}
fn default_exclude_dirs() -> Vec<String> {
    vec!["build".to_string()]
}
fn default_true() -> bool {
    true
}
fn default_test_dir() -> String {
    "Tests".to_string()
}

fn default_group_paths() -> Vec<String> {
    [
        "Core",
        "Core/Network",
        "Core/Services",
        "Core/Managers",
        "Core/Utilities",
        "Core/Utilities/Extensions",
        "Core/Utilities/Constants",
        "Models",
        "ViewModels",
        "Views",
        "Views/Auth",
        "Views/Transactions",
        "Components",
        "Components/Buttons",
        "Components/TextFields",
        "Components/Cards",
        "Resources",
        "Resources/Colors",
        "Resources/Localizable",
        "Routing",
        "Preview",
        "Tests",
        "Tests/ViewModels",
        "Tests/Services",
        "Tests/Utilities",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Loads the merged and validated configuration for a scan root.
///
/// `explicit` is the `--config` argument; when given the file must exist.
/// Otherwise `<root>/.projgen.toml` is used if present.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let user_layer = load_user_config()?;
    let project_layer = load_project_config(root, explicit)?;
    let merged_layer = merge_layers(user_layer.unwrap_or_default(), project_layer);
    let merged_config = layer_to_config(merged_layer)?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Finora", "projgen") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_layer_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(root: &Path, explicit: Option<&Path>) -> Result<Option<Table>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(anyhow!(ProjgenError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            ))));
        }
        info!("Loading project configuration from: {}", path.display());
        return load_layer_from_path(path).map(Some);
    }
    let default_path: PathBuf = root.join(PROJECT_CONFIG_FILENAME);
    if default_path.is_file() {
        info!(
            "Loading project configuration from: {}",
            default_path.display()
        );
        load_layer_from_path(&default_path).map(Some)
    } else {
        debug!("No {} found in {}", PROJECT_CONFIG_FILENAME, root.display());
        Ok(None)
    }
}

fn load_layer_from_path(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    parse_layer(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Parses configuration text without validating it.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| anyhow!(ProjgenError::Config(e.to_string())))
}

/// Parses one configuration file as a raw table. The text must also
/// deserialize as a `Config`, so unknown keys and wrong types are reported
/// against the file that contains them.
fn parse_layer(content: &str) -> Result<Table> {
    parse_config(content)?;
    toml::from_str(content).map_err(|e| anyhow!(ProjgenError::Config(e.to_string())))
}

fn layer_to_config(layer: Table) -> Result<Config> {
    Value::Table(layer)
        .try_into()
        .map_err(|e: toml::de::Error| anyhow!(ProjgenError::Config(e.to_string())))
}

/// Overlays the project file on the user file. Every key the project file
/// sets wins, even when it restates a default; tables merge key by key.
fn merge_layers(user: Table, project: Option<Table>) -> Table {
    let mut merged = user;
    if let Some(project) = project {
        merge_tables(&mut merged, project);
    }
    merged
}

fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match value {
            Value::Table(nested) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => merge_tables(existing, nested),
                _ => {
                    base.insert(key, Value::Table(nested));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Checks a fully merged configuration, including command-line overrides.
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating configuration...");
    let name = &config.project.name;
    if name.trim().is_empty() {
        return Err(config_error("project.name must not be empty"));
    }
    if name.contains('/') {
        return Err(config_error(format!(
            "project.name '{}' must not contain '/'",
            name
        )));
    }
    if config.entry_file().trim().is_empty() {
        return Err(config_error("project.entry_file must not be empty"));
    }
    if config.extension().is_empty() {
        return Err(config_error("scan.extension must not be empty"));
    }
    let target = &config.project.deployment_target;
    let is_version = target
        .split('.')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    if !is_version {
        return Err(config_error(format!(
            "project.deployment_target '{}' is not a dotted version number",
            target
        )));
    }
    for dir in &config.scan.exclude_dirs {
        if dir.is_empty() || dir.contains('/') {
            return Err(config_error(format!(
                "scan.exclude_dirs entry '{}' must be a single directory name",
                dir
            )));
        }
    }
    validate_group_paths(&config.groups.paths)?;
    debug!("Configuration validation successful.");
    Ok(())
}

fn validate_group_paths(paths: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for path in paths {
        if path.is_empty() || path.split('/').any(str::is_empty) {
            return Err(config_error(format!(
                "groups.paths entry '{}' has an empty segment",
                path
            )));
        }
        if !seen.insert(path.as_str()) {
            return Err(config_error(format!(
                "groups.paths lists '{}' more than once",
                path
            )));
        }
    }
    for path in paths {
        if let Some((parent, _)) = path.rsplit_once('/') {
            if !seen.contains(parent) {
                return Err(config_error(format!(
                    "groups.paths entry '{}' has no parent group '{}'",
                    path, parent
                )));
            }
        }
    }
    Ok(())
}

fn config_error(message: impl Into<String>) -> anyhow::Error {
    anyhow!(ProjgenError::Config(message.into()))
}
