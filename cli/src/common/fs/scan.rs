//! # Projgen Source Scanner
//!
//! File: cli/src/common/fs/scan.rs
//!
//! ## Overview
//!
//! Walks the scan root and collects every file whose name ends in the
//! source extension. Directories that start with `.` (when `skip_hidden` is
//! set) or whose name is listed in `exclude_dirs` are pruned, so nothing
//! below them is visited.
//!
//! The result is sorted by its `/`-separated relative path, which makes the
//! list (and the order of objects in the generated document) reproducible
//! for an unchanged tree.
//!
//! Symbolic links are not followed. A linked directory is never descended
//! into, so link cycles cannot make the walk loop; a linked file is kept
//! when its target is a regular file.
//!
use crate::core::config::Config;
use crate::core::error::{ProjgenError, Result};
use anyhow::{anyhow, Context};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// A discovered source file, as a `/`-separated path relative to the scan root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceFile(String);

impl SourceFile {
    pub fn new(relative: impl Into<String>) -> Self {
        Self(relative.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Directory part of the path, or `None` for files directly in the root.
    pub fn parent_dir(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(dir, _)| dir)
    }

    /// Whether the file lives at or below the directory `dir`.
    pub fn is_under(&self, dir: &str) -> bool {
        let dir = dir.trim_matches('/');
        !dir.is_empty()
            && self
                .0
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scanner settings, usually taken from the `[scan]` table.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extension: String,
    pub exclude_dirs: Vec<String>,
    pub skip_hidden: bool,
}

impl ScanOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            extension: config.extension().to_string(),
            exclude_dirs: config.scan.exclude_dirs.clone(),
            skip_hidden: config.scan.skip_hidden,
        }
    }

    fn is_pruned_dir(&self, name: &str) -> bool {
        (self.skip_hidden && name.starts_with('.')) || self.exclude_dirs.iter().any(|d| d == name)
    }

    fn is_source_name(&self, name: &str) -> bool {
        name.ends_with(&format!(".{}", self.extension))
    }
}

/// Collects the sorted list of source files below `root`.
///
/// # Errors
///
/// Fails if `root` is missing or not a directory, or if any entry cannot be
/// read during the walk (for example, permission denied).
pub fn find_source_files(root: &Path, options: &ScanOptions) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        return Err(anyhow!(ProjgenError::FileSystem(format!(
            "Scan root is not a directory: {}",
            root.display()
        ))));
    }
    info!(
        "Scanning '{}' for *.{} files",
        root.display(),
        options.extension
    );

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, options));

    let mut files = Vec::new();
    for entry_result in walker {
        let entry = entry_result
            .map_err(|e| anyhow!(ProjgenError::Scan { source: e }))
            .with_context(|| format!("Failed to walk '{}'", root.display()))?;
        if !is_file_like(&entry) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !options.is_source_name(&name) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).with_context(|| {
            format!(
                "Could not determine relative path for '{}'",
                entry.path().display()
            )
        })?;
        let joined = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        debug!("Found source file: {}", joined);
        files.push(SourceFile::new(joined));
    }
    files.sort();
    info!("Discovered {} source file(s)", files.len());
    Ok(files)
}

fn keep_entry(entry: &DirEntry, options: &ScanOptions) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if options.is_pruned_dir(&name) {
        debug!("Skipping directory: {}", entry.path().display());
        return false;
    }
    true
}

fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
