//! # Projgen Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! The generator touches the filesystem for output in exactly two ways: it
//! creates the `<Name>.xcodeproj` bundle directory and writes one
//! `project.pbxproj` file into it. The `verify` command reads that file
//! back. This module wraps those operations with context-rich errors.
//!
//! - **`ensure_dir_exists`**: creates a directory (and parents) or confirms
//!   an existing path is a directory.
//! - **`write_document`**: writes text through a buffered file handle that
//!   is flushed and synced before the handle is dropped. An existing file is
//!   truncated and replaced.
//! - **`read_file_to_string`**: reads a whole file with path context.
//!
use crate::core::error::{ProjgenError, Result};
use anyhow::Context;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating it and
/// any missing parents if needed.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if
/// creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        info!("Created directory: {}", path.display());
    } else if !path.is_dir() {
        anyhow::bail!(ProjgenError::FileSystem(format!(
            "Path exists but is not a directory: {}",
            path.display()
        )));
    } else {
        debug!("Directory already exists: {}", path.display());
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Writes `content` to `path`, replacing any previous file.
///
/// The parent directory must already exist; callers create the project
/// bundle directory explicitly so that failure is reported on its own.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    writer
        .get_ref()
        .sync_all()
        .with_context(|| format!("Failed to sync {}", path.display()))?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_nested() -> Result<()> {
        let base_dir = tempdir()?;
        let bundle = base_dir.path().join("nested/Finora.xcodeproj");
        assert!(!bundle.exists());
        ensure_dir_exists(&bundle)?;
        assert!(bundle.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&bundle)?;
        assert!(bundle.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("Finora.xcodeproj");
        fs::write(&file_path, "not a bundle")?;
        let err = ensure_dir_exists(&file_path).unwrap_err();
        assert!(err.to_string().contains("Path exists but is not a directory"));
        assert!(matches!(
            err.downcast_ref::<ProjgenError>(),
            Some(ProjgenError::FileSystem(_))
        ));
        Ok(())
    }

    #[test]
    fn test_write_document_overwrites() -> Result<()> {
        let base_dir = tempdir()?;
        let path = base_dir.path().join("project.pbxproj");
        write_document(&path, "first version, longer text")?;
        write_document(&path, "second")?;
        assert_eq!(read_file_to_string(&path)?, "second");
        Ok(())
    }

    #[test]
    fn test_write_document_missing_parent() -> Result<()> {
        let base_dir = tempdir()?;
        let path = base_dir.path().join("missing/project.pbxproj");
        let err = write_document(&path, "x").unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
        Ok(())
    }

    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let err = read_file_to_string(&base_dir.path().join("absent")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
        Ok(())
    }
}
