//! # Projgen Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout projgen. Every
//! operation returns `anyhow::Result`, and domain failures are raised as a
//! `ProjgenError` variant so callers (and tests) can tell them apart with
//! `downcast_ref`.
//!
//! ## Architecture
//!
//! - `ProjgenError`: a `thiserror` enum naming the failure domains
//!   (configuration, filesystem, scanning, templating, verification).
//! - `Result<T>`: an alias for `anyhow::Result<T>` so context can be attached
//!   with `.with_context(...)` at every filesystem boundary.
//!
//! ## Examples
//!
//! ```rust
//! if !root.is_dir() {
//!     anyhow::bail!(ProjgenError::FileSystem(format!(
//!         "Scan root is not a directory: {}",
//!         root.display()
//!     )));
//! }
//!
//! let text = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the projgen application.
#[derive(Error, Debug)]
pub enum ProjgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Failed to scan source tree: {source}")]
    Scan {
        #[from]
        source: walkdir::Error,
    },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Project document failed verification with {count} issue(s)")]
    Verify { count: usize },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = ProjgenError::Config("project.name must not be empty".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: project.name must not be empty"
        );

        let verify_err = ProjgenError::Verify { count: 3 };
        assert_eq!(
            verify_err.to_string(),
            "Project document failed verification with 3 issue(s)"
        );
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = ProjgenError::FileSystem("disk full".into()).into();
        let err = err.context("Failed to write project.pbxproj");
        assert!(matches!(
            err.downcast_ref::<ProjgenError>(),
            Some(ProjgenError::FileSystem(_))
        ));
    }
}
