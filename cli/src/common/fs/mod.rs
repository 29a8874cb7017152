//! # Projgen Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Groups the filesystem-facing code of the generator:
//!
//! - **`scan`**: walks the scan root and returns the sorted list of source
//!   files, pruning hidden and reserved build-output directories.
//! - **`io`**: creates the project bundle directory, writes the document
//!   through a scoped file handle, and reads documents back for `verify`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{io, scan};
//!
//! let files = scan::find_source_files(&root, &scan::ScanOptions::from_config(&cfg))?;
//! io::ensure_dir_exists(&bundle_dir)?;
//! io::write_document(&bundle_dir.join("project.pbxproj"), &text)?;
//! ```
//!
pub mod io;
pub mod scan;
