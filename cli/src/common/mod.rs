//! # Projgen Common Utilities
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by the command handlers:
//!
//! - `fs`: source scanning and document I/O.
//! - `ui`: terminal rendering helpers (the discovered-file tree).
//!
/// Utilities for filesystem operations (scanning, reading, writing).
pub mod fs;
/// Utilities for terminal output.
pub mod ui;
