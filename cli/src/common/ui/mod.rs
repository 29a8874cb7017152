//! # Projgen UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal presentation helpers. Log output goes through `tracing` to
//! stderr; the functions here build text destined for stdout.
//!
//! - **`tree`**: draws a list of relative paths as a `tree`-style listing,
//!   used by `projgen scan --tree`.
//!
pub mod tree;
