//! # Projgen Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! configuration, error types, and template rendering.
//!
//! ## Architecture
//!
//! - `config`: layered loading, merging and validation of `.projgen.toml`
//! - `error`: the `ProjgenError` enum and the crate-wide `Result` alias
//! - `templating`: a Tera wrapper with the property-list quoting filter
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ProjgenError, Result}; // For error handling
//! use crate::core::templating; // For rendering the project document
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
