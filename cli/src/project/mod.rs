//! # Project Document Generation
//!
//! Everything needed to produce an Xcode `project.pbxproj`: identifier
//! allocation, the object model, build settings, value quoting, template
//! rendering and structural verification.
//!
pub mod ident;
pub mod model;
pub mod pbx;
pub mod render;
pub mod settings;
pub mod verify;
