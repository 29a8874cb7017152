//! # Projgen Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Thin wrapper around the Tera templating engine. The project document is a
//! single template rendered from a serialized model, so this module only
//! needs to compile one raw template, register the caller's filters and
//! render it.
//!
//! Autoescaping is always off: the output is a property list, not HTML, and
//! quoting is the job of the filters the caller registers.
//!
use crate::core::error::{ProjgenError, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Tera, Value};
use tracing::debug;

/// Signature of a Tera filter function.
pub type FilterFn = fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>;

/// Renders `source` as the template `name` against the serialized `context`.
///
/// Each `(name, function)` pair in `filters` is registered before rendering.
pub fn render_template<C: Serialize>(
    name: &str,
    source: &str,
    context: &C,
    filters: &[(&str, FilterFn)],
) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    for (filter_name, filter) in filters {
        tera.register_filter(filter_name, *filter);
    }
    tera.add_raw_template(name, source).map_err(|e| {
        anyhow!(ProjgenError::Template { source: e })
            .context(format!("Failed to compile template '{}'", name))
    })?;

    let tera_context = tera::Context::from_serialize(context).map_err(|e| {
        anyhow!(ProjgenError::Template { source: e })
            .context("Failed to create Tera context from project model")
    })?;

    let rendered = tera.render(name, &tera_context).map_err(|e| {
        anyhow!(ProjgenError::Template { source: e })
            .context(format!("Tera rendering failed for template '{}'", name))
    })?;
    debug!("Rendered template '{}' ({} bytes)", name, rendered.len());
    Ok(rendered)
}
