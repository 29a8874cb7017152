//! # Projgen Scan Command
//!
//! File: cli/src/commands/scan.rs
//!
//! Implements `projgen scan`: runs only the source scanner and prints what it
//! found, either as a flat sorted list with a count or as a tree (`--tree`).
//! Useful for checking `exclude_dirs` and `skip_hidden` before generating.
//!
use crate::commands::RunContext;
use crate::common::fs::scan::{find_source_files, ScanOptions, SourceFile};
use crate::common::ui::tree::render_path_tree;
use crate::core::error::Result;
use clap::Parser;
use tracing::debug;

/// Arguments for `projgen scan`.
#[derive(Parser, Debug, Default)]
pub struct ScanArgs {
    /// Print the files as a directory tree instead of a list.
    #[arg(long)]
    pub tree: bool,
}

/// Handles `projgen scan`.
pub fn handle_scan(args: ScanArgs, ctx: &RunContext) -> Result<()> {
    let config = ctx.load_config()?;
    let options = ScanOptions::from_config(&config);
    let files = find_source_files(&ctx.root, &options)?;
    debug!("Printing {} file(s), tree = {}", files.len(), args.tree);

    if args.tree {
        let label = ctx
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ctx.root.display().to_string());
        print!("{}", render_path_tree(&files, &label)?);
    } else {
        print!("{}", format_listing(&files));
    }
    println!("{} source file(s) found.", files.len());
    Ok(())
}

fn format_listing(files: &[SourceFile]) -> String {
    files.iter().map(|f| format!("{}\n", f)).collect()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_listing() {
        let files = vec![
            SourceFile::new("Core/AppState.swift"),
            SourceFile::new("FinoraApp.swift"),
        ];
        assert_eq!(
            format_listing(&files),
            "Core/AppState.swift\nFinoraApp.swift\n"
        );
        assert_eq!(format_listing(&[]), "");
    }
}
