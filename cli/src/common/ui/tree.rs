//! # Projgen Path Tree Printer
//!
//! File: cli/src/common/ui/tree.rs
//!
//! ## Overview
//!
//! Renders a set of `/`-separated relative paths as a directory tree in the
//! style of the `tree` utility. The input is the scanner's result rather than
//! the live filesystem, so the picture shows exactly what the generator will
//! see (hidden and excluded directories are already gone).
//!
//! Example output:
//!
//! ```text
//! Finora/
//! ├── Core/
//! │   ├── Network/
//! │   │   └── APIClient.swift
//! │   └── AppState.swift
//! └── FinoraApp.swift
//! ```
//!
use crate::common::fs::scan::SourceFile;
use crate::core::error::Result;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

// --- Constants for Tree Drawing ---

/// Connector for intermediate items in a listing.
const TEE: &str = "├── ";
/// Connector for the last item in a listing.
const ELBOW: &str = "└── ";
/// Vertical line used for ongoing indentation levels.
const PIPE: &str = "│   ";
/// Spacer used for indentation levels after the last item has been printed.
const SPACER: &str = "    ";
/// ANSI escape code to start bold text formatting (for directories).
pub const BOLD_START: &str = "\x1b[1m";
/// ANSI escape code to reset text formatting.
pub const BOLD_END: &str = "\x1b[0m";

/// One directory level of the tree. `BTreeMap` keeps names sorted.
#[derive(Default)]
struct Node {
    dirs: BTreeMap<String, Node>,
    files: Vec<String>,
}

impl Node {
    fn insert(&mut self, path: &str) {
        match path.split_once('/') {
            Some((dir, rest)) => self.dirs.entry(dir.to_string()).or_default().insert(rest),
            None => self.files.push(path.to_string()),
        }
    }
}

/// Builds the tree text for `files` under a root labelled `display_name`.
///
/// Directories are listed before files at every level, each group sorted by
/// name. Directory names are bold.
pub fn render_path_tree(files: &[SourceFile], display_name: &str) -> Result<String> {
    let mut root = Node::default();
    for file in files {
        root.insert(file.as_str());
    }
    sort_files(&mut root);

    let mut output = String::new();
    writeln!(output, "{}{}/{}", BOLD_START, display_name, BOLD_END)?;
    write_level(&root, &mut String::new(), &mut output)?;
    Ok(output)
}

fn sort_files(node: &mut Node) {
    node.files.sort();
    for child in node.dirs.values_mut() {
        sort_files(child);
    }
}

fn write_level(node: &Node, prefix: &mut String, output: &mut String) -> Result<()> {
    let total = node.dirs.len() + node.files.len();
    let mut index = 0;

    for (name, child) in &node.dirs {
        index += 1;
        let is_last = index == total;
        let connector = if is_last { ELBOW } else { TEE };
        writeln!(output, "{}{}{}{}/{}", prefix, connector, BOLD_START, name, BOLD_END)?;

        let component = if is_last { SPACER } else { PIPE };
        prefix.push_str(component);
        write_level(child, prefix, output)?;
        prefix.truncate(prefix.len() - component.len());
    }

    for name in &node.files {
        index += 1;
        let connector = if index == total { ELBOW } else { TEE };
        writeln!(output, "{}{}{}", prefix, connector, name)?;
    }
    Ok(())
}
