//! # Projgen Generate Command
//!
//! File: cli/src/commands/generate.rs
//!
//! ## Overview
//!
//! Implements `projgen generate`, the default command. It runs the whole
//! pipeline for one scan root:
//!
//! 1. Load the layered configuration and apply command-line overrides.
//! 2. Scan the root for source files.
//! 3. Build the project model, allocating every identifier up front.
//! 4. Render `project.pbxproj` from the template.
//! 5. Verify the rendered text; a document that fails is never written.
//! 6. Create `<root>/<Name>.xcodeproj/` and write the document, or print it
//!    to stdout with `--stdout`.
//!
//! Each run draws fresh identifiers, so rerunning on an unchanged tree
//! overwrites the previous file with a structurally identical one whose
//! identifiers differ.
//!
use crate::commands::{display_path, RunContext};
use crate::common::fs::io::{ensure_dir_exists, write_document};
use crate::common::fs::scan::{find_source_files, ScanOptions, SourceFile};
use crate::core::config::{validate_config, Config, GroupMode};
use crate::core::error::{ProjgenError, Result};
use crate::project::ident::IdGenerator;
use crate::project::model::{build_model, ProjectModel};
use crate::project::render::render_project;
use crate::project::verify::check_document;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// File name of the document inside the `.xcodeproj` bundle.
pub const DOCUMENT_NAME: &str = "project.pbxproj";

/// Arguments for `projgen generate`.
#[derive(Parser, Debug, Default)]
pub struct GenerateArgs {
    /// Project and application target name (overrides `project.name`).
    #[arg(long)]
    pub name: Option<String>,

    /// Compile every discovered source file, not only the entry file.
    /// Files under the test directory go to the test target.
    #[arg(long)]
    pub all_sources: bool,

    /// How the group hierarchy is built.
    #[arg(long, value_enum)]
    pub groups: Option<GroupMode>,

    /// Print the document to stdout instead of writing it.
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateArgs {
    /// Applies the command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(name) = &self.name {
            config.project.name = name.clone();
        }
        if self.all_sources {
            config.sources.register_all = true;
        }
        if let Some(mode) = self.groups {
            config.groups.mode = mode;
        }
    }
}

/// A rendered and verified project document.
#[derive(Debug)]
pub struct GeneratedProject {
    pub model: ProjectModel,
    pub discovered: Vec<SourceFile>,
    pub document: String,
}

/// Handles `projgen generate`.
pub fn handle_generate(args: GenerateArgs, ctx: &RunContext) -> Result<()> {
    info!("Generating project for {}", ctx.root.display());

    let mut config = ctx.load_config()?;
    args.apply(&mut config);
    validate_config(&config).context("Invalid command-line override")?;

    let generated = generate_project(&ctx.root, &config)?;

    if args.stdout {
        print!("{}", generated.document);
        return Ok(());
    }

    let project_dir = ctx.project_dir(&config);
    let document_path = write_project(&project_dir, &generated.document)?;
    info!("Wrote {}", document_path.display());

    println!("✅ Created {}", display_path(&project_dir));
    print_advisory(&config, &generated);
    Ok(())
}

/// Scans `root` and produces the verified document text for `config`.
pub fn generate_project(root: &Path, config: &Config) -> Result<GeneratedProject> {
    let discovered = find_source_files(root, &ScanOptions::from_config(config))?;
    let model = build_model(config, &discovered, &mut IdGenerator::random());
    let document = render_project(&model)?;

    let report = check_document(&document);
    if !report.is_ok() {
        for issue in &report.issues {
            error!("{}", issue);
        }
        return Err(anyhow!(ProjgenError::Verify {
            count: report.issues.len()
        }))
        .context("Refusing to write an inconsistent project document");
    }
    info!(
        "Document verified: {} objects, {} sections",
        report.objects, report.sections
    );

    Ok(GeneratedProject {
        model,
        discovered,
        document,
    })
}

/// Creates the bundle directory and writes the document into it.
pub fn write_project(project_dir: &Path, document: &str) -> Result<PathBuf> {
    ensure_dir_exists(project_dir)
        .with_context(|| format!("Failed to prepare {}", project_dir.display()))?;
    let document_path = project_dir.join(DOCUMENT_NAME);
    write_document(&document_path, document)?;
    Ok(document_path)
}

fn print_advisory(config: &Config, generated: &GeneratedProject) {
    let skipped = generated.model.unregistered.len();
    if skipped > 0 {
        warn!("{} discovered file(s) have no build phase entry", skipped);
    }
    for line in advisory_lines(config, generated) {
        println!("{}", line);
    }
}

/// The note printed after `✅ Created`.
fn advisory_lines(config: &Config, generated: &GeneratedProject) -> Vec<String> {
    let model = &generated.model;
    let found = generated.discovered.len();
    if config.sources.register_all {
        return vec![format!(
            "   Registered {} source file(s) in Sources build phases ({} discovered).",
            model.registered_count(),
            found
        )];
    }
    vec![
        "⚠️  Note: This is a basic project structure.".to_string(),
        format!(
            "   Only {} is compiled; {} of {} discovered source file(s) are listed but not built.",
            config.entry_file(),
            model.unregistered.len(),
            found
        ),
        "   Open it in Xcode and add the remaining files to the target, or rerun with --all-sources,"
            .to_string(),
        "   or install XcodeGen and run: xcodegen generate".to_string(),
    ]
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "// swift\n").unwrap();
    }

    fn without_ids(document: &str) -> String {
        Regex::new(r"\b[0-9A-F]{24}\b")
            .unwrap()
            .replace_all(document, "<ID>")
            .into_owned()
    }

    #[test]
    fn test_empty_tree_still_produces_document() -> Result<()> {
        let root = tempdir()?;
        let generated = generate_project(root.path(), &Config::default())?;
        assert!(generated.discovered.is_empty());
        assert_eq!(generated.document.matches("rootObject = ").count(), 1);

        let project_dir = root.path().join("Finora.xcodeproj");
        let path = write_project(&project_dir, &generated.document)?;
        assert_eq!(path, project_dir.join("project.pbxproj"));
        assert!(!fs::read_to_string(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_nested_sources_are_discovered() -> Result<()> {
        let root = tempdir()?;
        touch(root.path(), "Sources/Nested/Helper.swift");
        touch(root.path(), "Sources/Main.swift");
        let generated = generate_project(root.path(), &Config::default())?;
        let names: Vec<&str> = generated.discovered.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, vec!["Sources/Main.swift", "Sources/Nested/Helper.swift"]);
        assert!(generated.document.contains("path = Sources/Main.swift;"));
        assert!(generated.document.contains("path = Sources/Nested/Helper.swift;"));
        Ok(())
    }

    #[test]
    fn test_two_runs_share_structure_not_ids() -> Result<()> {
        let root = tempdir()?;
        touch(root.path(), "FinoraApp.swift");
        touch(root.path(), "Core/AppState.swift");
        let first = generate_project(root.path(), &Config::default())?;
        let second = generate_project(root.path(), &Config::default())?;
        assert_ne!(first.document, second.document);
        assert_eq!(without_ids(&first.document), without_ids(&second.document));
        Ok(())
    }

    #[test]
    fn test_identifier_shaped_directory_is_not_a_reference() -> Result<()> {
        let root = tempdir()?;
        touch(root.path(), "ABCDEF0123456789ABCDEF01/Thing.swift");
        let mut config = Config::default();
        config.groups.mode = GroupMode::Discovered;
        let generated = generate_project(root.path(), &config)?;
        assert!(generated
            .document
            .contains("path = \"ABCDEF0123456789ABCDEF01\";"));
        assert!(check_document(&generated.document).is_ok());
        Ok(())
    }

    #[test]
    fn test_advisory_mentions_counts_and_xcodegen() -> Result<()> {
        let root = tempdir()?;
        touch(root.path(), "FinoraApp.swift");
        touch(root.path(), "Models/User.swift");
        touch(root.path(), "Views/Home.swift");

        let config = Config::default();
        let generated = generate_project(root.path(), &config)?;
        let lines = advisory_lines(&config, &generated);
        assert_eq!(lines[0], "⚠️  Note: This is a basic project structure.");
        assert!(lines[1].contains("Only FinoraApp.swift is compiled; 2 of 3 discovered"));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("   or install XcodeGen and run: xcodegen generate")
        );

        let mut config = Config::default();
        config.sources.register_all = true;
        let generated = generate_project(root.path(), &config)?;
        let lines = advisory_lines(&config, &generated);
        assert_eq!(
            lines,
            vec!["   Registered 3 source file(s) in Sources build phases (3 discovered).".to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let args = GenerateArgs {
            name: Some("Ledger".to_string()),
            all_sources: true,
            groups: Some(GroupMode::Discovered),
            stdout: false,
        };
        args.apply(&mut config);
        assert_eq!(config.project.name, "Ledger");
        assert_eq!(config.entry_file(), "LedgerApp.swift");
        assert!(config.sources.register_all);
        assert_eq!(config.groups.mode, GroupMode::Discovered);
    }

    #[test]
    fn test_write_fails_when_bundle_path_is_a_file() -> Result<()> {
        let root = tempdir()?;
        let blocker = root.path().join("Finora.xcodeproj");
        fs::write(&blocker, "not a directory")?;
        let err = write_project(&blocker, "text").unwrap_err();
        assert!(err
            .chain()
            .any(|cause| cause.to_string().contains("not a directory")));
        Ok(())
    }
}
