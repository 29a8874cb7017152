//! # Projgen Verify Command
//!
//! File: cli/src/commands/verify.rs
//!
//! Implements `projgen verify [FILE]`: reads an existing `project.pbxproj`
//! (by default the one `generate` would write for this root), runs the
//! structural checks and prints a report. Any issue makes the command fail.
//!
use crate::commands::generate::DOCUMENT_NAME;
use crate::commands::{display_path, RunContext};
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{ProjgenError, Result};
use crate::project::verify::{check_document, VerifyReport};
use anyhow::anyhow;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for `projgen verify`.
#[derive(Parser, Debug, Default)]
pub struct VerifyArgs {
    /// Document to check. Defaults to `<root>/<Name>.xcodeproj/project.pbxproj`.
    pub file: Option<PathBuf>,
}

/// Handles `projgen verify`.
pub fn handle_verify(args: VerifyArgs, ctx: &RunContext) -> Result<()> {
    let path = match args.file {
        Some(file) => file,
        None => {
            let config = ctx.load_config()?;
            ctx.project_dir(&config).join(DOCUMENT_NAME)
        }
    };
    info!("Verifying {}", path.display());

    let text = read_file_to_string(&path)?;
    let report = check_document(&text);
    print!("{}", format_report(&display_path(&path), &report));

    if report.is_ok() {
        Ok(())
    } else {
        warn!("{} failed verification", path.display());
        Err(anyhow!(ProjgenError::Verify {
            count: report.issues.len()
        }))
    }
}

fn format_report(label: &str, report: &VerifyReport) -> String {
    let mut out = String::new();
    if report.is_ok() {
        out.push_str(&format!("✅ {} is consistent\n", label));
    } else {
        out.push_str(&format!("❌ {}\n", label));
        for issue in &report.issues {
            out.push_str(&format!("   - {}\n", issue));
        }
    }
    out.push_str(&format!(
        "   {} object(s), {} section(s), {} reference(s)\n",
        report.objects, report.sections, report.references
    ));
    out
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report_ok() {
        let report = VerifyReport {
            objects: 3,
            sections: 2,
            references: 5,
            issues: vec![],
        };
        assert_eq!(
            format_report("p.pbxproj", &report),
            "✅ p.pbxproj is consistent\n   3 object(s), 2 section(s), 5 reference(s)\n"
        );
    }

    #[test]
    fn test_format_report_lists_issues() {
        let report = VerifyReport {
            issues: vec!["Document has no rootObject".to_string()],
            ..Default::default()
        };
        let text = format_report("p.pbxproj", &report);
        assert!(text.starts_with("❌ p.pbxproj\n"));
        assert!(text.contains("   - Document has no rootObject\n"));
    }
}
