//! # Project Document Rendering
//!
//! File: cli/src/project/render.rs
//!
//! Turns a `ProjectModel` into the text of `project.pbxproj`. The layout
//! lives in `templates/project.pbxproj.tera`, compiled into the binary.
//! Scalars go through the `pbx` filter so quoting is decided in one place.
//!
use crate::core::error::Result;
use crate::core::templating::{render_template, FilterFn};
use crate::project::model::ProjectModel;
use crate::project::pbx::pbx_filter;

const TEMPLATE_NAME: &str = "project.pbxproj";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/project.pbxproj.tera");

/// Renders the complete project document for `model`.
pub fn render_project(model: &ProjectModel) -> Result<String> {
    let filters: [(&str, FilterFn); 1] = [("pbx", pbx_filter)];
    render_template(TEMPLATE_NAME, TEMPLATE_SOURCE, model, &filters)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fs::scan::SourceFile;
    use crate::core::config::Config;
    use crate::project::ident::IdGenerator;
    use crate::project::model::build_model;

    fn render(config: &Config, paths: &[&str]) -> Result<(ProjectModel, String)> {
        let files: Vec<SourceFile> = paths.iter().map(|p| SourceFile::new(*p)).collect();
        let model = build_model(config, &files, &mut IdGenerator::random());
        let text = render_project(&model)?;
        Ok((model, text))
    }

    fn count(text: &str, needle: &str) -> usize {
        text.matches(needle).count()
    }

    #[test]
    fn test_document_frame() -> Result<()> {
        let (model, text) = render(&Config::default(), &[])?;
        assert!(text.starts_with("// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n"));
        assert!(text.contains("\tobjectVersion = 56;\n"));
        assert!(text.trim_end().ends_with(&format!(
            "\trootObject = {} /* Project object */;\n}}",
            model.project_id
        )));
        Ok(())
    }

    #[test]
    fn test_sections_in_order() -> Result<()> {
        let (_, text) = render(&Config::default(), &["FinoraApp.swift"])?;
        let sections = [
            "PBXBuildFile",
            "PBXContainerItemProxy",
            "PBXFileReference",
            "PBXFrameworksBuildPhase",
            "PBXGroup",
            "PBXNativeTarget",
            "PBXProject",
            "PBXResourcesBuildPhase",
            "PBXSourcesBuildPhase",
            "PBXTargetDependency",
            "XCBuildConfiguration",
            "XCConfigurationList",
        ];
        let mut last = 0;
        for section in sections {
            let begin = format!("/* Begin {} section */", section);
            let end = format!("/* End {} section */", section);
            let start = text.find(&begin).unwrap_or_else(|| panic!("{} missing", begin));
            assert!(start >= last, "{} out of order", section);
            last = text.find(&end).unwrap_or_else(|| panic!("{} missing", end));
        }
        Ok(())
    }

    #[test]
    fn test_object_counts() -> Result<()> {
        let (_, text) = render(&Config::default(), &["FinoraApp.swift", "Models/User.swift"])?;
        assert_eq!(count(&text, "isa = PBXBuildFile;"), 1);
        // Two products and two sources.
        assert_eq!(count(&text, "isa = PBXFileReference;"), 4);
        assert_eq!(count(&text, "isa = PBXNativeTarget;"), 2);
        assert_eq!(count(&text, "isa = PBXProject;"), 1);
        assert_eq!(count(&text, "isa = XCBuildConfiguration;"), 6);
        assert_eq!(count(&text, "isa = XCConfigurationList;"), 3);
        assert_eq!(count(&text, "isa = PBXSourcesBuildPhase;"), 2);
        assert_eq!(count(&text, "isa = PBXContainerItemProxy;"), 1);
        assert_eq!(count(&text, "isa = PBXTargetDependency;"), 1);
        // Main group, 25 static groups, Products and Frameworks.
        assert_eq!(count(&text, "isa = PBXGroup;"), 28);
        Ok(())
    }

    #[test]
    fn test_build_file_line() -> Result<()> {
        let (model, text) = render(&Config::default(), &["FinoraApp.swift"])?;
        let build = &model.build_files[0];
        let line = format!(
            "\t\t{} /* FinoraApp.swift in Sources */ = {{isa = PBXBuildFile; fileRef = {} /* FinoraApp.swift */; }};\n",
            build.id, build.file_ref
        );
        assert!(text.contains(&line), "missing line:\n{}", line);
        let file_ref = format!(
            "\t\t{} /* FinoraApp.swift */ = {{isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = FinoraApp.swift; sourceTree = \"<group>\"; }};\n",
            build.file_ref
        );
        assert!(text.contains(&file_ref), "missing line:\n{}", file_ref);
        Ok(())
    }

    #[test]
    fn test_settings_rendering() -> Result<()> {
        let (_, text) = render(&Config::default(), &[])?;
        assert!(text.contains("\t\t\t\tCLANG_CXX_LANGUAGE_STANDARD = \"gnu++20\";\n"));
        assert!(text.contains("\t\t\t\tIPHONEOS_DEPLOYMENT_TARGET = 16.0;\n"));
        assert!(text.contains(
            "\t\t\t\tGCC_PREPROCESSOR_DEFINITIONS = (\n\t\t\t\t\t\"DEBUG=1\",\n\t\t\t\t\t\"$(inherited)\",\n\t\t\t\t);\n"
        ));
        assert!(text.contains("PRODUCT_BUNDLE_IDENTIFIER = com.finora.Finora;"));
        assert!(text.contains("PRODUCT_BUNDLE_IDENTIFIER = com.finora.FinoraTests;"));
        Ok(())
    }

    #[test]
    fn test_empty_lists_and_no_blank_lines() -> Result<()> {
        let (_, text) = render(&Config::default(), &[])?;
        assert!(text.contains("\t\t\tbuildRules = (\n\t\t\t);\n"));
        let objects = &text[text.find("objects = {").unwrap_or(0)..];
        for pair in objects.split("\n\n").skip(1) {
            // Blank lines only separate sections.
            assert!(pair.starts_with("/* Begin ") || pair.starts_with("\t};"), "{}", pair);
        }
        Ok(())
    }

    #[test]
    fn test_names_are_quoted_when_needed() -> Result<()> {
        let (_, text) = render(&Config::default(), &["Odd Dir/My File.swift"])?;
        assert!(text.contains("name = \"My File.swift\"; path = \"Odd Dir/My File.swift\";"));
        Ok(())
    }
}
