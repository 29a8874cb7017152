//! # Project Model
//!
//! File: cli/src/project/model.rs
//!
//! ## Overview
//!
//! Builds the in-memory description of the project document from the
//! configuration and the scanner's file list. Every identifier is allocated
//! here, once, before anything is rendered; the template only looks them up.
//! As a result each object has exactly one key and every reference in the
//! document points at an object that is emitted.
//!
//! ## Architecture
//!
//! - Two native targets: the application and its unit-test bundle. Each
//!   owns a Sources, Frameworks and Resources build phase and a
//!   configuration list with Debug and Release configurations.
//! - The project owns its own configuration list (base settings only).
//! - Groups come from the configured static list or from the directories
//!   of discovered files (`GroupMode`). A file whose directory has no group
//!   is attached to the main group by its full relative path.
//! - The entry file always gets a file reference and a build file. Other
//!   files are compiled only when `sources.register_all` is set; files under
//!   `sources.test_dir` then go to the test target.
//!
use crate::common::fs::scan::SourceFile;
use crate::core::config::{Config, GroupMode};
use crate::project::ident::{IdGenerator, IdSource, Identifier};
use crate::project::settings::{self, BuildSetting, Variant};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

/// Fixed value of `buildActionMask` on every build phase.
pub const BUILD_ACTION_MASK: u32 = 2_147_483_647;

/// A reference to another object, with the comment shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildRef {
    pub id: Identifier,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildFile {
    pub id: Identifier,
    pub file_ref: Identifier,
    pub file_name: String,
    pub phase: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReference {
    pub id: Identifier,
    pub comment: String,
    pub explicit_file_type: Option<String>,
    pub last_known_file_type: Option<String>,
    pub name: Option<String>,
    pub path: String,
    pub source_tree: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: Identifier,
    pub comment: Option<String>,
    pub children: Vec<ChildRef>,
    pub name: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildPhase {
    pub id: Identifier,
    pub isa: &'static str,
    pub comment: &'static str,
    pub files: Vec<ChildRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetDependency {
    pub id: Identifier,
    pub proxy_id: Identifier,
    pub target: ChildRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildConfiguration {
    pub id: Identifier,
    pub name: &'static str,
    pub settings: Vec<BuildSetting>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationList {
    pub id: Identifier,
    pub owner_isa: &'static str,
    pub owner_name: String,
    pub configurations: Vec<BuildConfiguration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeTarget {
    pub id: Identifier,
    pub name: String,
    pub product: ChildRef,
    pub product_type: &'static str,
    pub configuration_list: Identifier,
    pub sources: BuildPhase,
    pub frameworks: BuildPhase,
    pub resources: BuildPhase,
    pub dependencies: Vec<TargetDependency>,
    /// Set on the test target: the application target it tests.
    pub test_target_id: Option<Identifier>,
}

/// Everything the document template needs.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectModel {
    pub name: String,
    pub project_id: Identifier,
    pub development_region: String,
    pub known_regions: Vec<String>,
    pub main_group: Group,
    pub products_group: Identifier,
    /// Every PBXGroup except the main group, parents before children.
    pub groups: Vec<Group>,
    pub file_references: Vec<FileReference>,
    pub build_files: Vec<BuildFile>,
    pub targets: Vec<NativeTarget>,
    /// Project list first, then one per target.
    pub configuration_lists: Vec<ConfigurationList>,
    pub build_action_mask: u32,
    /// Source files with a file reference but no build file.
    #[serde(skip)]
    pub unregistered: Vec<SourceFile>,
}

impl ProjectModel {
    /// Number of source files wired into a Sources build phase.
    pub fn registered_count(&self) -> usize {
        self.build_files.len()
    }
}

/// Builds the project model. All identifiers come from `ids`.
pub fn build_model<S: IdSource>(
    config: &Config,
    discovered: &[SourceFile],
    ids: &mut IdGenerator<S>,
) -> ProjectModel {
    let name = config.project.name.clone();
    let test_name = config.test_target_name();

    let project_id = ids.next_id();
    let main_group_id = ids.next_id();
    let products_group_id = ids.next_id();
    let frameworks_group_id = ids.next_id();
    let app_target_id = ids.next_id();
    let test_target_id = ids.next_id();
    let app_product_id = ids.next_id();
    let test_product_id = ids.next_id();

    // Entry file is always part of the project, found or not.
    let entry = SourceFile::new(config.entry_file().trim_start_matches("./"));
    let files: BTreeSet<SourceFile> = discovered
        .iter()
        .cloned()
        .chain(std::iter::once(entry.clone()))
        .collect();
    let file_ids: BTreeMap<&SourceFile, Identifier> =
        files.iter().map(|f| (f, ids.next_id())).collect();

    // --- Build files ---
    let mut app_sources = Vec::new();
    let mut test_sources = Vec::new();
    let mut build_files = Vec::new();
    let mut unregistered = Vec::new();
    for file in &files {
        let to_test = if *file == entry {
            false
        } else if config.sources.register_all {
            file.is_under(&config.sources.test_dir)
        } else {
            unregistered.push(file.clone());
            continue;
        };
        let build_file = BuildFile {
            id: ids.next_id(),
            file_ref: file_ids[file].clone(),
            file_name: file.file_name().to_string(),
            phase: "Sources",
        };
        let child = ChildRef {
            id: build_file.id.clone(),
            comment: format!("{} in Sources", build_file.file_name),
        };
        debug!(
            "Registering {} in {} Sources",
            file,
            if to_test { &test_name } else { &name }
        );
        if to_test {
            test_sources.push(child);
        } else {
            app_sources.push(child);
        }
        build_files.push(build_file);
    }

    // --- Groups ---
    let group_paths = match config.groups.mode {
        GroupMode::Static => config.groups.paths.clone(),
        GroupMode::Discovered => discovered_group_paths(files.iter()),
    };
    let group_ids: HashMap<&str, Identifier> = group_paths
        .iter()
        .map(|p| (p.as_str(), ids.next_id()))
        .collect();

    let mut file_references = vec![
        FileReference {
            id: app_product_id.clone(),
            comment: format!("{}.app", name),
            explicit_file_type: Some("wrapper.application".to_string()),
            last_known_file_type: None,
            name: None,
            path: format!("{}.app", name),
            source_tree: "BUILT_PRODUCTS_DIR",
        },
        FileReference {
            id: test_product_id.clone(),
            comment: format!("{}.xctest", test_name),
            explicit_file_type: Some("wrapper.cfbundle".to_string()),
            last_known_file_type: None,
            name: None,
            path: format!("{}.xctest", test_name),
            source_tree: "BUILT_PRODUCTS_DIR",
        },
    ];

    let mut group_children: HashMap<&str, Vec<ChildRef>> = HashMap::new();
    let mut main_children: Vec<ChildRef> = group_paths
        .iter()
        .filter(|p| !p.contains('/'))
        .map(|p| ChildRef {
            id: group_ids[p.as_str()].clone(),
            comment: p.clone(),
        })
        .collect();
    for path in &group_paths {
        if let Some((parent, leaf)) = path.rsplit_once('/') {
            group_children.entry(parent).or_default().push(ChildRef {
                id: group_ids[path.as_str()].clone(),
                comment: leaf.to_string(),
            });
        }
    }

    let file_type = last_known_file_type(config.extension());
    for file in &files {
        let id = file_ids[file].clone();
        let file_name = file.file_name().to_string();
        let child = ChildRef {
            id: id.clone(),
            comment: file_name.clone(),
        };
        let grouped = file.parent_dir().filter(|dir| group_ids.contains_key(dir));
        let (path, name_field) = match grouped {
            Some(dir) => {
                group_children.entry(dir).or_default().push(child);
                (file_name.clone(), None)
            }
            None => {
                main_children.push(child);
                let full = file.as_str().to_string();
                let name_field = (full != file_name).then(|| file_name.clone());
                (full, name_field)
            }
        };
        file_references.push(FileReference {
            id,
            comment: file_name,
            explicit_file_type: None,
            last_known_file_type: Some(file_type.clone()),
            name: name_field,
            path,
            source_tree: "<group>",
        });
    }

    main_children.push(ChildRef {
        id: products_group_id.clone(),
        comment: "Products".to_string(),
    });
    main_children.push(ChildRef {
        id: frameworks_group_id.clone(),
        comment: "Frameworks".to_string(),
    });

    let mut groups: Vec<Group> = group_paths
        .iter()
        .map(|path| {
            let leaf = path.rsplit('/').next().unwrap_or(path).to_string();
            Group {
                id: group_ids[path.as_str()].clone(),
                comment: Some(leaf.clone()),
                children: group_children.remove(path.as_str()).unwrap_or_default(),
                name: None,
                path: Some(leaf),
            }
        })
        .collect();
    groups.push(Group {
        id: products_group_id.clone(),
        comment: Some("Products".to_string()),
        children: vec![
            ChildRef {
                id: app_product_id.clone(),
                comment: format!("{}.app", name),
            },
            ChildRef {
                id: test_product_id.clone(),
                comment: format!("{}.xctest", test_name),
            },
        ],
        name: Some("Products".to_string()),
        path: None,
    });
    groups.push(Group {
        id: frameworks_group_id,
        comment: Some("Frameworks".to_string()),
        children: Vec::new(),
        name: Some("Frameworks".to_string()),
        path: None,
    });

    let main_group = Group {
        id: main_group_id,
        comment: None,
        children: main_children,
        name: None,
        path: None,
    };

    // --- Configuration lists ---
    let project_list = configuration_list(ids, "PBXProject", &name, |v| {
        settings::project_settings(v, config)
    });
    let app_list = configuration_list(ids, "PBXNativeTarget", &name, |v| {
        settings::app_target_settings(v, config)
    });
    let test_list = configuration_list(ids, "PBXNativeTarget", &test_name, |v| {
        settings::test_target_settings(v, config)
    });

    // --- Targets ---
    let app_target_ref = ChildRef {
        id: app_target_id.clone(),
        comment: name.clone(),
    };
    let app_target = NativeTarget {
        id: app_target_id.clone(),
        name: name.clone(),
        product: ChildRef {
            id: app_product_id,
            comment: format!("{}.app", name),
        },
        product_type: "com.apple.product-type.application",
        configuration_list: app_list.id.clone(),
        sources: build_phase(ids, "PBXSourcesBuildPhase", "Sources", app_sources),
        frameworks: build_phase(ids, "PBXFrameworksBuildPhase", "Frameworks", Vec::new()),
        resources: build_phase(ids, "PBXResourcesBuildPhase", "Resources", Vec::new()),
        dependencies: Vec::new(),
        test_target_id: None,
    };
    let test_target = NativeTarget {
        id: test_target_id,
        name: test_name.clone(),
        product: ChildRef {
            id: test_product_id,
            comment: format!("{}.xctest", test_name),
        },
        product_type: "com.apple.product-type.bundle.unit-test",
        configuration_list: test_list.id.clone(),
        sources: build_phase(ids, "PBXSourcesBuildPhase", "Sources", test_sources),
        frameworks: build_phase(ids, "PBXFrameworksBuildPhase", "Frameworks", Vec::new()),
        resources: build_phase(ids, "PBXResourcesBuildPhase", "Resources", Vec::new()),
        dependencies: vec![TargetDependency {
            id: ids.next_id(),
            proxy_id: ids.next_id(),
            target: app_target_ref,
        }],
        test_target_id: Some(app_target_id),
    };

    let development_region = config.project.development_region.clone();
    let mut known_regions = vec![development_region.clone()];
    if development_region != "Base" {
        known_regions.push("Base".to_string());
    }

    info!(
        "Built project model: {} file(s), {} group(s), {} build file(s), {} identifiers",
        files.len(),
        groups.len() + 1,
        build_files.len(),
        ids.issued()
    );

    ProjectModel {
        name,
        project_id,
        development_region,
        known_regions,
        main_group,
        products_group: products_group_id,
        groups,
        file_references,
        build_files,
        targets: vec![app_target, test_target],
        configuration_lists: vec![project_list, app_list, test_list],
        build_action_mask: BUILD_ACTION_MASK,
        unregistered,
    }
}

/// Every directory (and ancestor directory) that holds one of `files`.
fn discovered_group_paths<'a>(files: impl Iterator<Item = &'a SourceFile>) -> Vec<String> {
    let mut paths = BTreeSet::new();
    for file in files {
        let mut dir = file.parent_dir();
        while let Some(d) = dir {
            paths.insert(d.to_string());
            dir = d.rsplit_once('/').map(|(parent, _)| parent);
        }
    }
    paths.into_iter().collect()
}

fn last_known_file_type(extension: &str) -> String {
    match extension {
        "swift" => "sourcecode.swift",
        "m" => "sourcecode.c.objc",
        "mm" => "sourcecode.cpp.objcpp",
        "c" => "sourcecode.c.c",
        "cpp" | "cc" => "sourcecode.cpp.cpp",
        "h" => "sourcecode.c.h",
        "metal" => "sourcecode.metal",
        _ => "text",
    }
    .to_string()
}

fn build_phase<S: IdSource>(
    ids: &mut IdGenerator<S>,
    isa: &'static str,
    comment: &'static str,
    files: Vec<ChildRef>,
) -> BuildPhase {
    BuildPhase {
        id: ids.next_id(),
        isa,
        comment,
        files,
    }
}

fn configuration_list<S: IdSource>(
    ids: &mut IdGenerator<S>,
    owner_isa: &'static str,
    owner_name: &str,
    settings_for: impl Fn(Variant) -> Vec<BuildSetting>,
) -> ConfigurationList {
    let id = ids.next_id();
    let configurations = Variant::ALL
        .iter()
        .map(|&variant| BuildConfiguration {
            id: ids.next_id(),
            name: variant.name(),
            settings: settings_for(variant),
        })
        .collect();
    ConfigurationList {
        id,
        owner_isa,
        owner_name: owner_name.to_string(),
        configurations,
    }
}
