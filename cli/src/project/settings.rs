//! # Build Settings Tables
//!
//! File: cli/src/project/settings.rs
//!
//! Literal toolchain settings written into the XCBuildConfiguration objects.
//! The base tables are the project-wide Debug and Release settings; target
//! tables add what the application and unit-test bundles need on top. The
//! values are consumed as-is by Xcode and must not be reinterpreted.
//!
use crate::core::config::Config;
use serde::Serialize;
use std::collections::BTreeMap;

/// Debug or Release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Debug,
    Release,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Debug, Variant::Release];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Debug => "Debug",
            Variant::Release => "Release",
        }
    }
}

/// A setting value: a scalar or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingValue {
    Text(String),
    List(Vec<String>),
}

/// One `KEY = value;` line of a build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSetting {
    pub key: String,
    #[serde(flatten)]
    pub value: SettingValue,
}

enum Lit {
    S(&'static str),
    L(&'static [&'static str]),
}

use Lit::{L, S};

const YES: Lit = S("YES");
const NO: Lit = S("NO");

const DEPLOYMENT_TARGET_KEY: &str = "IPHONEOS_DEPLOYMENT_TARGET";

const BASE_COMMON: &[(&str, Lit)] = &[
    ("ALWAYS_SEARCH_USER_PATHS", NO),
    ("ASSETCATALOG_COMPILER_GENERATE_SWIFT_ASSET_SYMBOL_EXTENSIONS", YES),
    ("CLANG_ANALYZER_NONNULL", YES),
    ("CLANG_ANALYZER_NUMBER_OBJECT_CONVERSION", S("YES_AGGRESSIVE")),
    ("CLANG_CXX_LANGUAGE_STANDARD", S("gnu++20")),
    ("CLANG_ENABLE_MODULES", YES),
    ("CLANG_ENABLE_OBJC_ARC", YES),
    ("CLANG_ENABLE_OBJC_WEAK", YES),
    ("CLANG_WARN_BLOCK_CAPTURE_AUTORELEASING", YES),
    ("CLANG_WARN_BOOL_CONVERSION", YES),
    ("CLANG_WARN_COMMA", YES),
    ("CLANG_WARN_CONSTANT_CONVERSION", YES),
    ("CLANG_WARN_DEPRECATED_OBJC_IMPLEMENTATIONS", YES),
    ("CLANG_WARN_DIRECT_OBJC_ISA_USAGE", S("YES_ERROR")),
    ("CLANG_WARN_DOCUMENTATION_COMMENTS", YES),
    ("CLANG_WARN_EMPTY_BODY", YES),
    ("CLANG_WARN_ENUM_CONVERSION", YES),
    ("CLANG_WARN_INFINITE_RECURSION", YES),
    ("CLANG_WARN_INT_CONVERSION", YES),
    ("CLANG_WARN_NON_LITERAL_NULL_CONVERSION", YES),
    ("CLANG_WARN_OBJC_IMPLICIT_RETAIN_SELF", YES),
    ("CLANG_WARN_OBJC_LITERAL_CONVERSION", YES),
    ("CLANG_WARN_OBJC_ROOT_CLASS", S("YES_ERROR")),
    ("CLANG_WARN_QUOTED_INCLUDE_IN_FRAMEWORK_HEADER", YES),
    ("CLANG_WARN_RANGE_LOOP_ANALYSIS", YES),
    ("CLANG_WARN_STRICT_PROTOTYPES", YES),
    ("CLANG_WARN_SUSPICIOUS_MOVE", YES),
    ("CLANG_WARN_UNGUARDED_AVAILABILITY", S("YES_AGGRESSIVE")),
    ("CLANG_WARN_UNREACHABLE_CODE", YES),
    ("CLANG_WARN__DUPLICATE_METHOD_MATCH", YES),
    ("COPY_PHASE_STRIP", NO),
    ("ENABLE_STRICT_OBJC_MSGSEND", YES),
    ("ENABLE_USER_SCRIPT_SANDBOXING", YES),
    ("GCC_C_LANGUAGE_STANDARD", S("gnu17")),
    ("GCC_NO_COMMON_BLOCKS", YES),
    ("GCC_WARN_64_TO_32_BIT_CONVERSION", YES),
    ("GCC_WARN_ABOUT_RETURN_TYPE", S("YES_ERROR")),
    ("GCC_WARN_UNDECLARED_SELECTOR", YES),
    ("GCC_WARN_UNINITIALIZED_AUTOS", S("YES_AGGRESSIVE")),
    ("GCC_WARN_UNUSED_FUNCTION", YES),
    ("GCC_WARN_UNUSED_VARIABLE", YES),
    (DEPLOYMENT_TARGET_KEY, S("16.0")),
    ("LOCALIZATION_PREFERS_STRING_CATALOGS", YES),
    ("MTL_FAST_MATH", YES),
    ("SDKROOT", S("iphoneos")),
];

const BASE_DEBUG: &[(&str, Lit)] = &[
    ("DEBUG_INFORMATION_FORMAT", S("dwarf")),
    ("ENABLE_TESTABILITY", YES),
    ("GCC_DYNAMIC_NO_PIC", NO),
    ("GCC_OPTIMIZATION_LEVEL", S("0")),
    ("GCC_PREPROCESSOR_DEFINITIONS", L(&["DEBUG=1", "$(inherited)"])),
    ("MTL_ENABLE_DEBUG_INFO", S("INCLUDE_SOURCE")),
    ("ONLY_ACTIVE_ARCH", YES),
    ("SWIFT_ACTIVE_COMPILATION_CONDITIONS", S("DEBUG $(inherited)")),
    ("SWIFT_OPTIMIZATION_LEVEL", S("-Onone")),
];

const BASE_RELEASE: &[(&str, Lit)] = &[
    ("DEBUG_INFORMATION_FORMAT", S("dwarf-with-dsym")),
    ("ENABLE_NS_ASSERTIONS", NO),
    ("MTL_ENABLE_DEBUG_INFO", NO),
    ("SWIFT_COMPILATION_MODE", S("wholemodule")),
    ("VALIDATE_PRODUCT", YES),
];

const APP_TARGET: &[(&str, Lit)] = &[
    ("ASSETCATALOG_COMPILER_APPICON_NAME", S("AppIcon")),
    ("ASSETCATALOG_COMPILER_GLOBAL_ACCENT_COLOR_NAME", S("AccentColor")),
    ("CODE_SIGN_STYLE", S("Automatic")),
    ("CURRENT_PROJECT_VERSION", S("1")),
    ("ENABLE_PREVIEWS", YES),
    ("GENERATE_INFOPLIST_FILE", YES),
    ("INFOPLIST_KEY_UIApplicationSceneManifest_Generation", YES),
    ("INFOPLIST_KEY_UIApplicationSupportsIndirectInputEvents", YES),
    ("INFOPLIST_KEY_UILaunchScreen_Generation", YES),
    ("LD_RUNPATH_SEARCH_PATHS", L(&["$(inherited)", "@executable_path/Frameworks"])),
    ("MARKETING_VERSION", S("1.0")),
    ("PRODUCT_NAME", S("$(TARGET_NAME)")),
    ("SWIFT_EMIT_LOC_STRINGS", YES),
    ("SWIFT_VERSION", S("5.0")),
    ("TARGETED_DEVICE_FAMILY", S("1,2")),
];

const TEST_TARGET: &[(&str, Lit)] = &[
    ("BUNDLE_LOADER", S("$(TEST_HOST)")),
    ("CODE_SIGN_STYLE", S("Automatic")),
    ("CURRENT_PROJECT_VERSION", S("1")),
    ("GENERATE_INFOPLIST_FILE", YES),
    ("MARKETING_VERSION", S("1.0")),
    ("PRODUCT_NAME", S("$(TARGET_NAME)")),
    ("SWIFT_EMIT_LOC_STRINGS", NO),
    ("SWIFT_VERSION", S("5.0")),
    ("TARGETED_DEVICE_FAMILY", S("1,2")),
];

fn collect(table: &[(&str, Lit)], into: &mut BTreeMap<String, SettingValue>) {
    for (key, lit) in table {
        let value = match lit {
            S(text) => SettingValue::Text(text.to_string()),
            L(items) => SettingValue::List(items.iter().map(|i| i.to_string()).collect()),
        };
        into.insert(key.to_string(), value);
    }
}

fn text(value: impl Into<String>) -> SettingValue {
    SettingValue::Text(value.into())
}

fn finish(map: BTreeMap<String, SettingValue>) -> Vec<BuildSetting> {
    map.into_iter()
        .map(|(key, value)| BuildSetting { key, value })
        .collect()
}

fn base_map(variant: Variant, config: &Config) -> BTreeMap<String, SettingValue> {
    let mut map = BTreeMap::new();
    collect(BASE_COMMON, &mut map);
    match variant {
        Variant::Debug => collect(BASE_DEBUG, &mut map),
        Variant::Release => collect(BASE_RELEASE, &mut map),
    }
    map.insert(
        DEPLOYMENT_TARGET_KEY.to_string(),
        text(&config.project.deployment_target),
    );
    map
}

/// Project-level settings for `variant`, sorted by key.
pub fn project_settings(variant: Variant, config: &Config) -> Vec<BuildSetting> {
    finish(base_map(variant, config))
}

/// Application target settings: the base table plus bundle settings.
pub fn app_target_settings(variant: Variant, config: &Config) -> Vec<BuildSetting> {
    let mut map = base_map(variant, config);
    collect(APP_TARGET, &mut map);
    map.insert(
        "PRODUCT_BUNDLE_IDENTIFIER".to_string(),
        text(config.bundle_identifier(&config.project.name)),
    );
    finish(map)
}

/// Unit-test target settings: the base table plus the test-host wiring.
pub fn test_target_settings(variant: Variant, config: &Config) -> Vec<BuildSetting> {
    let name = &config.project.name;
    let mut map = base_map(variant, config);
    collect(TEST_TARGET, &mut map);
    map.insert(
        "PRODUCT_BUNDLE_IDENTIFIER".to_string(),
        text(config.bundle_identifier(&config.test_target_name())),
    );
    map.insert(
        "TEST_HOST".to_string(),
        text(format!(
            "$(BUILT_PRODUCTS_DIR)/{name}.app/$(BUNDLE_EXECUTABLE_FOLDER_PATH)/{name}"
        )),
    );
    finish(map)
}
