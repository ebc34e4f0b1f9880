//! Version record written next to the extracted assets.
//!
//! The record is a small generated Rust source file so it can be
//! `include!`d by downstream builds that embed the bundle.

#![allow(clippy::expect_used)] // Regex patterns are compile-time constants

use std::sync::LazyLock;

use agent_ui_common::{STATIC_ASSETS_PACKAGE, UNKNOWN_VERSION, VersionInfo};
use regex::Regex;

/// File name of the version record inside the asset home.
pub const VERSION_RECORD_FILE: &str = "static_version.rs";

/// Version of this tooling, reported as `sdk_version`.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

static VERSION_CONST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*pub const STATIC_ASSETS_VERSION: &str = "([^"\\]*)";"#)
        .expect("valid version const pattern")
});

static PACKAGE_CONST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*pub const STATIC_ASSETS_PACKAGE: &str = "([^"\\]*)";"#)
        .expect("valid package const pattern")
});

/// Parsed contents of a version record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub version: String,
    pub package: String,
}

/// Render the record for `version` of `package`.
#[must_use]
pub fn render_version_record(version: &str, package: &str) -> String {
    format!(
        "// @generated by agent-ui download. Do not edit.\n\
         pub const STATIC_ASSETS_VERSION: &str = {version:?};\n\
         pub const STATIC_ASSETS_PACKAGE: &str = {package:?};\n"
    )
}

/// Parse a record previously produced by [`render_version_record`].
///
/// Returns `None` unless both constants are present as plain string literals.
#[must_use]
pub fn parse_version_record(text: &str) -> Option<VersionRecord> {
    let version = VERSION_CONST.captures(text)?.get(1)?.as_str();
    let package = PACKAGE_CONST.captures(text)?.get(1)?.as_str();
    if version.is_empty() {
        return None;
    }
    Some(VersionRecord {
        version: version.to_string(),
        package: package.to_string(),
    })
}

/// Build the reported [`VersionInfo`], falling back to sentinels when no
/// usable record exists.
#[must_use]
pub fn version_info(record: Option<VersionRecord>) -> VersionInfo {
    let (assets_version, package_name) = match record {
        Some(r) => (r.version, r.package),
        None => (
            UNKNOWN_VERSION.to_string(),
            STATIC_ASSETS_PACKAGE.to_string(),
        ),
    };
    VersionInfo {
        assets_version,
        package_name,
        local_sdk_version: SDK_VERSION.to_string(),
    }
}
