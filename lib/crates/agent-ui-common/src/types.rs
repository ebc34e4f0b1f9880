use serde::{Deserialize, Serialize};

/// npm package that ships the agent UI bundle.
pub const STATIC_ASSETS_PACKAGE: &str = "@tarko/agent-ui-builder";

/// Sentinel reported when no version record has been written yet.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Versions of the bundled assets and of this tooling.
///
/// Serialised with the field names consumers of the original SDK expect:
/// `{"version", "package", "sdk_version"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    /// Concrete version of the extracted bundle, or `"unknown"`.
    #[serde(rename = "version")]
    pub assets_version: String,
    /// Registry package the bundle came from.
    #[serde(rename = "package")]
    pub package_name: String,
    /// Version of the local tooling that performed the extraction.
    #[serde(rename = "sdk_version")]
    pub local_sdk_version: String,
}

impl VersionInfo {
    /// Returns `true` when the assets version is the `"unknown"` sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.assets_version == UNKNOWN_VERSION
    }
}

/// Overall health of the served asset directory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Body of `GET /api/health`.
///
/// Healthy and degraded reports carry the directory facts; unhealthy reports
/// carry the error and a remediation hint instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_exists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_exists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Body of a successful `POST /api/download-assets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub files: usize,
}

/// Error body returned by every failing HTTP endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}
