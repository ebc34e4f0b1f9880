//! Application service: asset directory health report.

use agent_ui_common::{HealthReport, HealthStatus};

use crate::application::ports::AssetRepository;
use crate::application::services::version_info::read_version_info;
use crate::domain::{DOWNLOAD_HINT, StaticAssetsError};

/// Inspect the asset directory.
///
/// Healthy when the entry HTML is present, degraded when the directory
/// exists without it, unhealthy when the directory is missing.
pub fn health_report(repo: &(impl AssetRepository + ?Sized)) -> HealthReport {
    let dir = repo.static_dir();
    if !repo.has_static_dir() {
        return HealthReport {
            status: HealthStatus::Unhealthy,
            static_path: None,
            static_exists: None,
            index_exists: None,
            file_count: None,
            version: None,
            error: Some(StaticAssetsError::NotFound(dir).to_string()),
            suggestion: Some(format!("Run '{DOWNLOAD_HINT}'")),
        };
    }

    let index_exists = repo.has_entry_html();
    HealthReport {
        status: if index_exists {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        static_path: Some(dir.display().to_string()),
        static_exists: Some(true),
        index_exists: Some(index_exists),
        file_count: Some(repo.file_count()),
        version: Some(read_version_info(repo)),
        error: None,
        suggestion: None,
    }
}
