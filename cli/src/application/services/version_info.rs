//! Application service: version reporting and the update check.

use agent_ui_common::VersionInfo;
use anyhow::Result;

use crate::application::ports::{AssetRepository, RegistryClient};
use crate::domain::package::is_outdated;
use crate::domain::version::version_info;

/// Version of the extracted assets, or sentinels when none are recorded.
/// Never fails.
pub fn read_version_info(repo: &(impl AssetRepository + ?Sized)) -> VersionInfo {
    version_info(repo.read_version_record())
}

/// Result of comparing the local assets against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub installed: VersionInfo,
    pub latest: String,
    pub update_available: bool,
}

/// Compare the installed assets against the registry's `latest`.
///
/// # Errors
///
/// Returns an error if the registry cannot be queried.
pub fn check_latest(
    registry: &(impl RegistryClient + ?Sized),
    repo: &(impl AssetRepository + ?Sized),
) -> Result<VersionCheck> {
    let installed = read_version_info(repo);
    let latest = registry.latest_version(&installed.package_name)?;
    let update_available = installed.is_unknown() || is_outdated(&installed.assets_version, &latest);
    Ok(VersionCheck {
        installed,
        latest,
        update_available,
    })
}
