//! Application service: static path resolution, provisioning policy, and
//! the injected entry HTML facade.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use agent_ui_common::{ProvisionPolicy, STATIC_ASSETS_PACKAGE};
use anyhow::{Context, Result};

use crate::application::ports::{AssetRepository, ProgressReporter, RegistryClient};
use crate::application::services::acquire::acquire;
use crate::domain::{PackageReference, StaticAssetsError, UiConfig, inject};

/// Return the asset directory if it exists and holds the entry HTML.
///
/// Pure existence check, never downloads.
///
/// # Errors
///
/// Returns [`StaticAssetsError::NotFound`] when the directory is missing and
/// [`StaticAssetsError::EntryMissing`] when `index.html` is missing.
pub fn static_path(repo: &(impl AssetRepository + ?Sized)) -> Result<PathBuf, StaticAssetsError> {
    let dir = repo.static_dir();
    if !repo.has_static_dir() {
        return Err(StaticAssetsError::NotFound(dir));
    }
    if !repo.has_entry_html() {
        return Err(StaticAssetsError::EntryMissing(dir));
    }
    Ok(dir)
}

/// Applies a [`ProvisionPolicy`] when the assets are needed.
///
/// Under [`ProvisionPolicy::AutoDownloadOnce`] the first miss of the process
/// triggers one acquisition of the latest bundle; later misses fail fast
/// whether or not that attempt succeeded.
#[derive(Debug, Default)]
pub struct Provisioner {
    policy: ProvisionPolicy,
    attempted: AtomicBool,
}

impl Provisioner {
    #[must_use]
    pub fn new(policy: ProvisionPolicy) -> Self {
        Self {
            policy,
            attempted: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn policy(&self) -> ProvisionPolicy {
        self.policy
    }

    /// Resolve the static path, provisioning it first if the policy allows.
    ///
    /// # Errors
    ///
    /// Returns the [`StaticAssetsError`] of the miss, or the acquisition
    /// error of the one automatic attempt.
    pub fn ensure(
        &self,
        registry: &(impl RegistryClient + ?Sized),
        repo: &(impl AssetRepository + ?Sized),
        reporter: &(impl ProgressReporter + ?Sized),
    ) -> Result<PathBuf> {
        let miss = match static_path(repo) {
            Ok(path) => return Ok(path),
            Err(miss) => miss,
        };

        if self.policy != ProvisionPolicy::AutoDownloadOnce
            || self.attempted.swap(true, Ordering::SeqCst)
        {
            return Err(miss.into());
        }

        tracing::info!(reason = %miss, "static assets missing, downloading latest bundle");
        acquire(
            registry,
            repo,
            reporter,
            &PackageReference::new(STATIC_ASSETS_PACKAGE, None),
        )
        .context("automatic download of static assets failed")?;
        Ok(static_path(repo)?)
    }
}

/// Read the bundle's entry HTML and inject the runtime configuration.
///
/// # Errors
///
/// Returns an error if the assets are missing (after applying the
/// provisioner's policy), the entry HTML cannot be read, or it has no head
/// tag.
pub fn agent_ui_html(
    provisioner: &Provisioner,
    registry: &(impl RegistryClient + ?Sized),
    repo: &(impl AssetRepository + ?Sized),
    reporter: &(impl ProgressReporter + ?Sized),
    base_url: &str,
    ui_config: Option<&UiConfig>,
) -> Result<String> {
    provisioner.ensure(registry, repo, reporter)?;
    let html = repo.read_entry_html()?;
    Ok(inject(&html, base_url, ui_config)?)
}
