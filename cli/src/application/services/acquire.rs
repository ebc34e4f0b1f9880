//! Application service: asset acquisition use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::io::{Seek, SeekFrom};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{AssetRepository, ProgressReporter, RegistryClient};
use crate::domain::{ARCHIVE_PREFIX, PackageReference, VersionRecord};

/// Outcome of a successful acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    /// Concrete version that was extracted, never a dist-tag.
    pub version: String,
    /// Number of files written under the asset directory.
    pub files: usize,
    /// Directory the bundle now lives in.
    pub static_dir: PathBuf,
    /// Whether the extracted tree contains the entry HTML.
    pub entry_present: bool,
}

/// Resolve `reference` against the registry, download its archive and
/// replace the asset directory with the archive's static subtree.
///
/// The archive is buffered in a named temporary file that is removed when
/// this function returns, on success and on failure alike.
///
/// # Errors
///
/// Returns an error if resolution, download, extraction, or the version
/// record write fails. Registry failures keep their
/// [`crate::domain::RegistryError`] kind.
pub fn acquire(
    registry: &(impl RegistryClient + ?Sized),
    repo: &(impl AssetRepository + ?Sized),
    reporter: &(impl ProgressReporter + ?Sized),
    reference: &PackageReference,
) -> Result<Acquisition> {
    reporter.step(&format!("resolving {}...", describe(reference)));
    let metadata = registry.package_metadata(&reference.name)?;
    let resolved = reference.resolve(&metadata, &registry.metadata_source(&reference.name))?;
    tracing::info!(
        package = %resolved.name,
        version = %resolved.version,
        tarball = %resolved.tarball_url,
        "resolved package"
    );

    reporter.step(&format!("downloading {}@{}...", resolved.name, resolved.version));
    let mut archive = tempfile::Builder::new()
        .prefix("agent-ui-")
        .suffix(".tgz")
        .tempfile()
        .context("creating temporary archive file")?;
    let bytes = registry.download(&resolved.tarball_url, archive.as_file_mut())?;
    archive
        .as_file_mut()
        .seek(SeekFrom::Start(0))
        .context("rewinding downloaded archive")?;
    tracing::debug!(bytes, path = %archive.path().display(), "archive downloaded");

    reporter.step("extracting static assets...");
    let files = repo
        .replace_from_archive(archive.as_file_mut(), ARCHIVE_PREFIX)
        .with_context(|| format!("extracting {}@{}", resolved.name, resolved.version))?;
    if files == 0 {
        tracing::warn!(prefix = ARCHIVE_PREFIX, "archive contained no static files");
        reporter.warn(&format!("archive contained no files under {ARCHIVE_PREFIX}"));
    }

    repo.write_version_record(&VersionRecord {
        version: resolved.version.clone(),
        package: resolved.name.clone(),
    })
    .context("writing version record")?;

    let entry_present = repo.has_entry_html();
    reporter.success(&format!(
        "{}@{} extracted ({files} files)",
        resolved.name, resolved.version
    ));
    tracing::info!(version = %resolved.version, files, "static assets replaced");

    Ok(Acquisition {
        version: resolved.version,
        files,
        static_dir: repo.static_dir(),
        entry_present,
    })
}

fn describe(reference: &PackageReference) -> String {
    match &reference.version {
        Some(v) => format!("{}@{v}", reference.name),
        None => format!("{}@latest", reference.name),
    }
}
