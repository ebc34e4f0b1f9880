//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::domain::{PackageMetadata, VersionRecord};

// ── Registry Port ─────────────────────────────────────────────────────────────

/// Package registry access.
///
/// Failures of the exchange itself are reported as
/// [`crate::domain::RegistryError`] so callers can recover the kind with
/// `downcast_ref`.
pub trait RegistryClient {
    /// Where the packument of `name` is fetched from; named in errors about
    /// its contents.
    fn metadata_source(&self, name: &str) -> String;

    /// Fetch the packument of `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is unreachable, answers non-2xx, or
    /// the body is not a valid packument.
    fn package_metadata(&self, name: &str) -> Result<PackageMetadata>;

    /// Fetch the concrete version behind the `latest` tag of `name`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`RegistryClient::package_metadata`].
    fn latest_version(&self, name: &str) -> Result<String>;

    /// Stream the archive at `url` into `dest`, returning the byte count.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or `dest` cannot be written.
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64>;
}

// ── Asset Store Port ──────────────────────────────────────────────────────────

/// The local asset directory and its version record.
pub trait AssetRepository {
    /// Directory the bundle is extracted into.
    fn static_dir(&self) -> PathBuf;

    /// Whether the asset directory exists.
    fn has_static_dir(&self) -> bool;

    /// Whether the bundle's entry HTML exists in the asset directory.
    fn has_entry_html(&self) -> bool;

    /// Number of files and directories below the asset directory.
    fn file_count(&self) -> usize;

    /// Read the bundle's entry HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_entry_html(&self) -> Result<String>;

    /// Replace the asset directory with the entries of the gzip tar read from
    /// `archive` that live under `prefix`, returning how many files were
    /// written. The previous directory stays in place if this fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is corrupt or the swap fails.
    fn replace_from_archive(&self, archive: &mut dyn Read, prefix: &str) -> Result<usize>;

    /// Persist the version record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn write_version_record(&self, record: &VersionRecord) -> Result<()>;

    /// Load the version record, `None` when absent or unreadable.
    fn read_version_record(&self) -> Option<VersionRecord>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit step/success/warn
/// messages without depending on the output layer directly.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Reporter that discards every message. Used by the HTTP server, which
/// reports through `tracing` instead.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
