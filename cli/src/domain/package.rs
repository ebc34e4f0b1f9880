//! Registry package references and version resolution.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::domain::error::RegistryError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Public npm registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Archive subtree holding the bundle's static files. Entries outside it are
/// ignored and the prefix itself is stripped on extraction.
pub const ARCHIVE_PREFIX: &str = "package/static/";

/// Entry HTML of the extracted bundle.
pub const ENTRY_HTML: &str = "index.html";

/// Dist-tag consulted when no explicit version is requested.
pub const LATEST_TAG: &str = "latest";

/// Characters left untouched when a package name becomes a URL path segment.
/// `@` and `/` of scoped names are encoded.
const PACKAGE_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// ── Registry records ─────────────────────────────────────────────────────────

/// The subset of a registry packument this tool reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: BTreeMap<String, String>,
    pub versions: BTreeMap<String, VersionEntry>,
}

/// One entry of the packument's `versions` map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionEntry {
    #[serde(default)]
    pub dist: Option<DistInfo>,
}

/// Distribution info of a published version.
#[derive(Debug, Clone, Deserialize)]
pub struct DistInfo {
    pub tarball: String,
}

/// Body of `GET {registry}/{package}/latest`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestManifest {
    pub version: String,
}

// ── References ───────────────────────────────────────────────────────────────

/// A package name plus an optional pinned version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    pub name: String,
    pub version: Option<String>,
}

/// A reference after resolution against registry metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub name: String,
    /// Always a concrete version, never a dist-tag.
    pub version: String,
    pub tarball_url: String,
}

impl PackageReference {
    /// Reference to `name` at `version`, or at its `latest` tag when `None`.
    #[must_use]
    pub fn new(name: &str, version: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            version: version.map(str::to_string),
        }
    }

    /// Resolve against the packument fetched from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::VersionNotFound`] when the requested version
    /// is not published, and [`RegistryError::Malformed`] when the metadata
    /// lacks a `latest` tag or a tarball URL for the chosen version.
    pub fn resolve(
        &self,
        metadata: &PackageMetadata,
        source: &str,
    ) -> Result<ResolvedPackage, RegistryError> {
        let version = match &self.version {
            Some(v) => v.clone(),
            None => metadata
                .dist_tags
                .get(LATEST_TAG)
                .cloned()
                .ok_or_else(|| RegistryError::Malformed {
                    url: source.to_string(),
                    message: "missing dist-tags.latest".to_string(),
                })?,
        };

        let Some(entry) = metadata.versions.get(&version) else {
            return Err(RegistryError::VersionNotFound {
                requested: version,
                available: sorted_versions(metadata.versions.keys().map(String::as_str)),
            });
        };

        let tarball_url = entry
            .dist
            .as_ref()
            .map(|d| d.tarball.clone())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RegistryError::Malformed {
                url: source.to_string(),
                message: format!("version {version} has no dist.tarball"),
            })?;

        Ok(ResolvedPackage {
            name: self.name.clone(),
            version,
            tarball_url,
        })
    }
}

// ── URL helpers ──────────────────────────────────────────────────────────────

/// Percent-encode a (possibly scoped) package name as one path segment.
#[must_use]
pub fn encode_package_name(name: &str) -> String {
    utf8_percent_encode(name, PACKAGE_NAME_SET).to_string()
}

/// `GET` URL of the full packument.
#[must_use]
pub fn metadata_url(registry: &str, name: &str) -> String {
    format!(
        "{}/{}",
        registry.trim_end_matches('/'),
        encode_package_name(name)
    )
}

/// `GET` URL of the `latest` manifest shortcut.
#[must_use]
pub fn latest_url(registry: &str, name: &str) -> String {
    format!("{}/{name}/{LATEST_TAG}", registry.trim_end_matches('/'))
}

/// Sort versions by semver precedence; unparsable ones go last, lexically.
#[must_use]
pub fn sorted_versions<'a>(versions: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut list: Vec<&str> = versions.into_iter().collect();
    list.sort_by(|a, b| {
        match (semver::Version::parse(a), semver::Version::parse(b)) {
            (Ok(va), Ok(vb)) => va.cmp(&vb),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        }
    });
    list.into_iter().map(str::to_string).collect()
}

/// Returns `true` when `installed` is older than `latest`.
///
/// Unparsable versions compare by string inequality.
#[must_use]
pub fn is_outdated(installed: &str, latest: &str) -> bool {
    match (semver::Version::parse(installed), semver::Version::parse(latest)) {
        (Ok(i), Ok(l)) => i < l,
        _ => installed != latest,
    }
}
