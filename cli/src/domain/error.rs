//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

/// Command that repopulates the asset directory.
pub const DOWNLOAD_HINT: &str = "agent-ui download";

// ── Static asset errors ───────────────────────────────────────────────────────

/// The local asset directory is missing or incomplete.
///
/// Both variants are the same kind of failure ("not found") and are
/// recovered the same way: run an acquisition.
#[derive(Debug, Error)]
pub enum StaticAssetsError {
    #[error(
        "Static assets not found at {}. Run 'agent-ui download' to download them.",
        .0.display()
    )]
    NotFound(PathBuf),

    #[error(
        "index.html not found in {}. Static assets may be incomplete. Run 'agent-ui download' to download them.",
        .0.display()
    )]
    EntryMissing(PathBuf),
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors raised while resolving or fetching a package from the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Version {requested} not found. Available versions: {}", .available.join(", "))]
    VersionNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("Cannot reach registry at {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Registry returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed registry response from {url}: {message}")]
    Malformed { url: String, message: String },
}

impl RegistryError {
    /// Returns `true` for failures of the registry exchange itself
    /// (unreachable, non-2xx, or an unusable body).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::VersionNotFound { .. })
    }
}

// ── Injection errors ──────────────────────────────────────────────────────────

/// Errors raised while injecting runtime configuration into HTML.
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("HTML content must contain a valid <head> section")]
    MissingHead,

    #[error("cannot serialize UI config: {0}")]
    Serialize(#[from] serde_json::Error),
}
