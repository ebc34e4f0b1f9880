//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod error;
pub mod inject;
pub mod package;
pub mod version;

pub use error::{DOWNLOAD_HINT, InjectionError, RegistryError, StaticAssetsError};
pub use inject::{UiConfig, inject};
pub use package::{ARCHIVE_PREFIX, ENTRY_HTML, PackageMetadata, PackageReference, ResolvedPackage};
pub use version::{VERSION_RECORD_FILE, VersionRecord};
