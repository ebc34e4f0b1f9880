//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: registry HTTP access,
//! archive extraction, the on-disk asset store, and environment settings.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod archive;
pub mod config;
pub mod registry;
pub mod store;

pub use config::Settings;
pub use registry::NpmRegistry;
pub use store::AssetStore;
