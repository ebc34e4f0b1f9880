//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod acquire;
pub mod assets;
pub mod health;
pub mod version_info;

pub use acquire::{Acquisition, acquire};
pub use assets::{Provisioner, agent_ui_html, static_path};
pub use health::health_report;
pub use version_info::{VersionCheck, check_latest, read_version_info};
