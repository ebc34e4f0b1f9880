//! Environment configuration loaded through `envy`.

use std::path::PathBuf;
use std::time::Duration;

use agent_ui_common::ProvisionPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::package::DEFAULT_REGISTRY_URL;

/// Prefix of every environment variable read into [`Settings`].
pub const ENV_PREFIX: &str = "AGENT_UI_";

/// Settings read from `AGENT_UI_*` environment variables.
///
///   - `AGENT_UI_HOME`              asset home (default `<data dir>/agent-ui`)
///   - `AGENT_UI_REGISTRY_URL`      package registry (default npmjs)
///   - `AGENT_UI_BASE_URL`          base URL injected into the page (default empty)
///   - `AGENT_UI_AUTO_DOWNLOAD`     download on first miss (default `false`)
///   - `AGENT_UI_HTTP_TIMEOUT_SECS` registry request timeout (default 60)
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub home: Option<PathBuf>,

    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub auto_download: bool,

    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_http_timeout_secs() -> u64 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home: None,
            registry_url: default_registry_url(),
            base_url: String::new(),
            auto_download: false,
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value of the wrong type.
    pub fn from_env() -> Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env()
            .context("invalid AGENT_UI_* environment variable")
    }

    /// Load from an explicit variable list; used by tests.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::from_env`].
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .context("invalid AGENT_UI_* environment variable")
    }

    /// Asset home, falling back to the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no home is configured and the platform has no
    /// data directory.
    pub fn home_dir(&self) -> Result<PathBuf> {
        if let Some(home) = &self.home {
            return Ok(home.clone());
        }
        dirs::data_dir()
            .map(|d| d.join("agent-ui"))
            .ok_or_else(|| anyhow::anyhow!("cannot determine data directory; set AGENT_UI_HOME"))
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    #[must_use]
    pub fn provision_policy(&self) -> ProvisionPolicy {
        if self.auto_download {
            ProvisionPolicy::AutoDownloadOnce
        } else {
            ProvisionPolicy::FailFast
        }
    }
}
