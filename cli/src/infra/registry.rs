//! Registry infrastructure: npm registry client over `ureq`.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::de::DeserializeOwned;

use crate::application::ports::RegistryClient;
use crate::domain::RegistryError;
use crate::domain::package::{LatestManifest, PackageMetadata, latest_url, metadata_url};

/// Builds a byte progress bar for a download of known length.
pub type ProgressFactory = fn(u64, &str) -> ProgressBar;

/// Blocking npm registry client.
pub struct NpmRegistry {
    agent: ureq::Agent,
    base_url: String,
    progress: Option<ProgressFactory>,
}

impl NpmRegistry {
    /// Client for the registry at `base_url`; every request is bounded by
    /// `timeout`.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("agent-ui/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            progress: None,
        }
    }

    /// Draw archive downloads with bars built by `factory`.
    #[must_use]
    pub fn with_progress(mut self, factory: ProgressFactory) -> Self {
        self.progress = Some(factory);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> Result<ureq::Response, RegistryError> {
        tracing::debug!(%url, "GET");
        match self.agent.get(url).set("Accept", "application/json").call() {
            Ok(resp) => Ok(resp),
            Err(ureq::Error::Status(status, _)) => Err(RegistryError::Status {
                url: url.to_string(),
                status,
            }),
            Err(ureq::Error::Transport(t)) => Err(RegistryError::Transport {
                url: url.to_string(),
                message: t.to_string(),
            }),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RegistryError> {
        let resp = self.get(url)?;
        serde_json::from_reader(resp.into_reader()).map_err(|e| RegistryError::Malformed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl RegistryClient for NpmRegistry {
    fn metadata_source(&self, name: &str) -> String {
        metadata_url(&self.base_url, name)
    }

    fn package_metadata(&self, name: &str) -> Result<PackageMetadata> {
        let url = self.metadata_source(name);
        Ok(self.get_json(&url)?)
    }

    fn latest_version(&self, name: &str) -> Result<String> {
        let url = latest_url(&self.base_url, name);
        let manifest: LatestManifest = self.get_json(&url)?;
        Ok(manifest.version)
    }

    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64> {
        let resp = self.get(url)?;
        let len = resp
            .header("Content-Length")
            .and_then(|v| v.parse::<u64>().ok());
        let reader = resp.into_reader();

        let bar = match (self.progress, len) {
            (Some(factory), Some(len)) => Some(factory(len, "downloading archive")),
            _ => None,
        };
        let mut reader: Box<dyn io::Read> = match &bar {
            Some(pb) => Box::new(pb.wrap_read(reader)),
            None => reader,
        };

        let copied = io::copy(&mut reader, dest).map_err(|e| RegistryError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        });
        if let Some(pb) = bar {
            pb.finish_and_clear();
        }
        let copied = copied?;
        dest.flush().context("flushing downloaded archive")?;
        tracing::info!(%url, bytes = copied, "archive downloaded");
        Ok(copied)
    }
}
