use serde::Deserialize;

/// Default bind host for `agent-ui serve`.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port for `agent-ui serve`.
pub const DEFAULT_PORT: u16 = 8000;

/// What to do when the static assets are missing at the time they are needed.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ProvisionPolicy {
    /// Report the missing assets and let the operator run a download.
    #[default]
    FailFast,
    /// Download the latest bundle on the first miss of the process, once.
    AutoDownloadOnce,
}

/// HTTP server configuration for `agent-ui serve`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host or IP to bind (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
