//! `agent-ui serve`: host the UI over HTTP.

use std::sync::Arc;

use agent_ui_common::{ProvisionPolicy, ServerConfig};
use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::SilentReporter;
use crate::application::services::Provisioner;
use crate::commands::UiConfigArgs;
use crate::server::{self, ServerState};

/// Arguments for the serve command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host or IP to bind
    #[arg(long, default_value = agent_ui_common::DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(long, short, default_value_t = agent_ui_common::DEFAULT_PORT)]
    pub port: u16,

    /// API base URL exposed to the page (default: $AGENT_UI_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(flatten)]
    pub ui_config: UiConfigArgs,

    /// Download the latest bundle once if the assets are missing
    #[arg(long)]
    pub auto_download: bool,
}

/// Run the serve command until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the UI config is invalid or the server cannot start.
pub async fn run(app: &AppContext, args: ServeArgs) -> Result<()> {
    let ui_config = args.ui_config.load()?;
    let policy = if args.auto_download {
        ProvisionPolicy::AutoDownloadOnce
    } else {
        app.settings.provision_policy()
    };

    let state = ServerState {
        store: Arc::new(app.store()?),
        registry: Arc::new(app.registry()),
        provisioner: Arc::new(Provisioner::new(policy)),
        base_url: args
            .base_url
            .unwrap_or_else(|| app.settings.base_url.clone())
            .into(),
        ui_config: ui_config.map(Arc::new),
    };

    preflight(&state).await?;

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };
    server::serve(state, &config.listen_addr()).await
}

/// Check the assets before binding, provisioning them if the policy allows.
/// A miss is logged, not fatal: `/api/download-assets` can still fix it.
async fn preflight(state: &ServerState) -> Result<()> {
    let state = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        state
            .provisioner
            .ensure(state.registry.as_ref(), state.store.as_ref(), &SilentReporter)
    })
    .await
    .context("asset preflight task failed")?;

    match outcome {
        Ok(path) => tracing::info!(path = %path.display(), "static assets found"),
        Err(e) => tracing::warn!(
            error = %format!("{e:#}"),
            "static assets unavailable; POST /api/download-assets to fetch them"
        ),
    }
    Ok(())
}
