//! `agent-ui html`: print the entry HTML with the runtime config injected.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{Provisioner, agent_ui_html};
use crate::commands::UiConfigArgs;
use crate::output::TerminalReporter;

/// Arguments for the html command.
#[derive(Args, Debug, Default)]
pub struct HtmlArgs {
    /// API base URL exposed to the page (default: $AGENT_UI_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(flatten)]
    pub ui_config: UiConfigArgs,
}

/// Run the html command.
///
/// # Errors
///
/// Returns an error if the assets are missing, the UI config is invalid, or
/// the entry HTML has no head tag.
pub fn run(app: &AppContext, args: &HtmlArgs) -> Result<()> {
    let ui_config = args.ui_config.load()?;
    let base_url = args
        .base_url
        .as_deref()
        .unwrap_or(app.settings.base_url.as_str());

    let store = app.store()?;
    let registry = app.registry();
    let provisioner = Provisioner::new(app.settings.provision_policy());
    let reporter = TerminalReporter::new(&app.output);

    let html = agent_ui_html(
        &provisioner,
        &registry,
        &store,
        &reporter,
        base_url,
        ui_config.as_ref(),
    )?;
    print!("{html}");
    Ok(())
}
