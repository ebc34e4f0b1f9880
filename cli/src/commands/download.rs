//! `agent-ui download`: fetch and extract the UI bundle.

use agent_ui_common::{DownloadResponse, STATIC_ASSETS_PACKAGE};
use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{AssetRepository, ProgressReporter, RegistryClient};
use crate::application::services::acquire;
use crate::domain::{DOWNLOAD_HINT, PackageReference};
use crate::output::{TerminalReporter, json};

/// Arguments for the download command.
#[derive(Args, Debug, Default)]
pub struct DownloadArgs {
    /// Bundle version to download (default: latest)
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
}

/// Run the download command against the configured registry and home.
///
/// # Errors
///
/// Returns an error if acquisition fails.
pub fn run(app: &AppContext, args: &DownloadArgs) -> Result<()> {
    let store = app.store()?;
    let registry = app.registry();
    run_with(app, &registry, &store, args)
}

/// Run the download command with explicit adapters.
///
/// # Errors
///
/// Returns an error if acquisition fails or the confirmation prompt fails.
pub fn run_with(
    app: &AppContext,
    registry: &impl RegistryClient,
    store: &impl AssetRepository,
    args: &DownloadArgs,
) -> Result<()> {
    if store.has_static_dir()
        && !app.confirm(
            &format!("Replace existing assets in {}?", store.static_dir().display()),
            true,
        )?
    {
        app.output.info("Download cancelled.");
        return Ok(());
    }

    let reporter = TerminalReporter::new(&app.output);
    let reference = PackageReference::new(STATIC_ASSETS_PACKAGE, args.version.as_deref());
    let acquisition = acquire(registry, store, &reporter, &reference)?;

    if !acquisition.entry_present {
        reporter.warn(&format!(
            "index.html missing from {}@{}; the UI cannot be served. Try '{DOWNLOAD_HINT} --version <other>'.",
            STATIC_ASSETS_PACKAGE, acquisition.version
        ));
    }

    if app.is_json() {
        return json::print(&DownloadResponse {
            status: "success".to_string(),
            message: format!("Downloaded assets version {}", acquisition.version),
            version: acquisition.version,
            files: acquisition.files,
        });
    }

    app.output.kv("version", &acquisition.version);
    app.output.kv("files  ", &acquisition.files.to_string());
    app.output
        .kv("path   ", &acquisition.static_dir.display().to_string());
    Ok(())
}
