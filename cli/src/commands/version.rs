//! `agent-ui version`: report the installed bundle version.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{AssetRepository, RegistryClient};
use crate::application::services::{check_latest, read_version_info};
use crate::domain::DOWNLOAD_HINT;
use crate::output::{json, progress};

/// Arguments for the version command.
#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Also query the registry for the latest published version
    #[arg(long)]
    pub check: bool,
}

/// Run the version command.
///
/// # Errors
///
/// Returns an error if `--check` is given and the registry cannot be
/// queried.
pub fn run(app: &AppContext, args: &VersionArgs) -> Result<()> {
    let store = app.store()?;
    let registry = app.registry();
    run_with(app, &registry, &store, args)
}

/// Run the version command with explicit adapters.
///
/// # Errors
///
/// Same as [`run`].
pub fn run_with(
    app: &AppContext,
    registry: &impl RegistryClient,
    store: &impl AssetRepository,
    args: &VersionArgs,
) -> Result<()> {
    if !args.check {
        let info = read_version_info(store);
        if app.is_json() {
            return json::print(&info);
        }
        app.output.kv("assets ", &info.assets_version);
        app.output.kv("package", &info.package_name);
        app.output.kv("sdk    ", &info.local_sdk_version);
        return Ok(());
    }

    let pb = app
        .output
        .show_progress()
        .then(|| progress::spinner("checking registry..."));
    let check = check_latest(registry, store);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let check = check?;

    if app.is_json() {
        return json::print(&serde_json::json!({
            "version": check.installed.assets_version,
            "package": check.installed.package_name,
            "sdk_version": check.installed.local_sdk_version,
            "latest": check.latest,
            "update_available": check.update_available,
        }));
    }

    app.output.kv("assets ", &check.installed.assets_version);
    app.output.kv("latest ", &check.latest);
    if check.update_available {
        app.output.warn(&format!(
            "Update available. Run '{DOWNLOAD_HINT}' to install {}.",
            check.latest
        ));
    } else {
        app.output.success("Static assets are up to date.");
    }
    Ok(())
}
