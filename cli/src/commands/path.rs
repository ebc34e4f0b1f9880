//! `agent-ui path`: print the static asset directory.

use std::path::Path;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::static_path;
use crate::output::json;

/// Run the path command.
///
/// # Errors
///
/// Returns the [`crate::domain::StaticAssetsError`] when the assets are
/// missing or incomplete.
pub fn run(app: &AppContext) -> Result<()> {
    let store = app.store()?;
    let path = static_path(&store)?;
    if app.is_json() {
        return json::print(&path_document(&path));
    }
    println!("{}", path.display());
    Ok(())
}

/// JSON body of `path --json`. Non-UTF-8 components are replaced lossily.
fn path_document(path: &Path) -> serde_json::Value {
    serde_json::json!({ "path": path.display().to_string() })
}
