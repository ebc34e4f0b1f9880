//! Command implementations

pub mod download;
pub mod html;
pub mod path;
pub mod serve;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::UiConfig;

/// Where the UI configuration comes from.
#[derive(Args, Debug, Default)]
pub struct UiConfigArgs {
    /// UI configuration file (YAML or JSON object)
    #[arg(long, value_name = "FILE", conflicts_with = "ui_config_json")]
    pub ui_config: Option<PathBuf>,

    /// UI configuration as an inline JSON object
    #[arg(long, value_name = "JSON")]
    pub ui_config_json: Option<String>,
}

impl UiConfigArgs {
    /// Load the configured UI config, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not an object.
    pub fn load(&self) -> Result<Option<UiConfig>> {
        if let Some(json) = &self.ui_config_json {
            return parse_ui_config(json, true).map(Some);
        }
        let Some(path) = &self.ui_config else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        parse_ui_config(&text, is_json_file(path))
            .with_context(|| format!("cannot parse {}", path.display()))
            .map(Some)
    }
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parse `text` as a UI config object. JSON input keeps numbers and key
/// order exactly; anything else goes through the YAML parser.
///
/// # Errors
///
/// Returns an error if `text` does not parse or is not a mapping.
pub fn parse_ui_config(text: &str, json: bool) -> Result<UiConfig> {
    let value: serde_json::Value = if json {
        serde_json::from_str(text).context("invalid JSON")?
    } else {
        serde_yaml::from_str(text).context("invalid YAML")?
    };
    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(UiConfig::new()),
        other => anyhow::bail!("UI config must be an object, got {}", kind(&other)),
    }
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
