//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed document to stdout.
//! Failures use the error object produced by [`format_error`].

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{InjectionError, RegistryError, StaticAssetsError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for a command failure.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<StaticAssetsError>().is_some() {
        return "STATIC_ASSETS_NOT_FOUND";
    }
    if let Some(e) = err.downcast_ref::<RegistryError>() {
        return match e {
            RegistryError::VersionNotFound { .. } => "VERSION_NOT_FOUND",
            _ => "REGISTRY_UNAVAILABLE",
        };
    }
    if err.downcast_ref::<InjectionError>().is_some() {
        return "INVALID_HTML";
    }
    "ERROR"
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}
