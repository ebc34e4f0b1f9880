//! Runtime configuration injection into the bundle's entry HTML.
//!
//! Pure functions only: no I/O, no async, no shared mutable state.

#![allow(clippy::expect_used)] // Regex pattern is a compile-time constant

use std::io;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::domain::error::InjectionError;

/// Caller-supplied UI configuration. No schema is enforced.
pub type UiConfig = serde_json::Map<String, serde_json::Value>;

/// Global holding the API base URL in the hosted page.
pub const BASE_URL_GLOBAL: &str = "window.AGENT_BASE_URL";

/// Global holding the UI configuration object in the hosted page.
pub const UI_CONFIG_GLOBAL: &str = "window.AGENT_WEB_UI_CONFIG";

/// Opening head tag, any case, optionally with attributes. `<header>` does
/// not match.
static HEAD_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head\b[^>]*>").expect("valid head tag pattern"));

/// Insert the runtime configuration script right after the opening `<head>`
/// tag of `html`.
///
/// Everything before and after the insertion point is preserved byte for
/// byte; identical inputs always produce identical output.
///
/// # Errors
///
/// Returns [`InjectionError::MissingHead`] if `html` has no opening head tag.
pub fn inject(
    html: &str,
    base_url: &str,
    ui_config: Option<&UiConfig>,
) -> Result<String, InjectionError> {
    let head = HEAD_TAG.find(html).ok_or(InjectionError::MissingHead)?;

    let empty = UiConfig::new();
    let block = script_block(
        &to_script_json(base_url)?,
        &to_script_json(ui_config.unwrap_or(&empty))?,
    );

    let mut out = String::with_capacity(html.len() + block.len());
    out.push_str(&html[..head.end()]);
    out.push_str(&block);
    out.push_str(&html[head.end()..]);
    Ok(out)
}

/// Byte offset just past the opening head tag, if any.
#[must_use]
pub fn insertion_point(html: &str) -> Option<usize> {
    HEAD_TAG.find(html).map(|m| m.end())
}

fn script_block(base_url_json: &str, config_json: &str) -> String {
    format!(
        "\n<script>\n  {BASE_URL_GLOBAL} = {base_url_json};\n  {UI_CONFIG_GLOBAL} = {config_json};\n  console.log(\"[agent-ui] runtime config injected\", {{ baseUrl: {BASE_URL_GLOBAL}, config: {UI_CONFIG_GLOBAL} }});\n</script>"
    )
}

/// Serialize `value` as JSON that can sit verbatim inside a `<script>` block.
///
/// Uses `", "` and `": "` separators and escapes `<`, `>`, `&`, U+2028 and
/// U+2029 inside strings as `\uXXXX`, so the output stays valid JSON and can
/// never close the surrounding script element.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, ScriptSafeFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf)
        .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

struct ScriptSafeFormatter;

impl Formatter for ScriptSafeFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
