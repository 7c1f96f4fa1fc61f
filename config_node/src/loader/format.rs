//! Supported file formats and their parse and render rules.

use std::error::Error;
use std::fmt;

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Format, Json};
use serde_json::Value as JsonValue;

use crate::{ConfigError, ConfigResult};

type RenderError = Box<dyn Error + Send + Sync>;

/// On-disk formats understood by [`super::FileLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigFormat {
    /// JSON. Headers are not written because JSON has no comments.
    Json,
    /// TOML. Requires the `toml` feature.
    Toml,
}

impl ConfigFormat {
    /// Infer the format from a file extension, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use config_node::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path(Utf8Path::new("app.TOML")), Some(ConfigFormat::Toml));
    /// assert_eq!(ConfigFormat::from_path(Utf8Path::new("app.ini")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse `data` read from `path` into a JSON document.
    ///
    /// Blank input parses as `null`, an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::File`] when `data` is malformed or the format's
    /// feature is disabled.
    pub(crate) fn parse(self, path: &Utf8Path, data: &str) -> ConfigResult<JsonValue> {
        if data.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        let figment = match self {
            Self::Json => Figment::from(Json::string(data)),
            Self::Toml => toml_figment(path, data)?,
        };
        figment
            .extract::<JsonValue>()
            .map_err(|e| ConfigError::file(path, e))
    }

    /// Render `json` in this format, with `header` as leading comments where
    /// the format has them.
    pub(crate) fn render(self, json: &JsonValue, header: Option<&str>) -> Result<String, RenderError> {
        match self {
            Self::Json => {
                let mut text = serde_json::to_string_pretty(json)?;
                text.push('\n');
                Ok(text)
            }
            Self::Toml => render_toml(json, header),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Toml => "toml",
        })
    }
}

#[cfg(feature = "toml")]
fn toml_figment(path: &Utf8Path, data: &str) -> ConfigResult<Figment> {
    use figment::providers::Toml;

    // Validate first so syntax errors carry this file's path.
    toml::from_str::<toml::Table>(data).map_err(|e| ConfigError::file(path, e))?;
    Ok(Figment::from(Toml::string(data)))
}

#[cfg(not(feature = "toml"))]
fn toml_figment(path: &Utf8Path, _data: &str) -> ConfigResult<Figment> {
    Err(ConfigError::file(path, toml_disabled()))
}

#[cfg(feature = "toml")]
fn render_toml(json: &JsonValue, header: Option<&str>) -> Result<String, RenderError> {
    let body = toml::to_string_pretty(json)?;
    let Some(header) = header else {
        return Ok(body);
    };
    let mut text: String = header.lines().map(|line| format!("# {line}\n")).collect();
    text.push('\n');
    text.push_str(&body);
    Ok(text)
}

#[cfg(not(feature = "toml"))]
fn render_toml(_json: &JsonValue, _header: Option<&str>) -> Result<String, RenderError> {
    Err(toml_disabled().into())
}

#[cfg(not(feature = "toml"))]
fn toml_disabled() -> std::io::Error {
    std::io::Error::other("toml feature disabled: enable the 'toml' feature to support this file format")
}
