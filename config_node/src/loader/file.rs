//! Loader backed by a single file on disk.

use std::fs;
use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value as JsonValue};

use super::{ConfigFormat, ConfigurationLoader};
use crate::{ConfigError, ConfigResult, ConfigurationOptions, ConfigurationTree, Value};

/// Loads and saves a tree as a JSON or TOML file.
///
/// A missing file loads as an empty tree, so a first run can populate
/// defaults and [`ConfigurationLoader::save`] them.
///
/// # Examples
///
/// ```rust,no_run
/// use config_node::{ConfigurationLoader, FileLoader};
///
/// # fn run() -> config_node::ConfigResult<()> {
/// let loader = FileLoader::new("app.toml")?;
/// let mut tree = loader.load()?;
/// tree.root_mut().node_mut(["server", "port"]).set_value(8080)?;
/// loader.save(&tree)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FileLoader {
    path: Utf8PathBuf,
    format: ConfigFormat,
    options: Arc<ConfigurationOptions>,
}

impl FileLoader {
    /// A loader for `path`, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::File`] when the extension names no supported
    /// format.
    pub fn new(path: impl Into<Utf8PathBuf>) -> ConfigResult<Self> {
        let utf8_path = path.into();
        let format = ConfigFormat::from_path(&utf8_path).ok_or_else(|| {
            ConfigError::file(
                &utf8_path,
                io::Error::other("unsupported extension: expected .json or .toml"),
            )
        })?;
        Ok(Self::with_format(utf8_path, format))
    }

    /// A loader for `path` in an explicit format.
    #[must_use]
    pub fn with_format(path: impl Into<Utf8PathBuf>, format: ConfigFormat) -> Self {
        Self {
            path: path.into(),
            format,
            options: Arc::new(ConfigurationOptions::default()),
        }
    }

    /// Give loaded trees `options`.
    #[must_use]
    pub fn with_options(self, options: ConfigurationOptions) -> Self {
        self.with_shared_options(Arc::new(options))
    }

    /// Give loaded trees an options handle shared with other trees.
    #[must_use]
    pub fn with_shared_options(mut self, options: Arc<ConfigurationOptions>) -> Self {
        self.options = options;
        self
    }

    /// The file this loader reads and writes.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The file's format.
    #[must_use]
    pub const fn format(&self) -> ConfigFormat {
        self.format
    }

    fn file_error(&self, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> ConfigError {
        ConfigError::file(&self.path, source)
    }
}

impl ConfigurationLoader for FileLoader {
    fn options(&self) -> &Arc<ConfigurationOptions> {
        &self.options
    }

    fn load(&self) -> ConfigResult<ConfigurationTree> {
        let mut tree = self.create_empty_node();
        if !self.path.is_file() {
            tracing::debug!(path = %self.path, "configuration file missing; starting empty");
            return Ok(tree);
        }
        let data = fs::read_to_string(&self.path).map_err(|e| self.file_error(e))?;
        let json = self.format.parse(&self.path, &data)?;
        if let Some(value) = Value::from_json(json) {
            tree.root_mut().set_value(value)?;
        }
        tracing::debug!(path = %self.path, format = %self.format, "loaded configuration file");
        Ok(tree)
    }

    fn save(&self, tree: &ConfigurationTree) -> ConfigResult<()> {
        let json = match tree.to_json() {
            JsonValue::Null => JsonValue::Object(Map::new()),
            other => other,
        };
        let header = tree.options().header().or_else(|| self.options.header());
        let rendered = self
            .format
            .render(&json, header)
            .map_err(|e| self.file_error(e))?;
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.file_error(e))?;
        }
        fs::write(&self.path, rendered).map_err(|e| self.file_error(e))?;
        tracing::debug!(path = %self.path, format = %self.format, "saved configuration file");
        Ok(())
    }
}
