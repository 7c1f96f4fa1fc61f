//! Reading trees from, and writing them to, configuration files.
//!
//! The tree itself has no persistent form. A [`ConfigurationLoader`] turns
//! some source into a [`ConfigurationTree`] and back; [`FileLoader`] does so
//! for JSON and TOML files, using `figment` providers for parsing.

mod file;
mod format;

use std::sync::Arc;

use crate::{ConfigResult, ConfigurationOptions, ConfigurationTree};

pub use file::FileLoader;
pub use format::ConfigFormat;

/// A source and sink for configuration trees.
pub trait ConfigurationLoader {
    /// Options given to every tree this loader produces.
    fn options(&self) -> &Arc<ConfigurationOptions>;

    /// Read the source into a fresh tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::File`] when the source cannot be read
    /// or parsed.
    fn load(&self) -> ConfigResult<ConfigurationTree>;

    /// Write `tree` to the source, replacing its previous content.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::File`] when the tree cannot be rendered
    /// in the loader's format or the write fails.
    fn save(&self, tree: &ConfigurationTree) -> ConfigResult<()>;

    /// An empty tree carrying this loader's options.
    fn create_empty_node(&self) -> ConfigurationTree {
        ConfigurationTree::with_shared_options(Arc::clone(self.options()))
    }
}
