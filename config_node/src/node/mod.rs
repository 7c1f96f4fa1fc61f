//! The configuration tree and its node views.
//!
//! A [`ConfigurationTree`] owns every node in an arena. Nodes are accessed
//! through short-lived views: [`ConfigurationNode`] for reading and
//! [`ConfigurationNodeMut`] for writing. A view addresses a path rather
//! than a record, which is what makes virtual nodes free: navigating to a
//! missing path allocates nothing, and the first write creates every missing
//! node on the way down.

mod arena;
mod cursor;
mod merge;
mod typed;
mod view;
mod view_mut;

use std::sync::Arc;

use figment::Figment;
use serde_json::Value as JsonValue;

use crate::{ConfigResult, ConfigurationOptions, Value};

use arena::{Arena, NodeId};
use cursor::Cursor;

pub use view::ConfigurationNode;
pub use view_mut::ConfigurationNodeMut;

/// An in-memory configuration document.
///
/// Cloning produces an independent deep copy sharing only the options.
#[derive(Clone, Debug)]
pub struct ConfigurationTree {
    arena: Arena,
    options: Arc<ConfigurationOptions>,
}

impl Default for ConfigurationTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationTree {
    /// An empty tree with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ConfigurationOptions::default())
    }

    /// An empty tree using `options`.
    #[must_use]
    pub fn with_options(options: ConfigurationOptions) -> Self {
        Self::with_shared_options(Arc::new(options))
    }

    /// An empty tree sharing `options` with other trees.
    #[must_use]
    pub fn with_shared_options(options: Arc<ConfigurationOptions>) -> Self {
        Self {
            arena: Arena::new(),
            options,
        }
    }

    /// A tree with default options whose root holds `value`.
    #[must_use]
    pub fn from_value(value: impl Into<Value>) -> Self {
        let mut tree = Self::new();
        tree.arena.assign(NodeId::ROOT, value.into(), &tree.options);
        tree
    }

    /// A tree with default options built from a JSON document.
    ///
    /// `null` becomes an empty root; see [`Value::from_json`].
    #[must_use]
    pub fn from_json(json: JsonValue) -> Self {
        Value::from_json(json).map_or_else(Self::new, Self::from_value)
    }

    /// Extract a figment into a tree with default options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Gathering`] if the figment cannot be
    /// extracted, for example because a provider failed to parse its source.
    pub fn from_figment(figment: &Figment) -> ConfigResult<Self> {
        let json: JsonValue = figment.extract()?;
        Ok(Self::from_json(json))
    }

    /// Read access to the root node.
    #[must_use]
    pub fn root(&self) -> ConfigurationNode<'_> {
        ConfigurationNode::new(self, Cursor::at(self, NodeId::ROOT))
    }

    /// Write access to the root node.
    #[must_use]
    pub fn root_mut(&mut self) -> ConfigurationNodeMut<'_> {
        let cursor = Cursor::at(self, NodeId::ROOT);
        ConfigurationNodeMut::new(self, cursor)
    }

    /// Options shared by every node of this tree.
    #[must_use]
    pub fn options(&self) -> &ConfigurationOptions {
        &self.options
    }

    /// The shared handle to this tree's options.
    #[must_use]
    pub const fn shared_options(&self) -> &Arc<ConfigurationOptions> {
        &self.options
    }

    /// Render the whole tree as JSON. An empty root renders as `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        self.root().to_json()
    }
}
