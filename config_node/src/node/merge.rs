//! Fill-only merging of one node into another.

use super::ConfigurationNodeMut;
use crate::{ConfigResult, ConfigurationNode};

impl ConfigurationNodeMut<'_> {
    /// Copy values from `other` into this node without overwriting anything.
    ///
    /// An absent or virtual node receives a deep copy of `other`'s value.
    /// When both nodes hold maps, keys missing here are copied in and shared
    /// keys merge recursively. A list or scalar already present here is never
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::StructuralMisuse`] if this node is virtual
    /// and its path cannot be created.
    ///
    /// ```
    /// use config_node::ConfigurationTree;
    /// use serde_json::json;
    ///
    /// # fn main() -> config_node::ConfigResult<()> {
    /// let mut target = ConfigurationTree::from_json(json!({"x": 1}));
    /// let source = ConfigurationTree::from_json(json!({"x": 2, "y": 3}));
    /// target.root_mut().merge_values_from(&source.root())?;
    /// assert_eq!(target.to_json(), json!({"x": 1, "y": 3}));
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge_values_from(&mut self, other: &ConfigurationNode<'_>) -> ConfigResult<()> {
        if !self.as_node().holds_value() {
            if let Some(value) = other.value() {
                self.set_value(value)?;
            }
            return Ok(());
        }
        if !(self.has_map_children() && other.has_map_children()) {
            return Ok(());
        }
        for (key, child) in other.children_map() {
            self.node_mut([key.as_str()]).merge_values_from(&child)?;
        }
        Ok(())
    }
}
