//! Writable node views.

use super::ConfigurationTree;
use super::arena::{NodeId, Storage};
use super::cursor::Cursor;
use crate::{ConfigError, ConfigResult, ConfigurationNode, NodeKey, NodePath, Value};

/// A writable view of one node, possibly virtual.
///
/// Writing to a virtual node creates it and every missing ancestor. Reads
/// not mirrored here are available through [`Self::as_node`].
#[derive(Debug)]
pub struct ConfigurationNodeMut<'a> {
    pub(super) tree: &'a mut ConfigurationTree,
    pub(super) cursor: Cursor,
}

impl<'a> ConfigurationNodeMut<'a> {
    pub(super) const fn new(tree: &'a mut ConfigurationTree, cursor: Cursor) -> Self {
        Self { tree, cursor }
    }

    /// Borrow this node as a read-only view.
    #[must_use]
    pub fn as_node(&self) -> ConfigurationNode<'_> {
        ConfigurationNode::new(&*self.tree, self.cursor.clone())
    }

    /// See [`ConfigurationNode::key`].
    #[must_use]
    pub fn key(&self) -> Option<NodeKey> {
        self.as_node().key()
    }

    /// See [`ConfigurationNode::path`].
    #[must_use]
    pub fn path(&self) -> NodePath {
        self.cursor.path(&*self.tree)
    }

    /// See [`ConfigurationNode::is_virtual`].
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.as_node().is_virtual()
    }

    /// See [`ConfigurationNode::value`].
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.as_node().value()
    }

    /// See [`ConfigurationNode::has_list_children`].
    #[must_use]
    pub fn has_list_children(&self) -> bool {
        self.as_node().has_list_children()
    }

    /// See [`ConfigurationNode::has_map_children`].
    #[must_use]
    pub fn has_map_children(&self) -> bool {
        self.as_node().has_map_children()
    }

    /// Navigate to a descendant for writing. Nothing is created until a
    /// value is written through the returned view.
    #[must_use]
    pub fn node_mut<I>(&mut self, path: I) -> ConfigurationNodeMut<'_>
    where
        I: IntoIterator,
        I::Item: Into<NodeKey>,
    {
        let cursor = self.cursor.join(path);
        ConfigurationNodeMut::new(&mut *self.tree, cursor)
    }

    /// Consume this view and navigate to a descendant for writing.
    #[must_use]
    pub fn into_node_mut<I>(self, path: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeKey>,
    {
        let cursor = self.cursor.join(path);
        Self::new(self.tree, cursor)
    }

    /// Create the addressed node and any missing ancestors, returning its id.
    ///
    /// Every step is validated before anything is created, so a failure
    /// leaves the tree untouched.
    fn materialize(&mut self) -> ConfigResult<NodeId> {
        let resolved = self.cursor.resolve(&*self.tree);
        if resolved.detached {
            return Err(ConfigError::structural(
                self.path(),
                "node was removed from the tree",
            ));
        }
        let rest = self.cursor.rest(resolved).to_vec();
        if rest.is_empty() {
            return Ok(resolved.id);
        }
        let wrapped = match self.tree.arena.storage(resolved.id) {
            Storage::Scalar(scalar) if self.cursor.wrap_scalar && resolved.consumed == 0 => {
                Some(Value::List(vec![scalar.clone()]))
            }
            _ => None,
        };
        self.tree
            .arena
            .check_attach(resolved.id, &rest, wrapped.is_some())
            .map_err(|message| ConfigError::structural(self.path(), message))?;
        if let Some(list) = wrapped {
            let tree = &mut *self.tree;
            tree.arena.assign(resolved.id, list, &tree.options);
            tracing::debug!(
                path = %tree.arena.path(resolved.id),
                "wrapped scalar into a list for appending"
            );
        }
        let id = rest
            .iter()
            .fold(resolved.id, |parent, key| self.tree.arena.attach(parent, key));
        self.cursor = Cursor::at(&*self.tree, id);
        tracing::debug!(path = %self.path(), created = rest.len(), "materialised virtual node");
        Ok(id)
    }

    /// Store `value`, replacing whatever the node held.
    ///
    /// Lists and maps are decomposed into child nodes. A virtual node is
    /// created along with its missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StructuralMisuse`] when the path cannot be
    /// created: a name below an existing list, or a list index that would
    /// leave a gap. The tree is left unchanged.
    ///
    /// ```
    /// use config_node::{ConfigurationTree, Value};
    ///
    /// # fn main() -> config_node::ConfigResult<()> {
    /// let mut tree = ConfigurationTree::new();
    /// tree.root_mut().node_mut(["a", "b"]).set_value(1)?;
    /// let a = tree.root().node(["a"]);
    /// assert!(!a.is_virtual());
    /// assert_eq!(a.node(["b"]).value(), Some(Value::Integer(1)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_value(&mut self, value: impl Into<Value>) -> ConfigResult<()> {
        let id = self.materialize()?;
        let tree = &mut *self.tree;
        tree.arena.assign(id, value.into(), &tree.options);
        Ok(())
    }

    /// Remove the node's value.
    ///
    /// The root becomes empty. Any other node is detached from its parent
    /// and this view turns virtual, still addressing the same key. For a
    /// list element that key now names the sibling that moved into the
    /// vacated index, if any.
    pub fn clear(&mut self) {
        let resolved = self.cursor.resolve(&*self.tree);
        if resolved.detached || !self.cursor.rest(resolved).is_empty() {
            return;
        }
        let Some(record) = self.tree.arena.record(resolved.id) else {
            return;
        };
        match (record.parent, record.key.clone()) {
            (Some(parent), Some(key)) => {
                self.tree.arena.detach(resolved.id);
                self.cursor = Cursor {
                    pending: vec![key],
                    ..Cursor::at(&*self.tree, parent)
                };
            }
            _ => self.tree.arena.reset(resolved.id),
        }
        tracing::trace!(path = %self.path(), "cleared node");
    }

    /// Detach the child under `key`.
    ///
    /// Returns `true` when a child existed. Later list elements move down one
    /// index.
    pub fn remove_child(&mut self, key: impl Into<NodeKey>) -> bool {
        let target = key.into();
        let resolved = self.cursor.resolve(&*self.tree);
        if resolved.detached || !self.cursor.rest(resolved).is_empty() {
            return false;
        }
        let tree = &mut *self.tree;
        let Some(child) = tree.arena.child(resolved.id, &target, &tree.options) else {
            return false;
        };
        tree.arena.detach(child);
        tracing::trace!(key = %target, "removed child");
        true
    }

    /// A virtual node for the next list index.
    ///
    /// Nothing changes until the returned node is written. At that point an
    /// absent or virtual node becomes a list, and a scalar is wrapped into a
    /// list so it survives as element `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StructuralMisuse`] for nodes holding a map.
    pub fn appended_node(&mut self) -> ConfigResult<ConfigurationNodeMut<'_>> {
        let resolved = self.cursor.resolve(&*self.tree);
        if resolved.detached || !self.cursor.rest(resolved).is_empty() {
            let cursor = self.cursor.join([NodeKey::Index(0)]);
            return Ok(ConfigurationNodeMut::new(&mut *self.tree, cursor));
        }
        let (index, wrap_scalar) = match self.tree.arena.storage(resolved.id) {
            Storage::Absent => (0, false),
            Storage::List(items) => (items.len(), false),
            Storage::Scalar(_) => (1, true),
            Storage::Map(_) => {
                return Err(ConfigError::structural(
                    self.path(),
                    "cannot append to a node holding a map",
                ));
            }
        };
        let cursor = Cursor {
            pending: vec![NodeKey::Index(index)],
            wrap_scalar,
            ..Cursor::at(&*self.tree, resolved.id)
        };
        Ok(ConfigurationNodeMut::new(&mut *self.tree, cursor))
    }
}
