//! Read-only node views.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::ConfigurationTree;
use super::arena::Storage;
use super::cursor::{Cursor, Resolved};
use crate::coerce;
use crate::{ConfigurationOptions, NodeKey, NodePath, Value};

/// A read-only view of one node, possibly virtual.
///
/// Views borrow the tree, so the data they observe cannot change while they
/// exist; [`Self::children_list`] and [`Self::children_map`] are snapshots.
#[derive(Clone, Debug)]
pub struct ConfigurationNode<'a> {
    tree: &'a ConfigurationTree,
    cursor: Cursor,
}

impl<'a> ConfigurationNode<'a> {
    pub(super) const fn new(tree: &'a ConfigurationTree, cursor: Cursor) -> Self {
        Self { tree, cursor }
    }

    fn resolve(&self) -> Resolved {
        self.cursor.resolve(self.tree)
    }

    /// Storage of the addressed record, or `None` while virtual.
    pub(super) fn storage(&self) -> Option<&'a Storage> {
        let resolved = self.resolve();
        (!resolved.detached && self.cursor.rest(resolved).is_empty())
            .then(|| self.tree.arena.storage(resolved.id))
    }

    /// Whether the node holds anything, an empty list or map included.
    pub(super) fn holds_value(&self) -> bool {
        self.storage()
            .is_some_and(|storage| !matches!(storage, Storage::Absent))
    }

    /// The key under which this node sits in its parent. `None` for the root.
    #[must_use]
    pub fn key(&self) -> Option<NodeKey> {
        let resolved = self.resolve();
        self.cursor.rest(resolved).last().cloned().or_else(|| {
            self.tree
                .arena
                .record(resolved.id)
                .and_then(|record| record.key.clone())
        })
    }

    /// Keys from the root to this node.
    #[must_use]
    pub fn path(&self) -> NodePath {
        self.cursor.path(self.tree)
    }

    /// The structural parent. `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let resolved = self.resolve();
        let rest = self.cursor.rest(resolved);
        if let Some((_, ancestors)) = rest.split_last() {
            let base = if resolved.detached {
                self.cursor.clone()
            } else {
                Cursor::at(self.tree, resolved.id)
            };
            return Some(Self::new(
                self.tree,
                Cursor {
                    pending: ancestors.to_vec(),
                    wrap_scalar: false,
                    ..base
                },
            ));
        }
        let parent = self.tree.arena.record(resolved.id)?.parent?;
        Some(Self::new(self.tree, Cursor::at(self.tree, parent)))
    }

    /// Options shared by the whole tree.
    #[must_use]
    pub fn options(&self) -> &'a ConfigurationOptions {
        &self.tree.options
    }

    /// Whether this node is missing from the tree.
    ///
    /// The root is never virtual.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.storage().is_none()
    }

    /// Whether the node holds a list, possibly empty.
    #[must_use]
    pub fn has_list_children(&self) -> bool {
        matches!(self.storage(), Some(Storage::List(_)))
    }

    /// Whether the node holds a map, possibly empty.
    #[must_use]
    pub fn has_map_children(&self) -> bool {
        matches!(self.storage(), Some(Storage::Map(_)))
    }

    /// The node's value, with lists and maps rebuilt from the children.
    ///
    /// `None` for absent and virtual nodes.
    #[must_use]
    pub fn value(&self) -> Option<Value> {
        self.storage()?;
        self.tree.arena.value(self.resolve().id)
    }

    /// The node as JSON; `null` when absent.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        self.value().map_or(JsonValue::Null, |value| value.to_json())
    }

    /// Child nodes in list order. Empty unless the node holds a list.
    #[must_use]
    pub fn children_list(&self) -> Vec<Self> {
        match self.storage() {
            Some(Storage::List(items)) => items
                .iter()
                .map(|child| Self::new(self.tree, Cursor::at(self.tree, *child)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Child nodes by key, in insertion order. Empty unless the node holds a
    /// map.
    #[must_use]
    pub fn children_map(&self) -> IndexMap<String, Self> {
        match self.storage() {
            Some(Storage::Map(entries)) => entries
                .iter()
                .map(|(key, child)| {
                    (key.clone(), Self::new(self.tree, Cursor::at(self.tree, *child)))
                })
                .collect(),
            _ => IndexMap::new(),
        }
    }

    /// Navigate to a descendant. Missing nodes come back virtual; nothing in
    /// the tree changes.
    ///
    /// ```
    /// use config_node::ConfigurationTree;
    ///
    /// let tree = ConfigurationTree::new();
    /// let node = tree.root().node(["a", "b"]);
    /// assert!(node.is_virtual());
    /// assert_eq!(node.path().to_string(), "a.b");
    /// assert!(tree.root().children_map().is_empty());
    /// ```
    #[must_use]
    pub fn node<I>(&self, path: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeKey>,
    {
        Self::new(self.tree, self.cursor.join(path))
    }

    /// The value rendered as a string, for scalars.
    #[must_use]
    pub fn get_string(&self) -> Option<String> {
        self.value().as_ref().and_then(coerce::as_string)
    }

    /// [`Self::get_string`], or `default`.
    #[must_use]
    pub fn get_string_or(&self, default: &str) -> String {
        self.get_string().unwrap_or_else(|| default.to_owned())
    }

    /// The value as a boolean. See [`coerce::as_bool`].
    #[must_use]
    pub fn get_bool(&self) -> Option<bool> {
        self.value().as_ref().and_then(coerce::as_bool)
    }

    /// [`Self::get_bool`], or `default`.
    #[must_use]
    pub fn get_bool_or(&self, default: bool) -> bool {
        self.get_bool().unwrap_or(default)
    }

    /// The value as an `i32`. See [`coerce::as_int`].
    #[must_use]
    pub fn get_int(&self) -> Option<i32> {
        self.value().as_ref().and_then(coerce::as_int)
    }

    /// [`Self::get_int`], or `default`.
    #[must_use]
    pub fn get_int_or(&self, default: i32) -> i32 {
        self.get_int().unwrap_or(default)
    }

    /// The value as an `i64`. See [`coerce::as_long`].
    #[must_use]
    pub fn get_long(&self) -> Option<i64> {
        self.value().as_ref().and_then(coerce::as_long)
    }

    /// [`Self::get_long`], or `default`.
    #[must_use]
    pub fn get_long_or(&self, default: i64) -> i64 {
        self.get_long().unwrap_or(default)
    }

    /// The value as an `f32`. See [`coerce::as_float`].
    #[must_use]
    pub fn get_float(&self) -> Option<f32> {
        self.value().as_ref().and_then(coerce::as_float)
    }

    /// [`Self::get_float`], or `default`.
    #[must_use]
    pub fn get_float_or(&self, default: f32) -> f32 {
        self.get_float().unwrap_or(default)
    }

    /// The value as an `f64`. See [`coerce::as_double`].
    #[must_use]
    pub fn get_double(&self) -> Option<f64> {
        self.value().as_ref().and_then(coerce::as_double)
    }

    /// [`Self::get_double`], or `default`.
    #[must_use]
    pub fn get_double_or(&self, default: f64) -> f64 {
        self.get_double().unwrap_or(default)
    }

    /// Map the node's elements through `transformer`, dropping the ones it
    /// rejects.
    ///
    /// A scalar or map node counts as a single element. Absent nodes yield
    /// `None`, which differs from an empty list.
    ///
    /// ```
    /// use config_node::{ConfigurationTree, coerce};
    ///
    /// let tree = ConfigurationTree::from_value(5);
    /// let list = tree.root().get_list(|v| coerce::as_int(&v));
    /// assert_eq!(list, Some(vec![5]));
    /// ```
    #[must_use]
    pub fn get_list<T, F>(&self, mut transformer: F) -> Option<Vec<T>>
    where
        F: FnMut(Value) -> Option<T>,
    {
        match self.storage()? {
            Storage::Absent => None,
            Storage::List(_) => Some(
                self.children_list()
                    .iter()
                    .filter_map(Self::value)
                    .filter_map(&mut transformer)
                    .collect(),
            ),
            Storage::Scalar(_) | Storage::Map(_) => {
                self.value().map(|value| transformer(value).into_iter().collect())
            }
        }
    }
}
