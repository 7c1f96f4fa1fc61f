//! Addresses of possibly virtual nodes.

use super::ConfigurationTree;
use super::arena::NodeId;
use crate::{NodeKey, NodePath};

/// A real record plus the keys that still have to be created below it.
///
/// Navigating to a path that does not exist only grows `pending`; nothing
/// is allocated until a value is written.
#[derive(Clone, Debug)]
pub(crate) struct Cursor {
    pub(crate) anchor: NodeId,
    pub(crate) pending: Vec<NodeKey>,
    /// The anchor's path when the cursor was made, reported once it is gone.
    pub(crate) origin: NodePath,
    /// A scalar anchor becomes element `0` of a list when `pending` is
    /// first created.
    pub(crate) wrap_scalar: bool,
}

/// Outcome of walking a cursor against the live tree.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Resolved {
    /// Deepest existing record on the cursor's path.
    pub(crate) id: NodeId,
    /// How many pending keys already exist.
    pub(crate) consumed: usize,
    /// The anchor was removed from the tree.
    pub(crate) detached: bool,
}

impl Cursor {
    pub(crate) fn at(tree: &ConfigurationTree, anchor: NodeId) -> Self {
        Self {
            anchor,
            pending: Vec::new(),
            origin: tree.arena.path(anchor),
            wrap_scalar: false,
        }
    }

    pub(crate) fn join<I>(&self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeKey>,
    {
        let mut pending = self.pending.clone();
        pending.extend(keys.into_iter().map(Into::into));
        Self {
            anchor: self.anchor,
            pending,
            origin: self.origin.clone(),
            wrap_scalar: self.wrap_scalar,
        }
    }

    /// Walk as far down `pending` as the tree currently reaches.
    ///
    /// Resolution happens on every access because writes through a child
    /// handle may have created part of this cursor's path since it was made.
    pub(crate) fn resolve(&self, tree: &ConfigurationTree) -> Resolved {
        if !tree.arena.contains(self.anchor) {
            return Resolved {
                id: self.anchor,
                consumed: 0,
                detached: true,
            };
        }
        let mut id = self.anchor;
        for (consumed, key) in self.pending.iter().enumerate() {
            match tree.arena.child(id, key, &tree.options) {
                Some(child) => id = child,
                None => {
                    return Resolved {
                        id,
                        consumed,
                        detached: false,
                    };
                }
            }
        }
        Resolved {
            id,
            consumed: self.pending.len(),
            detached: false,
        }
    }

    pub(crate) fn rest(&self, resolved: Resolved) -> &[NodeKey] {
        self.pending.get(resolved.consumed..).unwrap_or_default()
    }

    pub(crate) fn path(&self, tree: &ConfigurationTree) -> NodePath {
        let resolved = self.resolve(tree);
        let mut path = if resolved.detached {
            self.origin.clone()
        } else {
            tree.arena.path(resolved.id)
        };
        for key in self.rest(resolved) {
            path.push(key.clone());
        }
        path
    }
}
