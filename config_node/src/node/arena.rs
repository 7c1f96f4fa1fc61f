//! Slot storage for every node record of one tree.
//!
//! Records refer to each other by [`NodeId`] only. Parents are looked up
//! through the id stored in each record, so the tree has no ownership cycles.
//! Slots are generational: freeing a record bumps its slot's generation,
//! which turns every outstanding id for it into a stale id that resolves to
//! nothing.

use indexmap::IndexMap;

use crate::{ConfigurationOptions, NodeKey, NodePath, Value};

/// Stable, generation-checked handle to a record in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// The root record, allocated by [`Arena::new`] and never freed.
    pub(crate) const ROOT: Self = Self {
        index: 0,
        generation: 0,
    };
}

/// What a node holds. Exactly one shape at a time.
#[derive(Clone, Debug, Default)]
pub(crate) enum Storage {
    #[default]
    Absent,
    Scalar(Value),
    List(Vec<NodeId>),
    Map(IndexMap<String, NodeId>),
}

static ABSENT: Storage = Storage::Absent;

#[derive(Clone, Debug)]
pub(crate) struct NodeRecord {
    pub(crate) key: Option<NodeKey>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) storage: Storage,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    record: Option<NodeRecord>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                record: Some(NodeRecord {
                    key: None,
                    parent: None,
                    storage: Storage::Absent,
                }),
            }],
            free: Vec::new(),
        }
    }

    pub(crate) fn record(&self, id: NodeId) -> Option<&NodeRecord> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_ref())
    }

    fn record_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_mut())
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.record(id).is_some()
    }

    /// Storage of `id`, or [`Storage::Absent`] for stale ids.
    pub(crate) fn storage(&self, id: NodeId) -> &Storage {
        self.record(id).map_or(&ABSENT, |record| &record.storage)
    }

    /// Number of live records, the root included.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn alloc(&mut self, record: NodeRecord) -> NodeId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.record = Some(record);
                return NodeId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.slots.push(Slot {
            generation: 0,
            record: Some(record),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Free `id` and its whole subtree. The root is never freed.
    fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if next == NodeId::ROOT {
                continue;
            }
            let Some(slot) = self
                .slots
                .get_mut(next.index)
                .filter(|slot| slot.generation == next.generation)
            else {
                continue;
            };
            let Some(record) = slot.record.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(next.index);
            pending.extend(children_of(&record.storage));
        }
    }

    /// Child of `id` under `key`, honouring the key comparison in `options`.
    pub(crate) fn child(
        &self,
        id: NodeId,
        key: &NodeKey,
        options: &ConfigurationOptions,
    ) -> Option<NodeId> {
        match self.storage(id) {
            Storage::List(items) => key.as_index().and_then(|i| items.get(i).copied()),
            Storage::Map(entries) => {
                let name = key.to_name();
                entries.get(&name).copied().or_else(|| {
                    entries
                        .iter()
                        .find(|(candidate, _)| options.keys_match(candidate, &name))
                        .map(|(_, child)| *child)
                })
            }
            Storage::Absent | Storage::Scalar(_) => None,
        }
    }

    /// Rebuild the native value held under `id`.
    pub(crate) fn value(&self, id: NodeId) -> Option<Value> {
        match self.storage(id) {
            Storage::Absent => None,
            Storage::Scalar(value) => Some(value.clone()),
            Storage::List(items) => Some(Value::List(
                items.iter().filter_map(|child| self.value(*child)).collect(),
            )),
            Storage::Map(entries) => Some(Value::Map(
                entries
                    .iter()
                    .filter_map(|(key, child)| self.value(*child).map(|v| (key.clone(), v)))
                    .collect(),
            )),
        }
    }

    /// Keys from the root down to `id`.
    pub(crate) fn path(&self, id: NodeId) -> NodePath {
        let mut keys = Vec::new();
        let mut current = self.record(id);
        while let Some(record) = current {
            if let Some(key) = &record.key {
                keys.push(key.clone());
            }
            current = record.parent.and_then(|parent| self.record(parent));
        }
        keys.reverse();
        NodePath::from(keys)
    }

    /// Replace whatever `id` holds with `value`, decomposing collections into
    /// child records.
    pub(crate) fn assign(&mut self, id: NodeId, value: Value, options: &ConfigurationOptions) {
        self.reset(id);
        let storage = match value {
            Value::List(items) => Storage::List(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| self.alloc_value(id, NodeKey::Index(index), item, options))
                    .collect(),
            ),
            Value::Map(entries) => {
                let mut map: IndexMap<String, NodeId> = IndexMap::with_capacity(entries.len());
                for (name, item) in entries {
                    let stored = if options.case_insensitive_keys() {
                        map.keys()
                            .find(|existing| options.keys_match(existing, &name))
                            .cloned()
                            .unwrap_or(name)
                    } else {
                        name
                    };
                    let child = self.alloc_value(id, NodeKey::Name(stored.clone()), item, options);
                    if let Some(replaced) = map.insert(stored, child) {
                        self.release(replaced);
                    }
                }
                Storage::Map(map)
            }
            scalar => Storage::Scalar(scalar),
        };
        if let Some(record) = self.record_mut(id) {
            record.storage = storage;
        }
    }

    fn alloc_value(
        &mut self,
        parent: NodeId,
        key: NodeKey,
        value: Value,
        options: &ConfigurationOptions,
    ) -> NodeId {
        let id = self.alloc(NodeRecord {
            key: Some(key),
            parent: Some(parent),
            storage: Storage::Absent,
        });
        self.assign(id, value, options);
        id
    }

    /// Drop everything `id` holds, leaving it absent but attached.
    pub(crate) fn reset(&mut self, id: NodeId) {
        let old = self
            .record_mut(id)
            .map(|record| std::mem::take(&mut record.storage));
        for child in old.iter().flat_map(children_of) {
            self.release(child);
        }
    }

    /// Check that `keys` can be created below `id`, one level at a time.
    ///
    /// With `wrap_scalar`, a scalar at `id` counts as a one-element list.
    pub(crate) fn check_attach(
        &self,
        id: NodeId,
        keys: &[NodeKey],
        wrap_scalar: bool,
    ) -> Result<(), String> {
        let mut shape = match self.storage(id) {
            Storage::List(items) => Shape::List(items.len()),
            Storage::Map(_) => Shape::Map,
            Storage::Scalar(_) if wrap_scalar => Shape::List(1),
            Storage::Absent | Storage::Scalar(_) => Shape::Fresh,
        };
        for key in keys {
            match (shape, key) {
                (Shape::Map, _) | (Shape::Fresh, NodeKey::Name(_) | NodeKey::Index(0)) => {}
                (Shape::List(len), _) if key.as_index() == Some(len) => {}
                (Shape::List(len), _) => {
                    return Err(format!(
                        "key '{key}' does not extend a list of {len} element(s)"
                    ));
                }
                (Shape::Fresh, NodeKey::Index(index)) => {
                    return Err(format!("index {index} cannot start a new list"));
                }
            }
            shape = Shape::Fresh;
        }
        Ok(())
    }

    /// Create an empty child of `parent` for `key`, converting an absent or
    /// scalar parent into the matching collection. Call [`Self::check_attach`]
    /// first; keys that do not fit a list parent are appended anyway.
    pub(crate) fn attach(&mut self, parent: NodeId, key: &NodeKey) -> NodeId {
        let (child_key, into_list) = match self.storage(parent) {
            Storage::Map(_) => (NodeKey::Name(key.to_name()), false),
            Storage::List(items) => (NodeKey::Index(items.len()), true),
            Storage::Absent | Storage::Scalar(_) => match key {
                NodeKey::Index(_) => (NodeKey::Index(0), true),
                NodeKey::Name(name) => (NodeKey::Name(name.clone()), false),
            },
        };
        let child = self.alloc(NodeRecord {
            key: Some(child_key.clone()),
            parent: Some(parent),
            storage: Storage::Absent,
        });
        if let Some(record) = self.record_mut(parent) {
            match (&mut record.storage, child_key) {
                (Storage::List(items), _) => items.push(child),
                (Storage::Map(entries), NodeKey::Name(name)) => {
                    entries.insert(name, child);
                }
                (storage, NodeKey::Index(_)) if into_list => *storage = Storage::List(vec![child]),
                (storage, key) => {
                    *storage = Storage::Map(IndexMap::from([(key.to_name(), child)]));
                }
            }
        }
        child
    }

    /// Unlink `id` from its parent and free its subtree. Later list siblings
    /// move down one index.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.record(id).and_then(|record| record.parent) else {
            return;
        };
        let mut shifted = Vec::new();
        if let Some(record) = self.record_mut(parent) {
            match &mut record.storage {
                Storage::List(items) => {
                    if let Some(position) = items.iter().position(|child| *child == id) {
                        items.remove(position);
                        shifted.extend(items.iter().copied().enumerate().skip(position));
                    }
                }
                Storage::Map(entries) => entries.retain(|_, child| *child != id),
                Storage::Absent | Storage::Scalar(_) => {}
            }
        }
        for (index, sibling) in shifted {
            if let Some(record) = self.record_mut(sibling) {
                record.key = Some(NodeKey::Index(index));
            }
        }
        self.release(id);
    }
}

#[derive(Clone, Copy)]
enum Shape {
    Fresh,
    List(usize),
    Map,
}

fn children_of(storage: &Storage) -> Vec<NodeId> {
    match storage {
        Storage::List(items) => items.clone(),
        Storage::Map(entries) => entries.values().copied().collect(),
        Storage::Absent | Storage::Scalar(_) => Vec::new(),
    }
}
