//! The ordered serializer registry and its builder.

use std::fmt;
use std::sync::{Arc, LazyLock};

use super::{RegisteredSerializer, TypeSerializer, builtin};
use crate::{ConfigType, TypeToken};

static DEFAULTS: LazyLock<TypeSerializerCollection> = LazyLock::new(builtin::defaults);

/// Immutable, ordered registry resolving a type to its serializer.
///
/// Cloning is cheap: clones share the same entries.
#[derive(Clone)]
pub struct TypeSerializerCollection {
    entries: Arc<[RegisteredSerializer]>,
}

impl TypeSerializerCollection {
    /// Start an empty builder.
    #[must_use]
    pub fn builder() -> TypeSerializerCollectionBuilder {
        TypeSerializerCollectionBuilder::default()
    }

    /// The built-in collection.
    ///
    /// In order: `url::Url`, `uuid::Uuid`, serde objects, numbers, `String`,
    /// `bool`, maps, lists, [`crate::ConfigEnum`] types, `regex::Regex`.
    #[must_use]
    pub fn defaults() -> Self {
        DEFAULTS.clone()
    }

    /// A builder pre-filled with this collection's entries.
    #[must_use]
    pub fn to_builder(&self) -> TypeSerializerCollectionBuilder {
        TypeSerializerCollectionBuilder {
            entries: self.entries.to_vec(),
        }
    }

    /// The serializer of the first entry whose predicate accepts `ty`.
    ///
    /// `None` is not an error; callers choose the fallback.
    #[must_use]
    pub fn get(&self, ty: &TypeToken) -> Option<&Arc<dyn TypeSerializer>> {
        let found = self.entries.iter().position(|entry| entry.matches(ty));
        tracing::trace!(
            type_name = ty.name(),
            position = ?found,
            "resolved serializer"
        );
        found
            .and_then(|position| self.entries.get(position))
            .map(RegisteredSerializer::serializer)
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in resolution order.
    #[must_use = "iterators are lazy"]
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredSerializer> {
        self.entries.iter()
    }
}

impl Default for TypeSerializerCollection {
    /// An empty collection. See [`TypeSerializerCollection::defaults`] for
    /// the built-in one.
    fn default() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }
}

impl fmt::Debug for TypeSerializerCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSerializerCollection")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Accumulates entries for a [`TypeSerializerCollection`].
///
/// [`Self::build`] copies the entries, so later registrations never leak
/// into collections that were already built.
#[derive(Clone, Debug, Default)]
pub struct TypeSerializerCollectionBuilder {
    entries: Vec<RegisteredSerializer>,
}

impl TypeSerializerCollectionBuilder {
    /// Register `serializer` for exactly `T`.
    pub fn put<T: ConfigType>(&mut self, serializer: impl TypeSerializer + 'static) -> &mut Self {
        self.put_token(&T::type_token(), serializer)
    }

    /// Register `serializer` for exactly the type `ty` describes.
    pub fn put_token(
        &mut self,
        ty: &TypeToken,
        serializer: impl TypeSerializer + 'static,
    ) -> &mut Self {
        let id = ty.type_id();
        self.put_predicate(move |candidate: &TypeToken| candidate.type_id() == id, serializer)
    }

    /// Register `serializer` for every type `predicate` accepts.
    pub fn put_predicate<P>(
        &mut self,
        predicate: P,
        serializer: impl TypeSerializer + 'static,
    ) -> &mut Self
    where
        P: Fn(&TypeToken) -> bool + Send + Sync + 'static,
    {
        self.register(RegisteredSerializer::new(predicate, serializer))
    }

    /// Register ahead of every existing entry, overriding them for the types
    /// `predicate` accepts.
    pub fn put_first<P>(
        &mut self,
        predicate: P,
        serializer: impl TypeSerializer + 'static,
    ) -> &mut Self
    where
        P: Fn(&TypeToken) -> bool + Send + Sync + 'static,
    {
        self.entries
            .insert(0, RegisteredSerializer::new(predicate, serializer));
        self
    }

    /// Append a prepared entry.
    pub fn register(&mut self, entry: RegisteredSerializer) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Append every entry of `other` after this builder's entries.
    ///
    /// Entries already in the builder keep priority.
    pub fn with(&mut self, other: &TypeSerializerCollection) -> &mut Self {
        self.entries.extend(other.iter().cloned());
        self
    }

    /// Snapshot the accumulated entries.
    #[must_use]
    pub fn build(&self) -> TypeSerializerCollection {
        TypeSerializerCollection {
            entries: Arc::from(self.entries.clone()),
        }
    }
}
