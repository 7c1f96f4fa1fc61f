//! Function tables that rebuild concrete values from erased parts.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value as JsonValue;
use uncased::UncasedStr;

use super::{ConfigEnum, ConfigType};

type Erased = Box<dyn Any>;

/// Sequence operations for a `Vec<T>` token.
#[derive(Clone, Copy)]
pub struct ListOps {
    collect: fn(Vec<Erased>) -> Option<Erased>,
    elements: fn(&dyn Any) -> Option<Vec<&dyn Any>>,
}

impl ListOps {
    pub(super) fn of<T: ConfigType>() -> Self {
        Self {
            collect: collect_vec::<T>,
            elements: vec_elements::<T>,
        }
    }

    /// Assemble erased elements into the concrete sequence.
    ///
    /// Returns `None` if any element has the wrong type.
    #[must_use]
    pub fn collect(&self, items: Vec<Box<dyn Any>>) -> Option<Box<dyn Any>> {
        (self.collect)(items)
    }

    /// Borrow the elements of a concrete sequence.
    ///
    /// Returns `None` if `value` is not the described sequence type.
    #[must_use]
    pub fn elements<'v>(&self, value: &'v dyn Any) -> Option<Vec<&'v dyn Any>> {
        (self.elements)(value)
    }
}

fn collect_vec<T: Any>(items: Vec<Erased>) -> Option<Erased> {
    items
        .into_iter()
        .map(|item| item.downcast::<T>().ok().map(|item| *item))
        .collect::<Option<Vec<T>>>()
        .map(|items| Box::new(items) as Erased)
}

fn vec_elements<T: Any>(value: &dyn Any) -> Option<Vec<&dyn Any>> {
    let items = value.downcast_ref::<Vec<T>>()?;
    Some(items.iter().map(|item| item as &dyn Any).collect())
}

/// String-keyed collections usable as map targets.
pub(crate) trait KeyedCollection: Any {
    type Item: Any;

    fn from_pairs(pairs: Vec<(String, Self::Item)>) -> Self;

    fn pairs(&self) -> Vec<(&str, &Self::Item)>;
}

impl<T: Any> KeyedCollection for BTreeMap<String, T> {
    type Item = T;

    fn from_pairs(pairs: Vec<(String, T)>) -> Self {
        pairs.into_iter().collect()
    }

    fn pairs(&self) -> Vec<(&str, &T)> {
        self.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

impl<T: Any, S: BuildHasher + Default + 'static> KeyedCollection for HashMap<String, T, S> {
    type Item = T;

    fn from_pairs(pairs: Vec<(String, T)>) -> Self {
        pairs.into_iter().collect()
    }

    fn pairs(&self) -> Vec<(&str, &T)> {
        self.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

impl<T: Any, S: BuildHasher + Default + 'static> KeyedCollection for IndexMap<String, T, S> {
    type Item = T;

    fn from_pairs(pairs: Vec<(String, T)>) -> Self {
        pairs.into_iter().collect()
    }

    fn pairs(&self) -> Vec<(&str, &T)> {
        self.iter().map(|(k, v)| (k.as_str(), v)).collect()
    }
}

/// Mapping operations for a string-keyed map token.
#[derive(Clone, Copy)]
pub struct MapOps {
    collect: fn(Vec<(String, Erased)>) -> Option<Erased>,
    entries: fn(&dyn Any) -> Option<Vec<(&str, &dyn Any)>>,
}

impl MapOps {
    pub(super) fn of<M: KeyedCollection>() -> Self {
        Self {
            collect: collect_map::<M>,
            entries: map_entries::<M>,
        }
    }

    /// Assemble erased entries into the concrete map.
    ///
    /// Returns `None` if any value has the wrong type.
    #[must_use]
    pub fn collect(&self, entries: Vec<(String, Box<dyn Any>)>) -> Option<Box<dyn Any>> {
        (self.collect)(entries)
    }

    /// Borrow the entries of a concrete map.
    ///
    /// Returns `None` if `value` is not the described map type.
    #[must_use]
    pub fn entries<'v>(&self, value: &'v dyn Any) -> Option<Vec<(&'v str, &'v dyn Any)>> {
        (self.entries)(value)
    }
}

fn collect_map<M: KeyedCollection>(entries: Vec<(String, Erased)>) -> Option<Erased> {
    entries
        .into_iter()
        .map(|(key, value)| value.downcast::<M::Item>().ok().map(|value| (key, *value)))
        .collect::<Option<Vec<_>>>()
        .map(|pairs| Box::new(M::from_pairs(pairs)) as Erased)
}

fn map_entries<M: KeyedCollection>(value: &dyn Any) -> Option<Vec<(&str, &dyn Any)>> {
    let map = value.downcast_ref::<M>()?;
    Some(
        map.pairs()
            .into_iter()
            .map(|(key, value)| (key, value as &dyn Any))
            .collect(),
    )
}

/// Name lookup for a [`ConfigEnum`] token.
#[derive(Clone, Copy)]
pub struct EnumOps {
    parse: fn(&str) -> Option<Erased>,
    name: fn(&dyn Any) -> Option<&'static str>,
    names: fn() -> Vec<&'static str>,
}

impl EnumOps {
    pub(super) fn of<E: ConfigEnum>() -> Self {
        Self {
            parse: parse_variant::<E>,
            name: variant_name::<E>,
            names: variant_names::<E>,
        }
    }

    /// Find the variant named `raw`, exactly or ignoring ASCII case.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<Box<dyn Any>> {
        (self.parse)(raw)
    }

    /// The stored name of a concrete variant.
    #[must_use]
    pub fn name(&self, value: &dyn Any) -> Option<&'static str> {
        (self.name)(value)
    }

    /// Every variant name, in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        (self.names)()
    }
}

fn parse_variant<E: ConfigEnum>(raw: &str) -> Option<Erased> {
    let variants = E::variants();
    variants
        .iter()
        .find(|variant| variant.name() == raw)
        .or_else(|| {
            variants
                .iter()
                .find(|variant| UncasedStr::new(variant.name()) == UncasedStr::new(raw))
        })
        .map(|variant| Box::new(*variant) as Erased)
}

fn variant_name<E: ConfigEnum>(value: &dyn Any) -> Option<&'static str> {
    value.downcast_ref::<E>().map(ConfigEnum::name)
}

fn variant_names<E: ConfigEnum>() -> Vec<&'static str> {
    E::variants().iter().map(ConfigEnum::name).collect()
}

/// Serde bridge for an object token.
#[derive(Clone, Copy)]
pub struct ObjectOps {
    decode: fn(JsonValue) -> Result<Erased, serde_json::Error>,
    encode: fn(&dyn Any) -> Option<Result<JsonValue, serde_json::Error>>,
}

impl ObjectOps {
    pub(super) fn of<T: Serialize + DeserializeOwned + 'static>() -> Self {
        Self {
            decode: decode_object::<T>,
            encode: encode_object::<T>,
        }
    }

    /// Deserialize the described type from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the document does not fit, for
    /// example when a required field is missing.
    pub fn decode(&self, json: JsonValue) -> Result<Box<dyn Any>, serde_json::Error> {
        (self.decode)(json)
    }

    /// Serialize a concrete value to JSON.
    ///
    /// Returns `None` if `value` is not the described type.
    #[must_use]
    pub fn encode(&self, value: &dyn Any) -> Option<Result<JsonValue, serde_json::Error>> {
        (self.encode)(value)
    }
}

fn decode_object<T: DeserializeOwned + 'static>(json: JsonValue) -> Result<Erased, serde_json::Error> {
    serde_json::from_value::<T>(json).map(|value| Box::new(value) as Erased)
}

fn encode_object<T: Serialize + 'static>(value: &dyn Any) -> Option<Result<JsonValue, serde_json::Error>> {
    value.downcast_ref::<T>().map(serde_json::to_value)
}

macro_rules! opaque_debug {
    ($($ty:ident),* $(,)?) => {
        $(
            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($ty))
                }
            }
        )*
    };
}

opaque_debug!(ListOps, MapOps, EnumOps, ObjectOps);
