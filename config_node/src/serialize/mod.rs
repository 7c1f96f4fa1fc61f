//! Type-directed conversion between nodes and native values.
//!
//! A [`TypeSerializerCollection`] is an ordered list of
//! [`RegisteredSerializer`]s. Resolution scans the list in registration
//! order and returns the first serializer whose predicate accepts the
//! requested [`TypeToken`], so specific registrations belong before general
//! ones.
//!
//! ```rust
//! use std::any::Any;
//!
//! use config_node::serialize::predicate;
//! use config_node::{
//!     ConfigResult, ConfigType, ConfigurationNode, ConfigurationNodeMut,
//!     ConfigurationOptions, ConfigurationTree, TypeSerializer,
//!     TypeSerializerCollection, TypeToken,
//! };
//!
//! struct Shouting;
//!
//! impl TypeSerializer for Shouting {
//!     fn deserialize(&self, _: &TypeToken, node: &ConfigurationNode<'_>) -> ConfigResult<Box<dyn Any>> {
//!         Ok(Box::new(node.get_string_or("").to_uppercase()))
//!     }
//!
//!     fn serialize(&self, _: &TypeToken, value: &dyn Any, node: &mut ConfigurationNodeMut<'_>) -> ConfigResult<()> {
//!         let text = value.downcast_ref::<String>().cloned().unwrap_or_default();
//!         node.set_value(text.to_lowercase())
//!     }
//! }
//!
//! # fn main() -> config_node::ConfigResult<()> {
//! let serializers = TypeSerializerCollection::defaults()
//!     .to_builder()
//!     .put_first(predicate::exact::<String>(), Shouting)
//!     .build();
//! let mut tree = ConfigurationTree::with_options(
//!     ConfigurationOptions::new().with_serializers(serializers),
//! );
//! tree.root_mut().set_value("quiet")?;
//! assert_eq!(tree.root().value_as::<String>()?, Some("QUIET".to_owned()));
//! # Ok(())
//! # }
//! ```

mod builtin;
mod collection;
pub mod predicate;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{ConfigResult, ConfigurationNode, ConfigurationNodeMut, TypeToken};

pub use builtin::{
    BoolSerializer, EnumSerializer, FromStrSerializer, ListSerializer, MapSerializer,
    NumberSerializer, ObjectSerializer, StringSerializer,
};
pub use collection::{TypeSerializerCollection, TypeSerializerCollectionBuilder};

/// Converts between a node's content and one family of native types.
///
/// Values cross the boundary as `dyn Any`; the [`TypeToken`] says which
/// concrete type to produce or expect.
pub trait TypeSerializer: Send + Sync {
    /// Build a value of type `ty` from `node`.
    ///
    /// Only called for nodes that hold a value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Mapping`] when the node's content does
    /// not fit `ty`.
    fn deserialize(&self, ty: &TypeToken, node: &ConfigurationNode<'_>)
    -> ConfigResult<Box<dyn Any>>;

    /// Overwrite `node` with `value`, which has type `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Mapping`] when `value` cannot be
    /// represented, or a structural error from writing to `node`.
    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()>;
}

/// Shared predicate over requested types.
pub type TypePredicate = Arc<dyn Fn(&TypeToken) -> bool + Send + Sync>;

/// A serializer paired with the predicate selecting it.
#[derive(Clone)]
pub struct RegisteredSerializer {
    predicate: TypePredicate,
    serializer: Arc<dyn TypeSerializer>,
}

impl RegisteredSerializer {
    /// Pair `serializer` with `predicate`.
    pub fn new<P, S>(predicate: P, serializer: S) -> Self
    where
        P: Fn(&TypeToken) -> bool + Send + Sync + 'static,
        S: TypeSerializer + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            serializer: Arc::new(serializer),
        }
    }

    /// Whether this entry handles `ty`.
    #[must_use]
    pub fn matches(&self, ty: &TypeToken) -> bool {
        (self.predicate)(ty)
    }

    /// The registered serializer.
    #[must_use]
    pub const fn serializer(&self) -> &Arc<dyn TypeSerializer> {
        &self.serializer
    }
}

impl fmt::Debug for RegisteredSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredSerializer")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
