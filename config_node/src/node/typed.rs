//! Typed reads and writes through the tree's serializers.

use std::any::Any;
use std::sync::Arc;

use super::{ConfigurationNodeMut, ConfigurationTree};
use crate::coerce;
use crate::{ConfigError, ConfigResult, ConfigType, ConfigurationNode, TypeToken};

impl ConfigurationNode<'_> {
    /// Convert this node with the serializer registered for `ty`.
    ///
    /// Falls back to scalar coercion for booleans, numbers and strings when
    /// no serializer matches. Unlike [`Self::value_with`], absence is not
    /// special-cased; serializers call this for nested values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mapping`] when the content does not fit `ty`
    /// and [`ConfigError::NoSerializer`] when nothing can convert `ty`.
    pub fn deserialize_with(&self, ty: &TypeToken) -> ConfigResult<Box<dyn Any>> {
        if let Some(serializer) = self.options().serializers().get(ty) {
            return serializer.deserialize(ty, self);
        }
        if !coerce::is_coercible(ty) {
            return Err(ConfigError::no_serializer(ty, self.path()));
        }
        tracing::debug!(
            path = %self.path(),
            type_name = ty.name(),
            "no serializer registered; coercing scalar"
        );
        self.value()
            .as_ref()
            .and_then(|value| coerce::coerce_to(ty, value))
            .ok_or_else(|| ConfigError::mapping(ty, self.path(), "value cannot be coerced"))
    }

    /// The node converted to `ty`, or `None` when the node is absent.
    ///
    /// # Errors
    ///
    /// See [`Self::deserialize_with`].
    pub fn value_with(&self, ty: &TypeToken) -> ConfigResult<Option<Box<dyn Any>>> {
        if !self.holds_value() {
            return Ok(None);
        }
        self.deserialize_with(ty).map(Some)
    }

    /// The node converted to `T`, or `None` when the node is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mapping`] when the content does not fit `T`
    /// and [`ConfigError::NoSerializer`] when nothing can convert `T`.
    ///
    /// ```
    /// use config_node::ConfigurationTree;
    ///
    /// # fn main() -> config_node::ConfigResult<()> {
    /// let tree = ConfigurationTree::from_value("300");
    /// assert_eq!(tree.root().value_as::<u16>()?, Some(300));
    /// assert!(tree.root().value_as::<u8>().is_err());
    /// assert_eq!(tree.root().node(["missing"]).value_as::<u8>()?, None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn value_as<T: ConfigType>(&self) -> ConfigResult<Option<T>> {
        let ty = T::type_token();
        self.value_with(&ty)?
            .map(|boxed| {
                boxed.downcast::<T>().map(|typed| *typed).map_err(|_| {
                    ConfigError::mapping(&ty, self.path(), "serializer produced another type")
                })
            })
            .transpose()
    }

    /// [`Self::value_as`], or `default` when the node is absent.
    ///
    /// # Errors
    ///
    /// See [`Self::value_as`].
    pub fn value_as_or<T: ConfigType>(&self, default: T) -> ConfigResult<T> {
        Ok(self.value_as()?.unwrap_or(default))
    }

    /// The node read as a list of `T`. A single scalar reads as one element.
    ///
    /// # Errors
    ///
    /// See [`Self::value_as`].
    pub fn list_as<T: ConfigType>(&self) -> ConfigResult<Option<Vec<T>>> {
        self.value_as::<Vec<T>>()
    }
}

impl ConfigurationNodeMut<'_> {
    /// See [`ConfigurationNode::value_as`].
    ///
    /// # Errors
    ///
    /// See [`ConfigurationNode::value_as`].
    pub fn value_as<T: ConfigType>(&self) -> ConfigResult<Option<T>> {
        self.as_node().value_as()
    }

    /// See [`ConfigurationNode::value_with`].
    ///
    /// # Errors
    ///
    /// See [`ConfigurationNode::deserialize_with`].
    pub fn value_with(&self, ty: &TypeToken) -> ConfigResult<Option<Box<dyn Any>>> {
        self.as_node().value_with(ty)
    }

    /// Write `value` through the serializer registered for `ty`, directly
    /// into this node.
    ///
    /// Serializers call this for nested values. A failure part way through
    /// may leave the node partially written; use [`Self::set_value_with`]
    /// for an all-or-nothing write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mapping`] when `value` cannot be represented
    /// and [`ConfigError::NoSerializer`] when nothing can convert `ty`.
    pub fn serialize_with(&mut self, ty: &TypeToken, value: &dyn Any) -> ConfigResult<()> {
        let serializer = self.tree.options.serializers().get(ty).cloned();
        if let Some(found) = serializer {
            return found.serialize(ty, value, self);
        }
        if !coerce::is_coercible(ty) {
            return Err(ConfigError::no_serializer(ty, self.path()));
        }
        let scalar = coerce::scalar_from(ty, value).ok_or_else(|| {
            ConfigError::mapping(ty, self.path(), "value passed for serialization has another type")
        })?;
        self.set_value(scalar)
    }

    /// Replace this node's content with `value`, which has type `ty`.
    ///
    /// The value is serialized into a scratch tree first, so on error this
    /// node is left exactly as it was.
    ///
    /// # Errors
    ///
    /// See [`Self::serialize_with`] and [`Self::set_value`].
    pub fn set_value_with(&mut self, ty: &TypeToken, value: &dyn Any) -> ConfigResult<()> {
        let mut scratch = ConfigurationTree::with_shared_options(Arc::clone(&self.tree.options));
        scratch.root_mut().serialize_with(ty, value)?;
        match scratch.root().value() {
            Some(serialized) => self.set_value(serialized),
            None => {
                self.clear();
                Ok(())
            }
        }
    }

    /// Replace this node's content with `value`.
    ///
    /// # Errors
    ///
    /// See [`Self::set_value_with`].
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use config_node::ConfigurationTree;
    /// use serde_json::json;
    ///
    /// # fn main() -> config_node::ConfigResult<()> {
    /// let mut tree = ConfigurationTree::new();
    /// let limits = BTreeMap::from([("cpu".to_owned(), 2_u32), ("mem".to_owned(), 512)]);
    /// tree.root_mut().node_mut(["limits"]).set_value_as(&limits)?;
    /// assert_eq!(tree.to_json(), json!({"limits": {"cpu": 2, "mem": 512}}));
    /// # Ok(())
    /// # }
    /// ```
    pub fn set_value_as<T: ConfigType>(&mut self, value: &T) -> ConfigResult<()> {
        self.set_value_with(&T::type_token(), value)
    }
}
