//! Leaf types with a string form, such as URLs, UUIDs and patterns.

use std::any::Any;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use super::{scalar_of, wrong_type};
use crate::{
    ConfigResult, ConfigurationNode, ConfigurationNodeMut, MappingResultExt, TypeSerializer,
    TypeToken,
};

/// Parses `T` with [`FromStr`] and writes it back with [`Display`].
///
/// ```
/// use config_node::serialize::FromStrSerializer;
/// use config_node::{ConfigurationOptions, ConfigurationTree, TypeSerializerCollection};
/// use std::net::IpAddr;
/// # use config_node::{ConfigType, TypeToken};
/// # #[derive(Debug, PartialEq)]
/// # struct Addr(IpAddr);
/// # impl std::str::FromStr for Addr {
/// #     type Err = std::net::AddrParseError;
/// #     fn from_str(s: &str) -> Result<Self, Self::Err> { s.parse().map(Self) }
/// # }
/// # impl std::fmt::Display for Addr {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
/// # }
/// # impl ConfigType for Addr {
/// #     fn type_token() -> TypeToken { TypeToken::nominal::<Self>() }
/// # }
///
/// # fn main() -> config_node::ConfigResult<()> {
/// let serializers = TypeSerializerCollection::defaults()
///     .to_builder()
///     .put::<Addr>(FromStrSerializer::<Addr>::new())
///     .build();
/// let mut tree = ConfigurationTree::with_options(
///     ConfigurationOptions::new().with_serializers(serializers),
/// );
/// tree.root_mut().set_value("127.0.0.1")?;
/// let addr: Option<Addr> = tree.root().value_as()?;
/// assert_eq!(addr.map(|a| a.to_string()).as_deref(), Some("127.0.0.1"));
/// # Ok(())
/// # }
/// ```
pub struct FromStrSerializer<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> FromStrSerializer<T> {
    /// Create the serializer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for FromStrSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FromStrSerializer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FromStrSerializer<T> {}

impl<T> fmt::Debug for FromStrSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromStrSerializer<{}>", std::any::type_name::<T>())
    }
}

impl<T> TypeSerializer for FromStrSerializer<T>
where
    T: FromStr + Display + 'static,
    T::Err: Display,
{
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let raw = scalar_of(ty, node)?.to_string();
        let parsed = raw.parse::<T>().or_mapping(ty, node)?;
        Ok(Box::new(parsed))
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let typed = value
            .downcast_ref::<T>()
            .ok_or_else(|| wrong_type(ty, &node.as_node()))?;
        node.set_value(typed.to_string())
    }
}
