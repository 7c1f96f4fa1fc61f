//! Serializers registered by [`super::TypeSerializerCollection::defaults`].

mod container;
mod leaf;
mod object;
mod scalar;

use regex::Regex;
use url::Url;
use uuid::Uuid;

use super::{TypeSerializerCollection, predicate};
use crate::{ConfigError, ConfigResult, ConfigurationNode, TypeToken, Value};

pub use container::{ListSerializer, MapSerializer};
pub use leaf::FromStrSerializer;
pub use object::ObjectSerializer;
pub use scalar::{BoolSerializer, EnumSerializer, NumberSerializer, StringSerializer};

pub(super) fn defaults() -> TypeSerializerCollection {
    let mut builder = TypeSerializerCollection::builder();
    builder
        .put::<Url>(FromStrSerializer::<Url>::new())
        .put::<Uuid>(FromStrSerializer::<Uuid>::new())
        .put_predicate(predicate::object(), ObjectSerializer)
        .put_predicate(predicate::any_number(), NumberSerializer)
        .put::<String>(StringSerializer)
        .put::<bool>(BoolSerializer)
        .put_predicate(predicate::any_map(), MapSerializer)
        .put_predicate(predicate::any_list(), ListSerializer)
        .put_predicate(predicate::any_enum(), EnumSerializer)
        .put::<Regex>(FromStrSerializer::<Regex>::new());
    builder.build()
}

/// The node's value, which must be a scalar.
fn scalar_of(ty: &TypeToken, node: &ConfigurationNode<'_>) -> ConfigResult<Value> {
    match node.value() {
        Some(value) if value.is_scalar() => Ok(value),
        Some(value) => Err(ConfigError::mapping(
            ty,
            node.path(),
            format!("expected a scalar, found a {}", value.kind_name()),
        )),
        None => Err(ConfigError::mapping(ty, node.path(), "no value present")),
    }
}

fn wrong_type(ty: &TypeToken, node: &ConfigurationNode<'_>) -> ConfigError {
    ConfigError::mapping(ty, node.path(), "value passed for serialization has another type")
}
