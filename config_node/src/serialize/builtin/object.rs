//! serde-derived structures, bridged through JSON.

use std::any::Any;

use crate::{
    ConfigError, ConfigResult, ConfigurationNode, ConfigurationNodeMut, MappingResultExt,
    TypeKind, TypeSerializer, TypeToken, Value,
};

use super::wrong_type;

/// Every type declared with [`TypeToken::object`].
///
/// Missing required fields and type mismatches surface as mapping errors;
/// `#[serde(default)]` fields fall back to their defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectSerializer;

impl TypeSerializer for ObjectSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let TypeKind::Object(ops) = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        ops.decode(node.to_json()).or_mapping(ty, node)
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let TypeKind::Object(ops) = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let json = ops
            .encode(value)
            .ok_or_else(|| wrong_type(ty, &node.as_node()))?
            .or_mapping(ty, &node.as_node())?;
        match Value::from_json(json) {
            Some(encoded) => node.set_value(encoded),
            None => {
                node.clear();
                Ok(())
            }
        }
    }
}
