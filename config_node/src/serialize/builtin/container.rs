//! `Vec<T>` and string-keyed maps, recursing into the element type.

use std::any::Any;

use indexmap::IndexMap;

use super::wrong_type;
use crate::{
    ConfigError, ConfigResult, ConfigurationNode, ConfigurationNodeMut, TypeKind,
    TypeSerializer, TypeToken, Value,
};

/// Every `Vec<T>` whose element type is itself resolvable.
///
/// A node holding a single scalar or map reads as a one-element list.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListSerializer;

impl TypeSerializer for ListSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let TypeKind::List { element, ops } = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let items = if node.has_list_children() {
            node.children_list()
                .iter()
                .map(|child| child.deserialize_with(element))
                .collect::<ConfigResult<Vec<_>>>()?
        } else {
            vec![node.deserialize_with(element)?]
        };
        ops.collect(items).ok_or_else(|| {
            ConfigError::mapping(ty, node.path(), format!("elements did not produce {element}"))
        })
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let TypeKind::List { element, ops } = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let items = ops
            .elements(value)
            .ok_or_else(|| wrong_type(ty, &node.as_node()))?;
        node.set_value(Value::List(Vec::new()))?;
        for item in items {
            let mut child = node.appended_node()?;
            child.serialize_with(element, item)?;
        }
        Ok(())
    }
}

/// Every string-keyed map whose value type is itself resolvable.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapSerializer;

impl TypeSerializer for MapSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let TypeKind::Map { value, ops } = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        if !node.has_map_children() {
            return Err(ConfigError::mapping(ty, node.path(), "expected a map"));
        }
        let entries = node
            .children_map()
            .into_iter()
            .map(|(key, child)| child.deserialize_with(value).map(|item| (key, item)))
            .collect::<ConfigResult<Vec<_>>>()?;
        ops.collect(entries).ok_or_else(|| {
            ConfigError::mapping(ty, node.path(), format!("entries did not produce {value}"))
        })
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let TypeKind::Map {
            value: value_type,
            ops,
        } = ty.kind()
        else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let entries = ops
            .entries(value)
            .ok_or_else(|| wrong_type(ty, &node.as_node()))?;
        node.set_value(Value::Map(IndexMap::new()))?;
        for (key, item) in entries {
            node.node_mut([key]).serialize_with(value_type, item)?;
        }
        Ok(())
    }
}
