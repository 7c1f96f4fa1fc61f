//! Numbers, strings, booleans and enums.

use std::any::Any;

use super::{scalar_of, wrong_type};
use crate::coerce;
use crate::{
    ConfigError, ConfigResult, ConfigurationNode, ConfigurationNodeMut, TypeKind,
    TypeSerializer, TypeToken,
};

/// Every primitive number type, with range checks in both directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberSerializer;

impl TypeSerializer for NumberSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let TypeKind::Number(kind) = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let value = scalar_of(ty, node)?;
        coerce::number_to(*kind, &value).ok_or_else(|| {
            ConfigError::mapping(ty, node.path(), format!("'{value}' is not a valid {ty}"))
        })
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let TypeKind::Number(kind) = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let scalar = coerce::number_from(*kind, value).ok_or_else(|| {
            ConfigError::mapping(ty, node.path(), "number is not representable as a 64-bit integer")
        })?;
        node.set_value(scalar)
    }
}

/// `String`, from any scalar.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringSerializer;

impl TypeSerializer for StringSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let value = scalar_of(ty, node)?;
        Ok(Box::new(value.to_string()))
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let text = value
            .downcast_ref::<String>()
            .ok_or_else(|| wrong_type(ty, &node.as_node()))?;
        node.set_value(text.as_str())
    }
}

/// `bool`, accepting the usual spellings of yes and no.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoolSerializer;

impl TypeSerializer for BoolSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let value = scalar_of(ty, node)?;
        let flag = coerce::as_bool(&value).ok_or_else(|| {
            ConfigError::mapping(ty, node.path(), format!("'{value}' is not a boolean"))
        })?;
        Ok(Box::new(flag))
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let flag = value
            .downcast_ref::<bool>()
            .copied()
            .ok_or_else(|| wrong_type(ty, &node.as_node()))?;
        node.set_value(flag)
    }
}

/// Every [`crate::ConfigEnum`], stored by variant name.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumSerializer;

impl TypeSerializer for EnumSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        let TypeKind::Enum(ops) = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let value = scalar_of(ty, node)?;
        let raw = value.to_string();
        ops.parse(&raw).ok_or_else(|| {
            ConfigError::mapping(
                ty,
                node.path(),
                format!("'{raw}' is not one of {}", ops.names().join(", ")),
            )
        })
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        let TypeKind::Enum(ops) = ty.kind() else {
            return Err(ConfigError::no_serializer(ty, node.path()));
        };
        let name = ops
            .name(value)
            .ok_or_else(|| wrong_type(ty, &node.as_node()))?;
        node.set_value(name)
    }
}
