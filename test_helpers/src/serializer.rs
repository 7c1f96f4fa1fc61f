//! A serializer that records every call before delegating.
//!
//! Useful for asserting which registry entry resolved a type, and how a
//! container serializer recursed into its elements.

use std::any::Any;
use std::sync::Arc;

use config_node::{
    ConfigResult, ConfigurationNode, ConfigurationNodeMut, NodePath, TypeSerializer, TypeToken,
};
use parking_lot::Mutex;

/// Which way a recorded call converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Node to value.
    Deserialize,
    /// Value to node.
    Serialize,
}

/// One recorded call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    /// Conversion direction.
    pub direction: Direction,
    /// Name of the requested type.
    pub type_name: &'static str,
    /// Path of the node involved.
    pub path: NodePath,
}

/// Wraps another serializer and logs each call.
///
/// Clones share the same log, so keep one clone for inspection and register
/// the other.
///
/// # Examples
///
/// ```
/// use config_node::serialize::{NumberSerializer, predicate};
/// use config_node::{ConfigurationOptions, ConfigurationTree, TypeSerializerCollection};
/// use test_helpers::{Direction, RecordingSerializer};
///
/// let recorder = RecordingSerializer::new(NumberSerializer);
/// let serializers = TypeSerializerCollection::defaults()
///     .to_builder()
///     .put_first(predicate::any_number(), recorder.clone())
///     .build();
/// let mut tree = ConfigurationTree::with_options(
///     ConfigurationOptions::new().with_serializers(serializers),
/// );
/// tree.root_mut().set_value(3)?;
/// assert_eq!(tree.root().value_as::<u8>()?, Some(3));
/// assert_eq!(recorder.calls()[0].direction, Direction::Deserialize);
/// # Ok::<(), config_node::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct RecordingSerializer {
    inner: Arc<dyn TypeSerializer>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingSerializer {
    /// Record calls before handing them to `inner`.
    pub fn new(inner: impl TypeSerializer + 'static) -> Self {
        Self {
            inner: Arc::new(inner),
            calls: Arc::default(),
        }
    }

    /// Calls made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Names of the types requested so far, oldest first.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(|call| call.type_name).collect()
    }

    /// Forget every recorded call.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, direction: Direction, ty: &TypeToken, path: NodePath) {
        self.calls.lock().push(Call {
            direction,
            type_name: ty.name(),
            path,
        });
    }
}

impl TypeSerializer for RecordingSerializer {
    fn deserialize(
        &self,
        ty: &TypeToken,
        node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        self.record(Direction::Deserialize, ty, node.path());
        self.inner.deserialize(ty, node)
    }

    fn serialize(
        &self,
        ty: &TypeToken,
        value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        self.record(Direction::Serialize, ty, node.path());
        self.inner.serialize(ty, value, node)
    }
}
