//! In-memory configuration trees with typed access.
//!
//! A [`ConfigurationTree`] holds arbitrary nested scalar, list and map data as
//! read from JSON, TOML or any other format. Nodes are addressed by path and
//! may be *virtual*: a path that does not exist yet can be navigated freely and
//! is only materialised once a value is written to it.
//!
//! Typed reads and writes go through a [`TypeSerializerCollection`], an
//! ordered registry that resolves a [`TypeToken`] to the first serializer whose
//! predicate matches.
//!
//! ```rust
//! use config_node::{ConfigurationTree, Value};
//!
//! # fn main() -> config_node::ConfigResult<()> {
//! let mut tree = ConfigurationTree::new();
//! tree.root_mut().node_mut(["server", "port"]).set_value(8080)?;
//!
//! let port: Option<u16> = tree.root().node(["server", "port"]).value_as()?;
//! assert_eq!(port, Some(8080));
//! assert_eq!(
//!     tree.root().node(["server", "port"]).value(),
//!     Some(Value::Integer(8080))
//! );
//! # Ok(())
//! # }
//! ```

pub mod coerce;
mod error;
pub mod loader;
mod node;
mod options;
mod result_ext;
pub mod serialize;
pub mod types;
mod value;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigurationLoader, FileLoader};
pub use node::{ConfigurationNode, ConfigurationNodeMut, ConfigurationTree};
pub use options::ConfigurationOptions;
pub use result_ext::MappingResultExt;
pub use serialize::{
    RegisteredSerializer, TypeSerializer, TypeSerializerCollection,
    TypeSerializerCollectionBuilder,
};
pub use types::{ConfigEnum, ConfigType, NumberKind, TypeKind, TypeToken};
pub use value::{NodeKey, NodePath, Value};

pub use serde_json;
