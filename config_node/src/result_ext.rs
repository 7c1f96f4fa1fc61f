//! Extensions for mapping foreign errors to `ConfigResult` concisely.
//!
//! Serializers routinely call parsers (`FromStr`, `serde_json`) whose errors
//! must surface as [`ConfigError::Mapping`] carrying the node path and the
//! requested type. [`MappingResultExt::or_mapping`] removes the repeated
//! `.map_err(|e| ConfigError::mapping(ty, node.path(), e.to_string()))`.
//!
//! # Examples
//!
//! ```
//! use config_node::{ConfigType, ConfigurationTree, MappingResultExt};
//!
//! let tree = ConfigurationTree::new();
//! let node = tree.root();
//! let ty = u8::type_token();
//! let err = "300".parse::<u8>().or_mapping(&ty, &node).unwrap_err();
//! assert!(err.is_mapping());
//! ```

use std::fmt::Display;

use crate::{ConfigError, ConfigResult, ConfigurationNode, TypeToken};

/// Generic extension converting any `Result<T, E: Display>` into a mapping
/// failure located at a node.
pub trait MappingResultExt<T> {
    /// Convert the error into [`ConfigError::Mapping`] for `ty` at `node`.
    ///
    /// # Errors
    ///
    /// Propagates the original error's message as a mapping error.
    fn or_mapping(self, ty: &TypeToken, node: &ConfigurationNode<'_>) -> ConfigResult<T>;
}

impl<T, E> MappingResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_mapping(self, ty: &TypeToken, node: &ConfigurationNode<'_>) -> ConfigResult<T> {
        self.map_err(|e| ConfigError::mapping(ty, node.path(), e.to_string()))
    }
}
