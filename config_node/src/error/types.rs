//! Primary error enum for configuration tree operations.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::NodePath;

/// Errors that can occur while reading, writing or loading a configuration
/// tree.
///
/// Absence is never an error: reading a virtual node yields `Ok(None)`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A serializer was found but the node's content could not be converted.
    #[error("cannot map '{path}' to {type_name}: {message}")]
    Mapping {
        /// Path of the node being converted.
        path: NodePath,
        /// Name of the requested type.
        type_name: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// No serializer matched the requested type and scalar coercion does not
    /// apply to it.
    #[error("no serializer registered for {type_name} at '{path}'")]
    NoSerializer {
        /// Path of the node being converted.
        path: NodePath,
        /// Name of the requested type.
        type_name: String,
    },

    /// An operation was applied to a node whose shape does not support it.
    #[error("invalid structure at '{path}': {message}")]
    StructuralMisuse {
        /// Path of the offending node.
        path: NodePath,
        /// Description of the misuse.
        message: String,
    },

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported while reading, parsing or writing.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error while extracting configuration from a Figment.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<figment::Error>),
}
