//! Constructors and classification helpers for `ConfigError`.

use std::error::Error;

use camino::Utf8Path;
use figment::Error as FigmentError;

use super::ConfigError;
use crate::{NodePath, TypeToken};

impl ConfigError {
    /// Construct a mapping error for `ty` at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_node::{ConfigError, ConfigType, NodePath};
    /// let err = ConfigError::mapping(&u8::type_token(), NodePath::root(), "out of range");
    /// assert!(err.is_mapping());
    /// ```
    #[must_use]
    pub fn mapping(ty: &TypeToken, path: NodePath, message: impl Into<String>) -> Self {
        Self::Mapping {
            path,
            type_name: ty.name().to_owned(),
            message: message.into(),
        }
    }

    /// Construct an error reporting that nothing can convert `ty`.
    #[must_use]
    pub fn no_serializer(ty: &TypeToken, path: NodePath) -> Self {
        Self::NoSerializer {
            path,
            type_name: ty.name().to_owned(),
        }
    }

    /// Construct a structural misuse error.
    #[must_use]
    pub fn structural(path: NodePath, message: impl Into<String>) -> Self {
        Self::StructuralMisuse {
            path,
            message: message.into(),
        }
    }

    /// Construct a file error for `path`.
    #[must_use]
    pub fn file(path: &Utf8Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use config_node::ConfigError;
    /// let e = ConfigError::gathering(figment::Error::from("boom"));
    /// assert!(matches!(e, ConfigError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Returns `true` for failures that reconcile a requested type with a
    /// node's content: [`Self::Mapping`] and [`Self::NoSerializer`].
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping { .. } | Self::NoSerializer { .. })
    }

    /// Path of the node involved, when the error concerns a single node.
    #[must_use]
    pub const fn path(&self) -> Option<&NodePath> {
        match self {
            Self::Mapping { path, .. }
            | Self::NoSerializer { path, .. }
            | Self::StructuralMisuse { path, .. } => Some(path),
            Self::File { .. } | Self::Gathering(_) => None,
        }
    }
}
