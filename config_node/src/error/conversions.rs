//! Trait-based conversions between external error types and `ConfigError`.

use figment::Error as FigmentError;

use super::ConfigError;

impl From<FigmentError> for ConfigError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(e.into())
    }
}

impl From<ConfigError> for FigmentError {
    /// Allow using `?` in tests and integrations that return `figment::Error`.
    fn from(e: ConfigError) -> Self {
        match e {
            // Preserve the original Figment error (keeps kind, metadata, and sources).
            ConfigError::Gathering(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
