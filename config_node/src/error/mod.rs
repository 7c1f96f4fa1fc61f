//! Error types produced by typed access, navigation and loading.

mod constructors;
mod conversions;
mod types;

pub use types::ConfigError;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests;
