//! Tree-wide settings shared by every node of one tree.

use uncased::UncasedStr;

use crate::TypeSerializerCollection;

/// Immutable configuration bag for a [`crate::ConfigurationTree`].
///
/// A tree holds its options behind an `Arc`, so every node, and every
/// scratch tree created for typed writes, observes the same instance.
///
/// # Examples
///
/// ```
/// use config_node::{ConfigurationOptions, ConfigurationTree};
///
/// let options = ConfigurationOptions::new()
///     .with_case_insensitive_keys(true)
///     .with_header("Generated file");
/// let tree = ConfigurationTree::with_options(options);
/// assert!(tree.options().case_insensitive_keys());
/// assert_eq!(tree.options().header(), Some("Generated file"));
/// ```
#[derive(Clone, Debug)]
pub struct ConfigurationOptions {
    case_insensitive_keys: bool,
    serializers: TypeSerializerCollection,
    header: Option<String>,
}

impl Default for ConfigurationOptions {
    fn default() -> Self {
        Self {
            case_insensitive_keys: false,
            serializers: TypeSerializerCollection::defaults(),
            header: None,
        }
    }
}

impl ConfigurationOptions {
    /// Case-sensitive keys, the default serializers and no header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare map keys ignoring ASCII case.
    #[must_use]
    pub const fn with_case_insensitive_keys(mut self, enabled: bool) -> Self {
        self.case_insensitive_keys = enabled;
        self
    }

    /// Replace the serializers used for typed access.
    #[must_use]
    pub fn with_serializers(mut self, serializers: TypeSerializerCollection) -> Self {
        self.serializers = serializers;
        self
    }

    /// Set a comment header for loaders that can write one.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Whether map keys compare ignoring ASCII case.
    #[must_use]
    pub const fn case_insensitive_keys(&self) -> bool {
        self.case_insensitive_keys
    }

    /// Serializers used for typed access.
    #[must_use]
    pub const fn serializers(&self) -> &TypeSerializerCollection {
        &self.serializers
    }

    /// Comment header, if any.
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Compare two map keys under these options.
    #[must_use]
    pub fn keys_match(&self, left: &str, right: &str) -> bool {
        if self.case_insensitive_keys {
            UncasedStr::new(left) == UncasedStr::new(right)
        } else {
            left == right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigurationOptions;
    use rstest::rstest;

    #[rstest]
    #[case(false, "Port", "port", false)]
    #[case(true, "Port", "port", true)]
    #[case(true, "port", "ports", false)]
    #[case(false, "port", "port", true)]
    fn key_comparison_follows_case_setting(
        #[case] insensitive: bool,
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: bool,
    ) {
        let options = ConfigurationOptions::new().with_case_insensitive_keys(insensitive);
        assert_eq!(options.keys_match(left, right), expected);
    }

    #[rstest]
    fn defaults_carry_the_builtin_serializers() {
        let options = ConfigurationOptions::default();
        assert!(!options.serializers().is_empty());
        assert_eq!(options.header(), None);
    }
}
