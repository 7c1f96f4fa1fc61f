//! Fixture trees built from JSON literals.

use config_node::{ConfigResult, ConfigurationOptions, ConfigurationTree, Value};
use serde_json::Value as JsonValue;

/// A tree with default options holding `json`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use test_helpers::tree_from_json;
///
/// let tree = tree_from_json(json!({"a": [1, 2]}));
/// assert_eq!(tree.root().node(["a"]).node([1_usize]).get_int(), Some(2));
/// ```
#[must_use]
pub fn tree_from_json(json: JsonValue) -> ConfigurationTree {
    ConfigurationTree::from_json(json)
}

/// A tree comparing map keys case-insensitively, holding `json`.
///
/// Keys differing only by case collapse; the last one wins.
///
/// # Errors
///
/// Propagates any error from writing the root.
pub fn case_insensitive_tree(json: JsonValue) -> ConfigResult<ConfigurationTree> {
    let mut tree = ConfigurationTree::with_options(
        ConfigurationOptions::new().with_case_insensitive_keys(true),
    );
    if let Some(value) = Value::from_json(json) {
        tree.root_mut().set_value(value)?;
    }
    Ok(tree)
}
