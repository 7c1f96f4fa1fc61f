//! Native payloads stored in and reconstructed from configuration nodes.

use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

/// A scalar, an ordered sequence, or an insertion-ordered mapping.
///
/// Nodes store scalars directly and decompose lists and maps into child
/// nodes; [`crate::ConfigurationNode::value`] reassembles them.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Integer(i64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Insertion-ordered mapping from string keys to values.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns `true` unless this is a list or a map.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Short description of the value's shape, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Returns the string slice for string scalars.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON document into a value.
    ///
    /// `null` has no representation: a top-level `null` yields `None`, `null`
    /// map entries are omitted and `null` list elements are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_node::Value;
    /// use serde_json::json;
    ///
    /// let value = Value::from_json(json!({"a": [1, null, 2], "b": null}));
    /// let expected = Value::from_json(json!({"a": [1, 2]}));
    /// assert_eq!(value, expected);
    /// assert_eq!(Value::from_json(json!(null)), None);
    /// ```
    #[must_use]
    pub fn from_json(json: JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => None,
            JsonValue::Bool(b) => Some(Self::Bool(b)),
            JsonValue::Number(n) => Some(number_to_value(&n)),
            JsonValue::String(s) => Some(Self::String(s)),
            JsonValue::Array(items) => Some(Self::List(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            JsonValue::Object(map) => Some(Self::Map(
                map.into_iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }

    /// Render the value as JSON. Non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Integer(i) => JsonValue::Number(Number::from(*i)),
            Self::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<JsonMap<_, _>>(),
            ),
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "u64 values beyond i64::MAX can only be represented as floats"
)]
fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else if let Some(u) = n.as_u64() {
        Value::Float(u as f64)
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::List(_) | Self::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! integer_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(values: Vec<V>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<IndexMap<String, V>> for Value {
    fn from(map: IndexMap<String, V>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// A single path component: a list position or a map key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// Position within a list.
    Index(usize),
    /// Key within a map.
    Name(String),
}

impl NodeKey {
    /// The key as a list index. Names that parse as integers are accepted.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Name(name) => name.parse().ok(),
        }
    }

    /// The key as a map key. Indices are rendered in decimal.
    #[must_use]
    pub fn to_name(&self) -> String {
        match self {
            Self::Index(i) => i.to_string(),
            Self::Name(name) => name.clone(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for NodeKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for NodeKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for NodeKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for NodeKey {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<&NodeKey> for NodeKey {
    fn from(key: &NodeKey) -> Self {
        key.clone()
    }
}

/// Sequence of keys leading from the root to a node.
///
/// Displays as the keys joined by `.`, or `(root)` for the empty path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<NodeKey>);

impl NodePath {
    /// The empty path addressing the root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Borrow the path's keys.
    #[must_use]
    pub const fn keys(&self) -> &[NodeKey] {
        self.0.as_slice()
    }

    /// Consume the path and return its keys.
    #[must_use]
    pub fn into_keys(self) -> Vec<NodeKey> {
        self.0
    }

    pub(crate) fn push(&mut self, key: NodeKey) {
        self.0.push(key);
    }
}

impl Deref for NodePath {
    type Target = [NodeKey];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<NodeKey>> for NodePath {
    fn from(keys: Vec<NodeKey>) -> Self {
        Self(keys)
    }
}

impl FromIterator<NodeKey> for NodePath {
    fn from_iter<I: IntoIterator<Item = NodeKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}
