//! Runtime type descriptors for typed node access.
//!
//! Rust erases nothing at compile time, but serializers are stored in a
//! registry and selected at runtime, so the requested type has to travel as a
//! value. A [`TypeToken`] names the type, records its [`TypeId`] and describes
//! its [`TypeKind`]. Container, enum and object kinds carry small function
//! tables that rebuild concrete values (`Vec<T>`, `BTreeMap<String, T>`, …)
//! from the type-erased pieces serializers produce.
//!
//! Types opt in by implementing [`ConfigType`]:
//!
//! ```rust
//! use config_node::{ConfigType, TypeToken};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Deserialize, Serialize, PartialEq)]
//! struct Server {
//!     host: String,
//!     #[serde(default)]
//!     port: u16,
//! }
//!
//! impl ConfigType for Server {
//!     fn type_token() -> TypeToken {
//!         TypeToken::object::<Self>()
//!     }
//! }
//!
//! assert!(Server::type_token().is_object());
//! assert!(Vec::<Server>::type_token().is_list());
//! ```

mod impls;
mod ops;

use std::any::{Any, TypeId, type_name};
use std::fmt;

use serde::{Serialize, de::DeserializeOwned};

pub use ops::{EnumOps, ListOps, MapOps, ObjectOps};

/// Implemented by every type that can be read from or written to a node.
pub trait ConfigType: Sized + 'static {
    /// Describe `Self` for serializer resolution.
    fn type_token() -> TypeToken;
}

/// Enumerations stored as their variant names.
///
/// Lookup tries an exact match first and falls back to a case-insensitive
/// one.
///
/// ```rust
/// use config_node::{ConfigEnum, ConfigType, TypeToken};
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum Level { Low, High }
///
/// impl ConfigEnum for Level {
///     fn variants() -> &'static [Self] { &[Self::Low, Self::High] }
///     fn name(&self) -> &'static str {
///         match self { Self::Low => "low", Self::High => "high" }
///     }
/// }
///
/// impl ConfigType for Level {
///     fn type_token() -> TypeToken { TypeToken::enumeration::<Self>() }
/// }
/// # assert!(Level::type_token().is_enum());
/// ```
pub trait ConfigEnum: Copy + 'static {
    /// Every variant, in declaration order.
    fn variants() -> &'static [Self];

    /// The name under which a variant is stored.
    fn name(&self) -> &'static str;
}

/// Width and signedness of a numeric type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NumberKind {
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `usize`.
    Usize,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
}

/// Structural category of a [`TypeToken`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum TypeKind {
    /// `bool`.
    Bool,
    /// Any primitive number.
    Number(NumberKind),
    /// `String`.
    String,
    /// A sequence of `element`.
    List {
        /// Element type.
        element: Box<TypeToken>,
        /// Functions rebuilding and exploding the concrete sequence.
        ops: ListOps,
    },
    /// A mapping from string keys to `value`.
    Map {
        /// Value type.
        value: Box<TypeToken>,
        /// Functions rebuilding and exploding the concrete map.
        ops: MapOps,
    },
    /// A [`ConfigEnum`].
    Enum(EnumOps),
    /// A serde-derived structure, the counterpart of an annotated class.
    Object(ObjectOps),
    /// Any other type, matched by identity only.
    Nominal,
}

/// Runtime description of a Rust type.
///
/// Tokens compare equal when they describe the same [`TypeId`].
#[derive(Clone)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

impl TypeToken {
    fn new<T: Any>(kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            kind,
        }
    }

    /// A token matched by identity only, for leaf types such as `Uuid`.
    #[must_use]
    pub fn nominal<T: Any>() -> Self {
        Self::new::<T>(TypeKind::Nominal)
    }

    /// A token for a serde-derived structure.
    #[must_use]
    pub fn object<T>() -> Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        Self::new::<T>(TypeKind::Object(ObjectOps::of::<T>()))
    }

    /// A token for a [`ConfigEnum`].
    #[must_use]
    pub fn enumeration<E: ConfigEnum>() -> Self {
        Self::new::<E>(TypeKind::Enum(EnumOps::of::<E>()))
    }

    pub(crate) fn primitive<T: Any>(kind: TypeKind) -> Self {
        Self::new::<T>(kind)
    }

    pub(crate) fn list<T: ConfigType>() -> Self {
        Self::new::<Vec<T>>(TypeKind::List {
            element: Box::new(T::type_token()),
            ops: ListOps::of::<T>(),
        })
    }

    pub(crate) fn map<M: ops::KeyedCollection>() -> Self
    where
        M::Item: ConfigType,
    {
        Self::new::<M>(TypeKind::Map {
            value: Box::new(M::Item::type_token()),
            ops: MapOps::of::<M>(),
        })
    }

    /// [`TypeId`] of the described type.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified name of the described type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Structural category of the described type.
    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Whether this token describes `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Whether this token describes any number type.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self.kind, TypeKind::Number(_))
    }

    /// Whether this token describes any list type.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.kind, TypeKind::List { .. })
    }

    /// Whether this token describes any map type.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self.kind, TypeKind::Map { .. })
    }

    /// Whether this token describes any [`ConfigEnum`].
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum(_))
    }

    /// Whether this token describes a serde-derived structure.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self.kind, TypeKind::Object(_))
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeToken")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests;
