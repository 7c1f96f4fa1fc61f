//! Ready-made predicates for [`super::TypeSerializerCollectionBuilder`].

use std::any::Any;

use crate::TypeToken;

/// Accept exactly `T`.
#[must_use]
pub fn exact<T: Any>() -> impl Fn(&TypeToken) -> bool + Send + Sync + Clone + 'static {
    |ty: &TypeToken| ty.is::<T>()
}

/// Accept every number type.
#[must_use]
pub fn any_number() -> impl Fn(&TypeToken) -> bool + Send + Sync + Clone + 'static {
    |ty: &TypeToken| ty.is_number()
}

/// Accept every `Vec<T>`.
#[must_use]
pub fn any_list() -> impl Fn(&TypeToken) -> bool + Send + Sync + Clone + 'static {
    |ty: &TypeToken| ty.is_list()
}

/// Accept every string-keyed map.
#[must_use]
pub fn any_map() -> impl Fn(&TypeToken) -> bool + Send + Sync + Clone + 'static {
    |ty: &TypeToken| ty.is_map()
}

/// Accept every [`crate::ConfigEnum`].
#[must_use]
pub fn any_enum() -> impl Fn(&TypeToken) -> bool + Send + Sync + Clone + 'static {
    |ty: &TypeToken| ty.is_enum()
}

/// Accept every serde object declared with [`TypeToken::object`].
#[must_use]
pub fn object() -> impl Fn(&TypeToken) -> bool + Send + Sync + Clone + 'static {
    |ty: &TypeToken| ty.is_object()
}
