//! [`ConfigType`] for the standard library and the bundled leaf types.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use regex::Regex;
use url::Url;
use uuid::Uuid;

use super::{ConfigType, NumberKind, TypeKind, TypeToken};

impl ConfigType for bool {
    fn type_token() -> TypeToken {
        TypeToken::primitive::<Self>(TypeKind::Bool)
    }
}

impl ConfigType for String {
    fn type_token() -> TypeToken {
        TypeToken::primitive::<Self>(TypeKind::String)
    }
}

macro_rules! number_types {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ConfigType for $ty {
                fn type_token() -> TypeToken {
                    TypeToken::primitive::<Self>(TypeKind::Number(NumberKind::$kind))
                }
            }
        )*
    };
}

number_types!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
);

impl<T: ConfigType> ConfigType for Vec<T> {
    fn type_token() -> TypeToken {
        TypeToken::list::<T>()
    }
}

impl<T: ConfigType> ConfigType for BTreeMap<String, T> {
    fn type_token() -> TypeToken {
        TypeToken::map::<Self>()
    }
}

impl<T, S> ConfigType for HashMap<String, T, S>
where
    T: ConfigType,
    S: BuildHasher + Default + 'static,
{
    fn type_token() -> TypeToken {
        TypeToken::map::<Self>()
    }
}

impl<T, S> ConfigType for IndexMap<String, T, S>
where
    T: ConfigType,
    S: BuildHasher + Default + 'static,
{
    fn type_token() -> TypeToken {
        TypeToken::map::<Self>()
    }
}

macro_rules! nominal_types {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConfigType for $ty {
                fn type_token() -> TypeToken {
                    TypeToken::nominal::<Self>()
                }
            }
        )*
    };
}

nominal_types!(Url, Uuid, Regex);
