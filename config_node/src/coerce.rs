//! Lenient conversions from stored scalars to primitive types.
//!
//! Loaders hand the tree whatever scalar type their format produced, so a
//! port written as `"8080"` in one file and `8080` in another must read back
//! the same way. Every function here is total: `None` means "not
//! representable", never "absent".

use std::any::Any;

use crate::{NumberKind, TypeKind, TypeToken, Value};

// Bounds of the range of f64 values that convert to i64 without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Render a scalar as a string. Lists and maps have no string form.
///
/// # Examples
///
/// ```
/// use config_node::{Value, coerce::as_string};
/// assert_eq!(as_string(&Value::Integer(7)).as_deref(), Some("7"));
/// assert_eq!(as_string(&Value::List(vec![])), None);
/// ```
#[must_use]
pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) => Some(value.to_string()),
        Value::List(_) | Value::Map(_) => None,
    }
}

/// Interpret a scalar as a boolean.
///
/// Strings are matched case-insensitively against `true`/`t`/`yes`/`y`/`1`
/// and `false`/`f`/`no`/`n`/`0`; numbers are `true` when non-zero.
#[must_use]
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Integer(i) => Some(*i != 0),
        Value::Float(f) => Some(*f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        Value::List(_) | Value::Map(_) => None,
    }
}

/// Interpret a scalar as an `i32`. Integral floats are accepted.
#[must_use]
pub fn as_int(value: &Value) -> Option<i32> {
    as_long(value).and_then(|wide| i32::try_from(wide).ok())
}

/// Interpret a scalar as an `i64`. Integral floats are accepted.
#[must_use]
pub fn as_long(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) => float_to_long(*f),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_long))
        }
        Value::Bool(_) | Value::List(_) | Value::Map(_) => None,
    }
}

/// Interpret a scalar as an `f32`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "narrowing to f32 is the point of this accessor"
)]
#[must_use]
pub fn as_float(value: &Value) -> Option<f32> {
    as_double(value).map(|f| f as f32)
}

/// Interpret a scalar as an `f64`.
#[expect(
    clippy::cast_precision_loss,
    reason = "large integers read as floats lose precision by definition"
)]
#[must_use]
pub fn as_double(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(_) | Value::List(_) | Value::Map(_) => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "only integral, in-range values reach the cast"
)]
fn float_to_long(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&f)).then(|| f as i64)
}

fn boxed<T: Any>(value: T) -> Box<dyn Any> {
    Box::new(value)
}

fn narrow<T: TryFrom<i64> + Any>(wide: i64) -> Option<Box<dyn Any>> {
    T::try_from(wide).ok().map(boxed)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "finite values that overflow to infinity are rejected"
)]
fn narrow_float(wide: f64) -> Option<Box<dyn Any>> {
    let narrowed = wide as f32;
    (narrowed.is_finite() || !wide.is_finite()).then(|| boxed(narrowed))
}

/// Convert a scalar into the numeric type described by `kind`.
///
/// Returns `None` when the scalar is not numeric or out of range.
pub(crate) fn number_to(kind: NumberKind, value: &Value) -> Option<Box<dyn Any>> {
    match kind {
        NumberKind::F32 => as_double(value).and_then(narrow_float),
        NumberKind::F64 => as_double(value).map(boxed),
        integral => {
            let wide = as_long(value)?;
            match integral {
                NumberKind::I8 => narrow::<i8>(wide),
                NumberKind::I16 => narrow::<i16>(wide),
                NumberKind::I32 => narrow::<i32>(wide),
                NumberKind::U8 => narrow::<u8>(wide),
                NumberKind::U16 => narrow::<u16>(wide),
                NumberKind::U32 => narrow::<u32>(wide),
                NumberKind::U64 => narrow::<u64>(wide),
                NumberKind::Usize => narrow::<usize>(wide),
                NumberKind::I64 | NumberKind::F32 | NumberKind::F64 => Some(boxed(wide)),
            }
        }
    }
}

/// Convert a native number described by `kind` into a stored scalar.
///
/// Returns `None` when `value` is not of the described type or does not fit
/// in an `i64`.
pub(crate) fn number_from(kind: NumberKind, value: &dyn Any) -> Option<Value> {
    match kind {
        NumberKind::I8 => value.downcast_ref::<i8>().map(|v| Value::from(*v)),
        NumberKind::I16 => value.downcast_ref::<i16>().map(|v| Value::from(*v)),
        NumberKind::I32 => value.downcast_ref::<i32>().map(|v| Value::from(*v)),
        NumberKind::I64 => value.downcast_ref::<i64>().map(|v| Value::from(*v)),
        NumberKind::U8 => value.downcast_ref::<u8>().map(|v| Value::from(*v)),
        NumberKind::U16 => value.downcast_ref::<u16>().map(|v| Value::from(*v)),
        NumberKind::U32 => value.downcast_ref::<u32>().map(|v| Value::from(*v)),
        NumberKind::U64 => value
            .downcast_ref::<u64>()
            .and_then(|v| i64::try_from(*v).ok())
            .map(Value::Integer),
        NumberKind::Usize => value
            .downcast_ref::<usize>()
            .and_then(|v| i64::try_from(*v).ok())
            .map(Value::Integer),
        NumberKind::F32 => value.downcast_ref::<f32>().map(|v| Value::from(*v)),
        NumberKind::F64 => value.downcast_ref::<f64>().map(|v| Value::from(*v)),
    }
}

/// Best-effort conversion of a scalar into a primitive type.
///
/// Used when no serializer is registered for `ty`. Only booleans, numbers and
/// strings participate.
pub(crate) fn coerce_to(ty: &TypeToken, value: &Value) -> Option<Box<dyn Any>> {
    match ty.kind() {
        TypeKind::Bool => as_bool(value).map(boxed),
        TypeKind::Number(kind) => number_to(*kind, value),
        TypeKind::String => as_string(value).map(boxed),
        _ => None,
    }
}

/// Reverse of [`coerce_to`]: store a primitive as a scalar.
pub(crate) fn scalar_from(ty: &TypeToken, value: &dyn Any) -> Option<Value> {
    match ty.kind() {
        TypeKind::Bool => value.downcast_ref::<bool>().map(|b| Value::Bool(*b)),
        TypeKind::Number(kind) => number_from(*kind, value),
        TypeKind::String => value
            .downcast_ref::<String>()
            .map(|s| Value::String(s.clone())),
        _ => None,
    }
}

/// Whether [`coerce_to`] can handle `ty` at all.
pub(crate) const fn is_coercible(ty: &TypeToken) -> bool {
    matches!(
        ty.kind(),
        TypeKind::Bool | TypeKind::Number(_) | TypeKind::String
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigType;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Bool(true), Some("true"))]
    #[case(Value::Integer(-3), Some("-3"))]
    #[case(Value::Float(2.5), Some("2.5"))]
    #[case(Value::from("plain"), Some("plain"))]
    #[case(Value::List(vec![]), None)]
    fn strings(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(as_string(&value).as_deref(), expected);
    }

    #[rstest]
    #[case(Value::Bool(false), Some(false))]
    #[case(Value::from("YES"), Some(true))]
    #[case(Value::from(" n "), Some(false))]
    #[case(Value::from("1"), Some(true))]
    #[case(Value::Integer(0), Some(false))]
    #[case(Value::Integer(5), Some(true))]
    #[case(Value::from("maybe"), None)]
    fn booleans(#[case] value: Value, #[case] expected: Option<bool>) {
        assert_eq!(as_bool(&value), expected);
    }

    #[rstest]
    #[case(Value::Integer(42), Some(42))]
    #[case(Value::Float(3.0), Some(3))]
    #[case(Value::Float(3.5), None)]
    #[case(Value::from(" 17 "), Some(17))]
    #[case(Value::from("4.0"), Some(4))]
    #[case(Value::from("four"), None)]
    #[case(Value::Integer(i64::from(i32::MAX) + 1), None)]
    #[case(Value::Bool(true), None)]
    fn ints(#[case] value: Value, #[case] expected: Option<i32>) {
        assert_eq!(as_int(&value), expected);
    }

    #[rstest]
    fn longs_reject_non_finite_floats() {
        assert_eq!(as_long(&Value::Float(f64::INFINITY)), None);
        assert_eq!(as_long(&Value::Float(1e300)), None);
        assert_eq!(as_long(&Value::Integer(i64::MAX)), Some(i64::MAX));
    }

    #[rstest]
    #[case(Value::Integer(2), Some(2.0))]
    #[case(Value::from("0.25"), Some(0.25))]
    #[case(Value::from("x"), None)]
    fn doubles(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(as_double(&value), expected);
    }

    #[rstest]
    fn floats_narrow_doubles() {
        assert_eq!(as_float(&Value::Float(0.5)), Some(0.5_f32));
    }

    #[rstest]
    fn number_to_respects_target_range() {
        let fits = number_to(NumberKind::U8, &Value::Integer(255))
            .and_then(|b| b.downcast::<u8>().ok());
        assert_eq!(fits.map(|b| *b), Some(255));
        assert!(number_to(NumberKind::U8, &Value::Integer(256)).is_none());
        assert!(number_to(NumberKind::U32, &Value::Integer(-1)).is_none());
    }

    #[rstest]
    fn f32_rejects_doubles_beyond_its_range() {
        assert!(number_to(NumberKind::F32, &Value::Float(f64::MAX)).is_none());
        assert!(number_to(NumberKind::F32, &Value::Float(f64::MIN)).is_none());
        let inf = number_to(NumberKind::F32, &Value::Float(f64::INFINITY))
            .and_then(|b| b.downcast::<f32>().ok());
        assert_eq!(inf.map(|b| *b), Some(f32::INFINITY));
        let half = number_to(NumberKind::F32, &Value::from("0.5"))
            .and_then(|b| b.downcast::<f32>().ok());
        assert_eq!(half.map(|b| *b), Some(0.5));
    }

    #[rstest]
    fn number_from_rejects_unrepresentable_u64() {
        assert_eq!(number_from(NumberKind::U64, &7_u64), Some(Value::Integer(7)));
        assert_eq!(number_from(NumberKind::U64, &u64::MAX), None);
        assert_eq!(number_from(NumberKind::U64, &7_i32), None);
    }

    #[rstest]
    fn coercion_only_covers_primitives() {
        assert!(is_coercible(&bool::type_token()));
        assert!(!is_coercible(&Vec::<bool>::type_token()));
        let text = coerce_to(&String::type_token(), &Value::Integer(9))
            .and_then(|b| b.downcast::<String>().ok());
        assert_eq!(text.as_deref().map(String::as_str), Some("9"));
        assert_eq!(
            scalar_from(&bool::type_token(), &true),
            Some(Value::Bool(true))
        );
    }
}
