//! Unit tests for type tokens and their function tables.

use std::any::Any;
use std::collections::BTreeMap;

use rstest::rstest;
use serde::{Deserialize, Serialize};

use super::{ConfigEnum, ConfigType, NumberKind, TypeKind, TypeToken};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Fast,
    Safe,
}

impl ConfigEnum for Mode {
    fn variants() -> &'static [Self] {
        &[Self::Fast, Self::Safe]
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Fast => "FAST",
            Self::Safe => "safe",
        }
    }
}

impl ConfigType for Mode {
    fn type_token() -> TypeToken {
        TypeToken::enumeration::<Self>()
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct Limits {
    max: u32,
}

impl ConfigType for Limits {
    fn type_token() -> TypeToken {
        TypeToken::object::<Self>()
    }
}

#[rstest]
fn tokens_compare_by_type_identity() {
    assert_eq!(u8::type_token(), u8::type_token());
    assert_ne!(u8::type_token(), u16::type_token());
    assert_ne!(Vec::<u8>::type_token(), Vec::<u16>::type_token());
    assert!(u8::type_token().is::<u8>());
}

#[rstest]
#[case(i32::type_token(), NumberKind::I32)]
#[case(usize::type_token(), NumberKind::Usize)]
#[case(f64::type_token(), NumberKind::F64)]
fn numbers_record_their_kind(#[case] token: TypeToken, #[case] expected: NumberKind) {
    assert!(token.is_number());
    assert!(matches!(token.kind(), TypeKind::Number(kind) if *kind == expected));
}

#[rstest]
fn list_tokens_collect_and_explode() {
    let token = Vec::<u8>::type_token();
    let TypeKind::List { element, ops } = token.kind() else {
        panic!("expected a list token, got {token:?}");
    };
    assert!(element.is::<u8>());

    let items: Vec<Box<dyn Any>> = vec![Box::new(1_u8), Box::new(2_u8)];
    let collected = ops
        .collect(items)
        .and_then(|boxed| boxed.downcast::<Vec<u8>>().ok())
        .expect("collects u8 elements");
    assert_eq!(*collected, vec![1, 2]);

    let exploded = ops.elements(&*collected).expect("explodes a Vec<u8>");
    assert_eq!(exploded.len(), 2);
    assert_eq!(exploded[1].downcast_ref::<u8>(), Some(&2));
}

#[rstest]
fn list_collection_rejects_foreign_elements() {
    let token = Vec::<u8>::type_token();
    let TypeKind::List { ops, .. } = token.kind() else {
        panic!("expected a list token");
    };
    assert!(ops.collect(vec![Box::new("nope")]).is_none());
    assert!(ops.elements(&7_u8).is_none());
}

#[rstest]
fn map_tokens_collect_and_explode() {
    let token = BTreeMap::<String, bool>::type_token();
    assert!(token.is_map());
    let TypeKind::Map { value, ops } = token.kind() else {
        panic!("expected a map token");
    };
    assert!(value.is::<bool>());

    let entries: Vec<(String, Box<dyn Any>)> = vec![
        ("b".to_owned(), Box::new(false)),
        ("a".to_owned(), Box::new(true)),
    ];
    let map = ops
        .collect(entries)
        .and_then(|boxed| boxed.downcast::<BTreeMap<String, bool>>().ok())
        .expect("collects bool values");
    assert_eq!(map.get("a"), Some(&true));

    let pairs = ops.entries(&*map).expect("explodes the map");
    let keys: Vec<_> = pairs.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, ["a", "b"]);
}

#[rstest]
#[case("FAST", Some(Mode::Fast))]
#[case("fast", Some(Mode::Fast))]
#[case("SAFE", Some(Mode::Safe))]
#[case("slow", None)]
fn enum_tokens_parse_names(#[case] raw: &str, #[case] expected: Option<Mode>) {
    let token = Mode::type_token();
    let TypeKind::Enum(ops) = token.kind() else {
        panic!("expected an enum token");
    };
    let parsed = ops.parse(raw).and_then(|boxed| boxed.downcast::<Mode>().ok());
    assert_eq!(parsed.map(|mode| *mode), expected);
    assert_eq!(ops.names(), ["FAST", "safe"]);
    assert_eq!(ops.name(&Mode::Safe), Some("safe"));
}

#[rstest]
fn object_tokens_bridge_serde() {
    let token = Limits::type_token();
    assert!(token.is_object());
    let TypeKind::Object(ops) = token.kind() else {
        panic!("expected an object token");
    };
    let decoded = ops
        .decode(serde_json::json!({"max": 3}))
        .ok()
        .and_then(|boxed| boxed.downcast::<Limits>().ok())
        .expect("decodes limits");
    assert_eq!(*decoded, Limits { max: 3 });
    assert!(ops.decode(serde_json::json!({})).is_err());

    let encoded = ops.encode(&*decoded).and_then(Result::ok);
    assert_eq!(encoded, Some(serde_json::json!({"max": 3})));
    assert!(ops.encode(&3_u32).is_none());
}

#[rstest]
fn leaf_types_are_nominal() {
    assert!(matches!(url::Url::type_token().kind(), TypeKind::Nominal));
    assert!(uuid::Uuid::type_token().to_string().contains("Uuid"));
}
