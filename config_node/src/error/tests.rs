//! Unit tests for error classification and conversion.

use rstest::rstest;

use super::ConfigError;
use crate::{ConfigType, NodeKey, NodePath};

fn sample_path() -> NodePath {
    NodePath::from(vec![NodeKey::from("server"), NodeKey::from(0_usize)])
}

#[rstest]
#[case::mapping(ConfigError::mapping(&u8::type_token(), sample_path(), "too big"), true)]
#[case::no_serializer(ConfigError::no_serializer(&u8::type_token(), sample_path()), true)]
#[case::structural(ConfigError::structural(sample_path(), "not a list"), false)]
#[case::gathering(ConfigError::gathering(figment::Error::from("boom")), false)]
fn classifies_mapping_failures(#[case] err: ConfigError, #[case] expected: bool) {
    assert_eq!(err.is_mapping(), expected, "unexpected classification for {err:?}");
}

#[rstest]
fn mapping_message_names_path_and_type() {
    let err = ConfigError::mapping(&u8::type_token(), sample_path(), "too big");
    let message = err.to_string();
    assert!(message.contains("server.0"), "missing path in {message}");
    assert!(message.contains("u8"), "missing type in {message}");
    assert_eq!(err.path(), Some(&sample_path()));
}

#[rstest]
fn figment_errors_round_trip() {
    let err = ConfigError::from(figment::Error::from("boom"));
    let back = figment::Error::from(err);
    assert!(back.to_string().contains("boom"));
}

#[rstest]
fn non_figment_errors_convert_to_messages() {
    let err = ConfigError::structural(NodePath::root(), "cannot append to a map");
    let back = figment::Error::from(err);
    assert!(back.to_string().contains("cannot append to a map"));
}
