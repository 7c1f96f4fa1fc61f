//! Unit tests for serializer resolution and the built-in serializers.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, anyhow, ensure};
use indexmap::IndexMap;
use regex::Regex;
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;
use uuid::Uuid;

use super::{TypeSerializer, TypeSerializerCollection, predicate};
use crate::{
    ConfigEnum, ConfigError, ConfigResult, ConfigType, ConfigurationNode, ConfigurationNodeMut,
    ConfigurationOptions, ConfigurationTree, TypeToken, Value,
};

/// Answers every request with a fixed label.
struct Tagged(&'static str);

impl TypeSerializer for Tagged {
    fn deserialize(
        &self,
        _ty: &TypeToken,
        _node: &ConfigurationNode<'_>,
    ) -> ConfigResult<Box<dyn Any>> {
        Ok(Box::new(self.0.to_owned()))
    }

    fn serialize(
        &self,
        _ty: &TypeToken,
        _value: &dyn Any,
        node: &mut ConfigurationNodeMut<'_>,
    ) -> ConfigResult<()> {
        node.set_value(self.0)
    }
}

fn label(collection: &TypeSerializerCollection, ty: &TypeToken) -> Result<String> {
    let tree = ConfigurationTree::from_value("ignored");
    let serializer = collection
        .get(ty)
        .ok_or_else(|| anyhow!("nothing registered for {ty}"))?;
    let boxed = serializer.deserialize(ty, &tree.root())?;
    boxed
        .downcast::<String>()
        .map(|text| *text)
        .map_err(|_| anyhow!("serializer did not produce a label"))
}

fn tree_with(serializers: TypeSerializerCollection) -> ConfigurationTree {
    ConfigurationTree::with_options(ConfigurationOptions::new().with_serializers(serializers))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Low,
    High,
}

impl ConfigEnum for Level {
    fn variants() -> &'static [Self] {
        &[Self::Low, Self::High]
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }
}

impl ConfigType for Level {
    fn type_token() -> TypeToken {
        TypeToken::enumeration::<Self>()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
struct Endpoint {
    host: String,
    #[serde(default)]
    port: u16,
}

impl ConfigType for Endpoint {
    fn type_token() -> TypeToken {
        TypeToken::object::<Self>()
    }
}

#[fixture]
fn tree() -> ConfigurationTree {
    ConfigurationTree::new()
}

#[rstest]
fn first_matching_entry_wins() -> Result<()> {
    let mut builder = TypeSerializerCollection::builder();
    builder
        .put_predicate(predicate::any_number(), Tagged("numbers"))
        .put::<u8>(Tagged("bytes"));
    let collection = builder.build();
    ensure!(label(&collection, &u8::type_token())? == "numbers");
    ensure!(label(&collection, &i64::type_token())? == "numbers");
    ensure!(collection.get(&String::type_token()).is_none());
    Ok(())
}

#[rstest]
fn put_first_overrides_existing_entries() -> Result<()> {
    let mut builder = TypeSerializerCollection::builder();
    builder
        .put_predicate(predicate::any_number(), Tagged("numbers"))
        .put_first(predicate::exact::<u8>(), Tagged("bytes"));
    let collection = builder.build();
    ensure!(label(&collection, &u8::type_token())? == "bytes");
    ensure!(label(&collection, &u16::type_token())? == "numbers");
    Ok(())
}

#[rstest]
fn built_collections_ignore_later_registrations() {
    let mut builder = TypeSerializerCollection::builder();
    builder.put::<u8>(Tagged("bytes"));
    let first = builder.build();
    builder.put::<String>(Tagged("strings"));
    let second = builder.build();
    assert_eq!(first.len(), 1);
    assert!(first.get(&String::type_token()).is_none());
    assert_eq!(second.len(), 2);
    assert!(second.get(&String::type_token()).is_some());
}

#[rstest]
fn composed_builders_keep_their_own_entries_first() -> Result<()> {
    let mut parent_builder = TypeSerializerCollection::builder();
    parent_builder
        .put::<u8>(Tagged("parent"))
        .put::<bool>(Tagged("parent"));
    let parent = parent_builder.build();

    let mut child = TypeSerializerCollection::builder();
    child.put::<u8>(Tagged("child")).with(&parent);
    let collection = child.build();

    ensure!(collection.len() == 3);
    ensure!(label(&collection, &u8::type_token())? == "child");
    ensure!(label(&collection, &bool::type_token())? == "parent");
    Ok(())
}

#[rstest]
fn to_builder_extends_without_touching_the_source() {
    let defaults = TypeSerializerCollection::defaults();
    let extended = defaults
        .to_builder()
        .put::<Endpoint>(Tagged("endpoint"))
        .build();
    assert_eq!(extended.len(), defaults.len() + 1);
    assert!(TypeSerializerCollection::default().is_empty());
}

#[rstest]
#[case::url(Url::type_token())]
#[case::uuid(Uuid::type_token())]
#[case::regex(Regex::type_token())]
#[case::number(u32::type_token())]
#[case::string(String::type_token())]
#[case::boolean(bool::type_token())]
#[case::list(Vec::<String>::type_token())]
#[case::map(BTreeMap::<String, u8>::type_token())]
#[case::enumeration(Level::type_token())]
#[case::object(Endpoint::type_token())]
fn defaults_cover_the_builtin_families(#[case] ty: TypeToken) {
    assert!(
        TypeSerializerCollection::defaults().get(&ty).is_some(),
        "no default serializer for {ty}"
    );
}

#[rstest]
fn entries_list_in_resolution_order() -> Result<()> {
    let defaults = TypeSerializerCollection::defaults();
    let url = Url::type_token();
    let position = defaults
        .iter()
        .position(|entry| entry.matches(&url))
        .ok_or_else(|| anyhow!("url not registered"))?;
    ensure!(position == 0, "url resolved at {position}");
    Ok(())
}

#[rstest]
#[case::integer(json!(8080), 8080)]
#[case::numeric_string(json!("8080"), 8080)]
#[case::integral_float(json!(8080.0), 8080)]
fn numbers_read_leniently(#[case] input: serde_json::Value, #[case] expected: u16) -> Result<()> {
    let tree = ConfigurationTree::from_json(input);
    ensure!(tree.root().value_as::<u16>()? == Some(expected));
    Ok(())
}

#[rstest]
#[case::too_large(json!(70000))]
#[case::negative(json!(-1))]
#[case::text(json!("port"))]
#[case::list(json!([1, 2]))]
#[case::huge_float(json!(f64::MAX))]
fn numbers_reject_what_does_not_fit(#[case] input: serde_json::Value) {
    let tree = ConfigurationTree::from_json(input);
    let err = tree.root().value_as::<u16>().err();
    assert!(
        err.as_ref().is_some_and(ConfigError::is_mapping),
        "expected a mapping error, got {err:?}"
    );
}

#[rstest]
#[case::beyond_f32(Value::Float(f64::MAX))]
#[case::below_f32(Value::Float(f64::MIN))]
#[case::text(Value::from("wide"))]
fn floats_reject_what_does_not_fit(#[case] input: Value) {
    let tree = ConfigurationTree::from_value(input);
    let err = tree.root().value_as::<f32>().err();
    assert!(
        err.as_ref().is_some_and(ConfigError::is_mapping),
        "expected a mapping error, got {err:?}"
    );
}

#[rstest]
fn strings_render_any_scalar() -> Result<()> {
    let tree = ConfigurationTree::from_json(json!({"n": 3, "b": true, "s": "x"}));
    let root = tree.root();
    ensure!(root.node(["n"]).value_as::<String>()? == Some("3".to_owned()));
    ensure!(root.node(["b"]).value_as::<String>()? == Some("true".to_owned()));
    ensure!(root.value_as::<String>().is_err());
    Ok(())
}

#[rstest]
#[case(json!("yes"), true)]
#[case(json!("No"), false)]
#[case(json!(0), false)]
fn booleans_accept_common_spellings(
    #[case] input: serde_json::Value,
    #[case] expected: bool,
) -> Result<()> {
    let tree = ConfigurationTree::from_json(input);
    ensure!(tree.root().value_as::<bool>()? == Some(expected));
    Ok(())
}

#[rstest]
fn booleans_reject_other_words() {
    let tree = ConfigurationTree::from_json(json!("maybe"));
    assert!(tree.root().value_as::<bool>().is_err());
}

#[rstest]
fn enums_round_trip_by_name(mut tree: ConfigurationTree) -> Result<()> {
    tree.root_mut().set_value_as(&Level::High)?;
    ensure!(tree.to_json() == json!("HIGH"));
    tree.root_mut().set_value("low")?;
    ensure!(tree.root().value_as::<Level>()? == Some(Level::Low));
    tree.root_mut().set_value("medium")?;
    ensure!(tree.root().value_as::<Level>().is_err());
    Ok(())
}

#[rstest]
fn leaf_types_parse_from_strings(mut tree: ConfigurationTree) -> Result<()> {
    let id = Uuid::nil();
    let url = Url::parse("https://example.com/api")?;
    {
        let mut root = tree.root_mut();
        root.node_mut(["id"]).set_value_as(&id)?;
        root.node_mut(["url"]).set_value_as(&url)?;
        root.node_mut(["pattern"]).set_value("^a+$")?;
    }
    let root = tree.root();
    ensure!(root.node(["id"]).get_string() == Some(id.to_string()));
    ensure!(root.node(["id"]).value_as::<Uuid>()? == Some(id));
    ensure!(root.node(["url"]).value_as::<Url>()? == Some(url));
    let pattern = root
        .node(["pattern"])
        .value_as::<Regex>()?
        .ok_or_else(|| anyhow!("pattern missing"))?;
    ensure!(pattern.is_match("aaa"));
    Ok(())
}

#[rstest]
fn malformed_leaves_are_mapping_errors() {
    let tree = ConfigurationTree::from_json(json!({"id": "nope", "pattern": "("}));
    assert!(tree.root().node(["id"]).value_as::<Uuid>().is_err());
    assert!(tree.root().node(["pattern"]).value_as::<Regex>().is_err());
}

#[rstest]
fn lists_recurse_into_elements(mut tree: ConfigurationTree) -> Result<()> {
    let ports: Vec<u16> = vec![80, 443];
    tree.root_mut().node_mut(["ports"]).set_value_as(&ports)?;
    ensure!(tree.to_json() == json!({"ports": [80, 443]}));
    ensure!(tree.root().node(["ports"]).list_as::<u16>()? == Some(ports));
    Ok(())
}

#[rstest]
fn single_scalars_read_as_one_element_lists() -> Result<()> {
    let tree = ConfigurationTree::from_json(json!({"hosts": "alpha"}));
    let hosts = tree.root().node(["hosts"]).list_as::<String>()?;
    ensure!(hosts == Some(vec!["alpha".to_owned()]));
    Ok(())
}

#[rstest]
fn list_element_failures_surface() {
    let tree = ConfigurationTree::from_json(json!([1, "two"]));
    assert!(tree.root().list_as::<u8>().is_err());
}

#[rstest]
fn maps_recurse_into_values(mut tree: ConfigurationTree) -> Result<()> {
    let weights: IndexMap<String, f64> = IndexMap::from([("a".to_owned(), 0.5)]);
    tree.root_mut().set_value_as(&weights)?;
    ensure!(tree.to_json() == json!({"a": 0.5}));
    let read: Option<HashMap<String, f64>> = tree.root().value_as()?;
    ensure!(read.and_then(|map| map.get("a").copied()) == Some(0.5));
    Ok(())
}

#[rstest]
fn maps_require_map_nodes() {
    let tree = ConfigurationTree::from_json(json!([1]));
    assert!(tree.root().value_as::<BTreeMap<String, u8>>().is_err());
}

#[rstest]
fn objects_go_through_serde(mut tree: ConfigurationTree) -> Result<()> {
    let endpoint = Endpoint {
        host: "db".to_owned(),
        port: 5432,
    };
    tree.root_mut().node_mut(["db"]).set_value_as(&endpoint)?;
    ensure!(tree.to_json() == json!({"db": {"host": "db", "port": 5432}}));
    ensure!(tree.root().node(["db"]).value_as::<Endpoint>()? == Some(endpoint));
    Ok(())
}

#[rstest]
fn objects_missing_required_fields_fail() {
    let tree = ConfigurationTree::from_json(json!({"port": 1}));
    let err = tree.root().value_as::<Endpoint>().err();
    assert!(err.as_ref().is_some_and(ConfigError::is_mapping), "{err:?}");
}

#[rstest]
fn coercion_covers_primitives_without_serializers() -> Result<()> {
    let mut tree = tree_with(TypeSerializerCollection::default());
    tree.root_mut().node_mut(["n"]).set_value_as(&7_u8)?;
    tree.root_mut().node_mut(["s"]).set_value_as(&"x".to_owned())?;
    ensure!(tree.root().node(["n"]).value_as::<u8>()? == Some(7));
    ensure!(tree.root().node(["s"]).value_as::<String>()? == Some("x".to_owned()));
    Ok(())
}

#[rstest]
fn structured_types_need_a_serializer() {
    let mut tree = tree_with(TypeSerializerCollection::default());
    let result = tree.root_mut().set_value_as(&vec![1_u8]);
    assert!(
        matches!(result, Err(ConfigError::NoSerializer { .. })),
        "unexpected {result:?}"
    );
    assert!(tree.root().value().is_none());
}

#[rstest]
fn failed_writes_leave_the_node_untouched() -> Result<()> {
    let mut tree = ConfigurationTree::new();
    tree.root_mut().node_mut(["keep"]).set_value(1)?;

    let levels: Vec<Level> = vec![Level::Low];
    let result = tree
        .root_mut()
        .node_mut(["keep"])
        .set_value_with(&Vec::<u16>::type_token(), &levels);
    ensure!(result.is_err());
    ensure!(tree.to_json() == json!({"keep": 1}));
    Ok(())
}
