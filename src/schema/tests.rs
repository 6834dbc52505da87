//! Schema inference tests

use super::*;
use crate::config::BuildOptions;
use crate::error::Error;
use crate::registry::StructRegistry;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn build(value: serde_json::Value) -> (StructRegistry, Record) {
    build_with(value, BuildOptions::default())
}

fn build_with(value: serde_json::Value, options: BuildOptions) -> (StructRegistry, Record) {
    let mut registry = StructRegistry::new();
    let root = SchemaBuilder::new(&mut registry, options)
        .build(&Node::from(value))
        .unwrap();
    (registry, root)
}

fn build_err(value: serde_json::Value) -> Error {
    let mut registry = StructRegistry::new();
    SchemaBuilder::new(&mut registry, BuildOptions::default())
        .build(&Node::from(value))
        .unwrap_err()
}

fn order(registry: &StructRegistry) -> Vec<String> {
    registry.iter().map(|r| r.unwrap().name.clone()).collect()
}

fn addr(field: Field) -> Record {
    Record::new("Addr", 1).with_field(field).unwrap()
}

// ============================================================================
// Classification
// ============================================================================

#[test_case(Scalar::Bool(true), Some(FieldKind::Boolean) ; "bool")]
#[test_case(Scalar::I8(1), Some(FieldKind::Integer) ; "i8 widens")]
#[test_case(Scalar::I16(1), Some(FieldKind::Integer) ; "i16 widens")]
#[test_case(Scalar::I32(1), Some(FieldKind::Integer) ; "i32")]
#[test_case(Scalar::U8(1), Some(FieldKind::Integer) ; "u8 widens")]
#[test_case(Scalar::U16(1), Some(FieldKind::Integer) ; "u16 widens")]
#[test_case(Scalar::U32(1), Some(FieldKind::Integer64) ; "u32 widens to 64 bit")]
#[test_case(Scalar::I64(1), Some(FieldKind::Integer64) ; "i64")]
#[test_case(Scalar::U64(7), Some(FieldKind::Integer64) ; "u64 in range")]
#[test_case(Scalar::U64(u64::MAX), None ; "u64 out of range")]
#[test_case(Scalar::F32(1.5), Some(FieldKind::Float) ; "f32 widens")]
#[test_case(Scalar::F64(1.5), Some(FieldKind::Float) ; "f64")]
#[test_case(Scalar::String("x".into()), Some(FieldKind::String) ; "string")]
#[test_case(Scalar::Null, None ; "null")]
#[test_case(Scalar::Bytes(vec![0xde, 0xad]), None ; "bytes")]
fn test_classify_scalar(scalar: Scalar, expected: Option<FieldKind>) {
    assert_eq!(classify(&Node::Scalar(scalar)), expected);
}

#[test]
fn test_classify_composites() {
    assert_eq!(classify(&Node::from(json!({"a": 1}))), Some(FieldKind::Record));
    assert_eq!(classify(&Node::from(json!([1]))), Some(FieldKind::List));
}

#[test]
fn test_json_numbers() {
    assert_eq!(Node::from(json!(1)), Node::Scalar(Scalar::I32(1)));
    assert_eq!(
        Node::from(json!(5_000_000_000_i64)),
        Node::Scalar(Scalar::I64(5_000_000_000))
    );
    assert_eq!(Node::from(json!(u64::MAX)), Node::Scalar(Scalar::U64(u64::MAX)));
    assert_eq!(Node::from(json!(2.5)), Node::Scalar(Scalar::F64(2.5)));
}

#[test]
fn test_field_kind_primitive() {
    for kind in [
        FieldKind::Boolean,
        FieldKind::Integer,
        FieldKind::Integer64,
        FieldKind::Float,
        FieldKind::String,
    ] {
        assert!(kind.is_primitive());
    }
    assert!(FieldKind::List.is_composite());
    assert!(FieldKind::Record.is_composite());
}

// ============================================================================
// Fields and Grow
// ============================================================================

#[test]
fn test_field_equality_ignores_annotations() {
    let a = Field::primitive("zip", FieldKind::Integer).with_annotation("json:\"zip\"");
    let b = Field::primitive("zip", FieldKind::Integer);
    assert_eq!(a, b);

    assert_ne!(a, Field::primitive("zip", FieldKind::String));
    assert_ne!(
        Field::list("tags", ListShape::primitive(FieldKind::String, 1)),
        Field::list("tags", ListShape::primitive(FieldKind::String, 2))
    );
    assert_ne!(
        Field::list("tags", ListShape::primitive(FieldKind::String, 1)),
        Field::list("tags", ListShape::primitive(FieldKind::Integer, 1))
    );
    assert_ne!(Field::record("owner", "User"), Field::record("owner", "Person"));
}

#[test]
fn test_grow_idempotent() {
    let record = Record::new("Addr", 1)
        .with_field(Field::primitive("zip", FieldKind::Integer).with_annotation("json:\"zip\""))
        .unwrap()
        .with_field(Field::record("geo", "geo"))
        .unwrap();

    let grown = record.grow(&record.clone()).unwrap();
    assert_eq!(grown.name, record.name);
    assert_eq!(grown.level, record.level);
    assert_eq!(grown.fields, record.fields);
    assert_eq!(
        grown.field("zip").unwrap().annotations,
        record.field("zip").unwrap().annotations
    );
}

#[test]
fn test_grow_field_mismatch() {
    let target = addr(Field::primitive("zip", FieldKind::Integer));
    let err = target
        .grow(&addr(Field::primitive("zip", FieldKind::String)))
        .unwrap_err();

    match err {
        Error::FieldMismatch {
            record,
            existing,
            incoming,
        } => {
            assert_eq!(record, "Addr");
            assert_eq!(existing, "zip: Integer");
            assert_eq!(incoming, "zip: String");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The target is untouched
    assert_eq!(target.fields.len(), 1);
}

#[test]
fn test_grow_adds_fields() {
    let target = addr(Field::primitive("zip", FieldKind::Integer));
    let grown = target
        .grow(&addr(Field::primitive("country", FieldKind::String)))
        .unwrap();

    assert!(grown.field("zip").is_some());
    assert!(grown.field("country").is_some());
    assert_eq!(grown.fields.len(), 2);
}

#[test]
fn test_grow_failure_leaves_no_partial_state() {
    let target = addr(Field::primitive("zip", FieldKind::Integer));
    let incoming = Record::new("Addr", 1)
        .with_field(Field::primitive("city", FieldKind::String))
        .unwrap()
        .with_field(Field::primitive("zip", FieldKind::Float))
        .unwrap();

    assert!(target.grow(&incoming).is_err());
    assert!(target.field("city").is_none());
}

#[test]
fn test_grow_unions_annotations() {
    let target = addr(Field::primitive("zip", FieldKind::Integer).with_annotation("json:\"zip\""));
    let incoming = addr(Field::primitive("zip", FieldKind::Integer).with_annotation("xml:\"zip\""));

    let grown = target.grow(&incoming).unwrap();
    let annotations: Vec<_> = grown.field("zip").unwrap().annotations.iter().collect();
    assert_eq!(annotations, ["json:\"zip\"", "xml:\"zip\""]);
}

#[test]
fn test_grow_requires_same_name() {
    let err = Record::new("Addr", 0)
        .grow(&Record::new("User", 0))
        .unwrap_err();
    assert!(matches!(err, Error::RecordIdentity { .. }));
}

#[test]
fn test_grow_keeps_deeper_level() {
    let grown = Record::new("Addr", 1).grow(&Record::new("Addr", 3)).unwrap();
    assert_eq!(grown.level, 3);
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_build_end_to_end() {
    let (registry, root) = build(json!({
        "name": "a",
        "tags": ["x", "y"],
        "addr": {"zip": 1}
    }));

    assert_eq!(registry.len(), 2);
    assert_eq!(order(&registry), ["addr", "Root"]);

    assert_eq!(root.name, "Root");
    assert_eq!(root.level, 0);
    assert_eq!(root.fields.len(), 3);
    assert_eq!(
        root.field("name").unwrap(),
        &Field::primitive("name", FieldKind::String)
    );
    assert_eq!(
        root.field("tags").unwrap(),
        &Field::list("tags", ListShape::primitive(FieldKind::String, 1))
    );
    assert_eq!(root.field("addr").unwrap(), &Field::record("addr", "addr"));

    let addr = registry.get("addr").unwrap();
    assert_eq!(addr.level, 1);
    assert_eq!(
        addr.field("zip").unwrap(),
        &Field::primitive("zip", FieldKind::Integer)
    );
}

#[test]
fn test_build_annotations() {
    let (_, root) = build(json!({"userName": "a"}));
    let annotations: Vec<_> = root.field("userName").unwrap().annotations.iter().collect();
    assert_eq!(annotations, ["json:\"userName\""]);

    let (_, root) = build_with(
        json!({"userName": "a"}),
        BuildOptions::default().with_annotations(false),
    );
    assert!(root.field("userName").unwrap().annotations.is_empty());
}

#[test]
fn test_build_custom_root_name() {
    let (registry, root) = build_with(
        json!({"id": 1}),
        BuildOptions::default().with_root_name("Payload"),
    );
    assert_eq!(root.name, "Payload");
    assert!(registry.contains("Payload"));
}

#[test]
fn test_list_homogeneous() {
    let (_, root) = build(json!({"xs": [1, 2, 3]}));
    let field = root.field("xs").unwrap();
    assert_eq!(field.kind, FieldKind::List);
    assert_eq!(field.element, Some(FieldKind::Integer));
    assert_eq!(field.nesting, 1);
    assert_eq!(field.reference, None);
}

#[test]
fn test_list_heterogeneous() {
    let err = build_err(json!({"xs": [1, 2, "x"]}));
    match err {
        Error::HeterogeneousList {
            path,
            expected,
            found,
        } => {
            assert_eq!(path, "Root.xs");
            assert_eq!(expected, "Integer");
            assert_eq!(found, "String");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_list_mixed_integer_widths_is_heterogeneous() {
    let err = build_err(json!({"xs": [1, 5_000_000_000_i64]}));
    assert!(matches!(err, Error::HeterogeneousList { .. }));
}

#[test]
fn test_handle_list_directly() {
    let mut registry = StructRegistry::new();
    let mut builder = SchemaBuilder::new(&mut registry, BuildOptions::default());
    let root = Trace::root("Root");
    let trace = root.list_field("xs");

    let items = [1, 2, 3].map(|i| Node::Scalar(Scalar::I32(i)));
    let shape = builder.handle_list(&items, &trace).unwrap().unwrap();
    assert_eq!(shape, ListShape::primitive(FieldKind::Integer, 1));

    let mixed = vec![
        Node::Scalar(Scalar::I32(1)),
        Node::Scalar(Scalar::String("x".into())),
    ];
    assert!(matches!(
        builder.handle_list(&mixed, &trace),
        Err(Error::HeterogeneousList { .. })
    ));
}

#[test]
fn test_nested_lists() {
    let (_, root) = build(json!({"matrix": [[1, 2], [3]], "cube": [[[1.5]]]}));

    let matrix = root.field("matrix").unwrap();
    assert_eq!(matrix.element, Some(FieldKind::Integer));
    assert_eq!(matrix.nesting, 2);

    let cube = root.field("cube").unwrap();
    assert_eq!(cube.element, Some(FieldKind::Float));
    assert_eq!(cube.nesting, 3);
}

#[test]
fn test_nested_lists_with_different_shapes() {
    let err = build_err(json!({"matrix": [[1], ["x"]]}));
    match err {
        Error::HeterogeneousList { path, .. } => assert_eq!(path, "Root.matrix[]"),
        other => panic!("unexpected error: {other}"),
    }

    let err = build_err(json!({"ragged": [[1], [[1]]]}));
    assert!(matches!(err, Error::HeterogeneousList { .. }));
}

#[test]
fn test_list_of_records_is_grown() {
    let (registry, root) = build(json!({
        "items": [
            {"id": 1, "name": "first"},
            {"id": 2, "price": 9.5}
        ]
    }));

    let field = root.field("items").unwrap();
    assert_eq!(field.kind, FieldKind::List);
    assert_eq!(field.element, Some(FieldKind::Record));
    assert_eq!(field.reference.as_deref(), Some("items"));
    assert_eq!(field.nesting, 1);

    let items = registry.get("items").unwrap();
    let names: Vec<_> = items.fields.keys().map(String::as_str).collect();
    assert_eq!(names, ["id", "name", "price"]);
    // List elements stay on the level of the list field
    assert_eq!(items.level, 0);
    assert_eq!(order(&registry), ["items", "Root"]);
}

#[test]
fn test_list_of_records_with_conflict() {
    let err = build_err(json!({"items": [{"id": 1}, {"id": "one"}]}));
    assert!(matches!(err, Error::FieldMismatch { ref record, .. } if record == "items"));
}

#[test]
fn test_list_of_lists_of_records() {
    let (registry, root) = build(json!({"grid": [[{"x": 1}], [{"y": 2}]]}));

    let field = root.field("grid").unwrap();
    assert_eq!(field.reference.as_deref(), Some("grid"));
    assert_eq!(field.nesting, 2);

    let grid = registry.get("grid").unwrap();
    assert!(grid.field("x").is_some());
    assert!(grid.field("y").is_some());
}

#[test]
fn test_records_nested_in_list_elements() {
    let (registry, _) = build(json!({
        "users": [
            {"address": {"city": "a"}},
            {"address": {"zip": 1}}
        ]
    }));

    let address = registry.get("address").unwrap();
    assert!(address.field("city").is_some());
    assert!(address.field("zip").is_some());
    assert_eq!(address.level, 1);
    assert_eq!(order(&registry), ["address", "users", "Root"]);
}

#[test]
fn test_same_name_at_different_depths_is_merged_and_promoted() {
    let (registry, root) = build(json!({
        "a_owner": {"owner": {"id": 1}},
        "owner": {"name": "x"}
    }));

    let owner = registry.get("owner").unwrap();
    assert!(owner.field("id").is_some());
    assert!(owner.field("name").is_some());
    assert_eq!(owner.level, 2);
    assert_eq!(root.field("owner").unwrap(), &Field::record("owner", "owner"));
    assert_eq!(order(&registry), ["owner", "a_owner", "Root"]);
}

#[test]
fn test_same_name_with_conflicting_shapes() {
    let err = build_err(json!({
        "a": {"owner": {"id": 1}},
        "b": {"owner": {"id": "x"}}
    }));
    assert!(matches!(err, Error::FieldMismatch { ref record, .. } if record == "owner"));
}

#[test]
fn test_unique_names_split_conflicting_shapes() {
    let (registry, _) = build_with(
        json!({
            "a": {"owner": {"id": 1}},
            "b": {"owner": {"id": "x"}}
        }),
        BuildOptions::default().with_unique_names(true),
    );

    assert_eq!(registry.get("a").unwrap().field("owner").unwrap().reference.as_deref(), Some("owner"));
    assert_eq!(registry.get("b").unwrap().field("owner").unwrap().reference.as_deref(), Some("owner_1"));
    assert_eq!(
        registry.get("owner_1").unwrap().field("id").unwrap().kind,
        FieldKind::String
    );
}

#[test]
fn test_unique_names_keep_list_elements_together() {
    let (registry, root) = build_with(
        json!({"items": [{"meta": {"a": 1}}, {"meta": {"b": 2}}]}),
        BuildOptions::default().with_unique_names(true),
    );

    assert_eq!(registry.len(), 3);
    let meta = registry.get("meta").unwrap();
    assert_eq!(meta.fields.len(), 2);
    assert_eq!(root.field("items").unwrap().reference.as_deref(), Some("items"));
}

#[test]
fn test_unique_names_across_builds() {
    let mut registry = StructRegistry::new();
    let options = BuildOptions::default().with_unique_names(true);

    let first = SchemaBuilder::new(&mut registry, options.clone())
        .build(&Node::from(json!({"id": 1})))
        .unwrap();
    let second = SchemaBuilder::new(&mut registry, options)
        .build(&Node::from(json!({"id": "x"})))
        .unwrap();

    assert_eq!(first.name, "Root");
    assert_eq!(second.name, "Root_1");
}

#[test]
fn test_merging_across_builds() {
    let mut registry = StructRegistry::new();
    SchemaBuilder::new(&mut registry, BuildOptions::default())
        .build(&Node::from(json!({"id": 1})))
        .unwrap();
    let root = SchemaBuilder::new(&mut registry, BuildOptions::default())
        .build(&Node::from(json!({"name": "x"})))
        .unwrap();

    assert_eq!(root.fields.len(), 2);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_empty_list_is_skipped() {
    let (_, root) = build(json!({"tags": [], "id": 1}));
    assert!(root.field("tags").is_none());
    assert!(root.field("id").is_some());
}

#[test]
fn test_empty_inner_lists_are_ignored() {
    let (_, root) = build(json!({"matrix": [[], [1]]}));
    let field = root.field("matrix").unwrap();
    assert_eq!(field.element, Some(FieldKind::Integer));
    assert_eq!(field.nesting, 2);
}

#[test]
fn test_empty_record() {
    let (registry, root) = build(json!({"meta": {}}));
    assert!(registry.get("meta").unwrap().is_empty());
    assert_eq!(root.field("meta").unwrap().kind, FieldKind::Record);
}

#[test]
fn test_dotted_keys_are_separate_locations() {
    let (registry, root) = build(json!({
        "a": {"b": {"x": 1}},
        "a.b": {"x": "s"}
    }));

    assert_eq!(order(&registry), ["b", "a", "a.b", "Root"]);
    assert_eq!(registry.get("b").unwrap().field("x").unwrap().kind, FieldKind::Integer);
    assert_eq!(registry.get("a.b").unwrap().field("x").unwrap().kind, FieldKind::String);
    assert_eq!(root.field("a.b").unwrap(), &Field::record("a.b", "a.b"));
}

#[test]
fn test_dotted_key_does_not_grow_nested_record() {
    let (registry, _) = build(json!({
        "a": {"b": {"x": 1}},
        "a.b": {"y": "s"}
    }));

    let nested: Vec<_> = registry.get("b").unwrap().fields.keys().map(String::as_str).collect();
    assert_eq!(nested, ["x"]);
    let dotted: Vec<_> = registry.get("a.b").unwrap().fields.keys().map(String::as_str).collect();
    assert_eq!(dotted, ["y"]);
}

#[test]
fn test_bracket_keys_are_not_list_elements() {
    let (registry, root) = build_with(
        json!({
            "items": [{"m": {"v": 1}}],
            "items[]": {"m": {"v": "s"}}
        }),
        BuildOptions::default().with_unique_names(true),
    );

    assert_eq!(registry.get("m").unwrap().field("v").unwrap().kind, FieldKind::Integer);
    assert_eq!(registry.get("m_1").unwrap().field("v").unwrap().kind, FieldKind::String);
    assert_eq!(root.field("items[]").unwrap().reference.as_deref(), Some("items[]"));
}

#[test]
fn test_annotations_escape_quotes() {
    let (_, root) = build(json!({"a\"b": 1, "c\\d": 2}));

    let quoted: Vec<_> = root.field("a\"b").unwrap().annotations.iter().collect();
    assert_eq!(quoted, ["json:\"a\\\"b\""]);
    let backslash: Vec<_> = root.field("c\\d").unwrap().annotations.iter().collect();
    assert_eq!(backslash, ["json:\"c\\\\d\""]);
}

#[test]
fn test_unsupported_type_reports_path() {
    let err = build_err(json!({"user": {"nickname": null}}));
    match err {
        Error::UnsupportedType { path, type_name } => {
            assert_eq!(path, "Root.user.nickname");
            assert_eq!(type_name, "null");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = build_err(json!({"xs": [1, null]}));
    assert!(matches!(err, Error::UnsupportedType { ref path, .. } if path == "Root.xs[1]"));
}

#[test]
fn test_bytes_are_unsupported() {
    let tree = Node::record([("blob", Node::Scalar(Scalar::Bytes(vec![1, 2])))]);
    let mut registry = StructRegistry::new();
    let err = SchemaBuilder::new(&mut registry, BuildOptions::default())
        .build(&tree)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { ref type_name, .. } if type_name == "bytes"));
}

#[test]
fn test_widened_scalars_from_node_tree() {
    let tree = Node::record([
        ("small", Node::Scalar(Scalar::I8(1))),
        ("ratio", Node::Scalar(Scalar::F32(0.5))),
        ("big", Node::Scalar(Scalar::I64(1))),
    ]);
    let mut registry = StructRegistry::new();
    let root = SchemaBuilder::new(&mut registry, BuildOptions::default())
        .build(&tree)
        .unwrap();

    assert_eq!(root.field("small").unwrap().kind, FieldKind::Integer);
    assert_eq!(root.field("ratio").unwrap().kind, FieldKind::Float);
    assert_eq!(root.field("big").unwrap().kind, FieldKind::Integer64);
}

#[test]
fn test_root_list_of_records() {
    let (registry, root) = build(json!([{"id": 1}, {"id": 2, "name": "x"}]));
    assert_eq!(root.name, "Root");
    assert_eq!(root.fields.len(), 2);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_root_shapes_rejected() {
    assert!(matches!(build_err(json!(42)), Error::UnsupportedRootShape { .. }));
    assert!(matches!(build_err(json!([])), Error::UnsupportedRootShape { .. }));

    let err = build_err(json!([1, 2]));
    assert_eq!(err.to_string(), "Unsupported document root: list of Integer");
}

#[test]
fn test_first_error_wins() {
    // Keys are visited in order, so "a" fails before "b"
    let err = build_err(json!({"a": [1, "x"], "b": {"c": null}}));
    assert!(matches!(err, Error::HeterogeneousList { .. }));
}

#[test]
fn test_infer_structs() {
    let registry = infer_structs(&json!({"a": {"b": {"c": true}}}), &BuildOptions::default()).unwrap();
    assert_eq!(order(&registry), ["b", "a", "Root"]);
    assert_eq!(registry.max_level(), Some(2));
}

// ============================================================================
// Trace
// ============================================================================

#[test]
fn test_trace_paths() {
    let root = Trace::root("Root");
    let items = root.list_field("items");
    let element = items.element_record();
    let owner = element.record_field("owner");
    let inner = items.element_list();

    assert_eq!(owner.path(), "Root.items[].owner");
    assert_eq!(owner.level(), 1);
    assert_eq!(owner.nesting(), 0);
    assert_eq!(owner.depth(), 3);
    assert_eq!(owner.parent().map(Trace::path), Some("Root.items[]"));

    assert_eq!(items.nesting(), 1);
    assert_eq!(element.name(), "items");
    assert_eq!(element.level(), 0);
    assert_eq!(inner.nesting(), 2);
    assert_eq!(Trace::root_list("Root").nesting(), 1);
}

#[test]
fn test_trace_steps_keep_keys_whole() {
    let root = Trace::root("Root");
    let dotted = root.record_field("a.b");
    let a = root.record_field("a");
    let nested = a.record_field("b");

    assert_eq!(dotted.path(), nested.path());
    assert_eq!(dotted.steps(), [PathStep::Key("a.b".into())]);
    assert_eq!(
        nested.steps(),
        [PathStep::Key("a".into()), PathStep::Key("b".into())]
    );

    let items = root.list_field("items");
    let element = items.element_record();
    assert_eq!(
        element.steps(),
        [PathStep::Key("items".into()), PathStep::Element]
    );
    assert_ne!(element.steps(), root.record_field("items[]").steps());
    assert!(root.steps().is_empty());
}
