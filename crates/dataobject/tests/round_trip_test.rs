//! Round-trip integration tests: container → encode → decode → rebuild.

use dataobject::{DataObject, DataObjectBuilder, Node, Value};

/// A container holding every shape that should survive a round trip: scalars,
/// a null, a sequence and a nested container.
fn sample_container() -> DataObject {
    DataObject::new()
        .with("id", 123)
        .with("ratio", 0.25)
        .with("active", true)
        .with("note", Value::Null)
        .with("name", "Example")
        .with(
            "tags",
            Value::Array(vec!["one".into(), "two".into(), Value::Int(3)]),
        )
        .with(
            "owner",
            DataObject::new().with("name", "Margaret").with("age", 77),
        )
}

#[test]
fn test_round_trip_through_associative_decode() {
    let container = sample_container();

    let encoded = serde_json::to_string(&container).expect("encode failed");
    let decoded: serde_json::Value = serde_json::from_str(&encoded).expect("decode failed");

    let rebuilt = DataObjectBuilder::new()
        .from_assoc(&Node::from_json_value_assoc(&decoded))
        .expect("rebuild failed");

    assert_eq!(rebuilt.as_array(), container.as_array());
}

#[test]
fn test_round_trip_through_object_decode() {
    let container = sample_container();

    let encoded = serde_json::to_string(&container).expect("encode failed");
    let decoded: serde_json::Value = serde_json::from_str(&encoded).expect("decode failed");

    let rebuilt = DataObjectBuilder::new()
        .from_object(&Node::from_json_value(&decoded))
        .expect("rebuild failed");

    assert_eq!(rebuilt.as_array(), container.as_array());
    assert_eq!(rebuilt.get_int("id"), Some(123));
    assert_eq!(rebuilt.get_float("ratio"), Some(0.25));
    assert_eq!(rebuilt.get_bool("active"), Some(true));
    assert!(rebuilt.contains("note"));
    assert!(rebuilt.get_string("note").is_none());
}

#[test]
fn test_types_pass_through_exactly() {
    let container = sample_container();

    let encoded = serde_json::to_string(&container).expect("encode failed");
    let decoded: serde_json::Value = serde_json::from_str(&encoded).expect("decode failed");

    let rebuilt = DataObjectBuilder::new()
        .from_object(&Node::from_json_value(&decoded))
        .expect("rebuild failed");

    assert_eq!(rebuilt.type_of("id"), Some("int"));
    assert_eq!(rebuilt.type_of("ratio"), Some("float"));
    assert_eq!(rebuilt.type_of("active"), Some("bool"));
    assert_eq!(rebuilt.type_of("note"), Some("null"));
    assert_eq!(rebuilt.type_of("name"), Some("string"));
    assert_eq!(rebuilt.type_of("tags"), Some("array"));
    assert_eq!(rebuilt.type_of("owner"), Some("DataObject"));
}

#[test]
fn test_serialized_form_equals_as_array() {
    let container = sample_container();

    let direct = serde_json::to_value(&container).expect("encode failed");
    let flattened = serde_json::to_value(container.as_array()).expect("encode failed");

    assert_eq!(direct, flattened);
}

#[test]
fn test_json_variant_serializes_back_to_original() {
    let documents = [
        r#"{"id":123,"name":"Example","tags":["a","b"]}"#,
        r#"["one","two",{"id":123}]"#,
        "123.456",
        "null",
        "true",
    ];

    let builder = DataObjectBuilder::new();
    for document in documents {
        let original: serde_json::Value = serde_json::from_str(document).expect("decode failed");
        let data = builder.from_json(&original);
        let reencoded = serde_json::to_value(&data).expect("encode failed");
        assert_eq!(reencoded, original, "for document {document}");
    }
}
