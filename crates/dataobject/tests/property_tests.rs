//! Property-based tests for the container and builder.
//!
//! These verify the immutability laws and the encode→decode→rebuild round
//! trip under generated keys and scalar values.

use proptest::prelude::*;

use dataobject::{DataObject, DataObjectBuilder, Node, Value};

/// Generate plausible container keys.
fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

/// Generate scalar values. Floats are kept finite; JSON has no NaN.
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9..1.0e9f64).prop_map(Value::Float),
        "[ -~]{0,20}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn with_stores_value_and_leaves_original_untouched(
        key in key(),
        value in scalar(),
    ) {
        let original = DataObject::new();
        let derived = original.with(key.clone(), value.clone());

        prop_assert_eq!(derived.get(&key), Some(&value));
        prop_assert!(original.get(&key).is_none());
    }

    #[test]
    fn with_overwrites_previous_value(
        key in key(),
        first in scalar(),
        second in scalar(),
    ) {
        let sut = DataObject::new()
            .with(key.clone(), first)
            .with(key.clone(), second.clone());

        prop_assert_eq!(sut.get(&key), Some(&second));
        prop_assert_eq!(sut.len(), 1);
    }

    #[test]
    fn without_removes_key_but_not_from_source(
        key in key(),
        value in scalar(),
    ) {
        let with = DataObject::new().with(key.clone(), value);
        let without = with.without(&key);

        prop_assert!(!without.contains(&key));
        prop_assert!(with.contains(&key));
    }

    #[test]
    fn typed_getters_are_total_over_scalars(
        key in key(),
        value in scalar(),
    ) {
        let sut = DataObject::new().with(key.clone(), value);

        // Scalar coercions never fail; only the date-time path may error,
        // and it must never panic.
        let _ = sut.get_string(&key);
        let _ = sut.get_int(&key);
        let _ = sut.get_float(&key);
        let _ = sut.get_bool(&key);
        let _ = sut.get_date_time(&key);
    }

    #[test]
    fn scalar_containers_round_trip_through_json(
        entries in proptest::collection::vec((key(), scalar()), 0..8),
    ) {
        let mut container = DataObject::new();
        for (key, value) in &entries {
            container = container.with(key.clone(), value.clone());
        }

        let encoded = serde_json::to_string(&container).expect("encode failed");
        let decoded: serde_json::Value =
            serde_json::from_str(&encoded).expect("decode failed");
        let rebuilt = DataObjectBuilder::new()
            .from_assoc(&Node::from_json_value_assoc(&decoded))
            .expect("rebuild failed");

        prop_assert_eq!(rebuilt.as_array(), container.as_array());
    }
}
