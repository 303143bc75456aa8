//! Value model and serde interop tests

use pathex::{Callable, Value};

#[test]
fn json_round_trip_preserves_callable_free_trees() {
    let json = serde_json::json!({
        "s": "text",
        "n": 3,
        "f": 2.5,
        "b": true,
        "nil": null,
        "seq": [1, [2], {"k": "v"}],
    });
    let value = Value::from_json(&json);
    assert_eq!(value.to_json().expect("no callables present"), json);
}

#[test]
fn callables_have_no_json_form() {
    let callable = Value::Callable(Callable::new("noop", |_, _| Value::Null));
    assert!(callable.to_json().is_err());

    // but serialization degrades them to null instead of failing
    let serialized = serde_json::to_value(&callable).expect("serialize");
    assert_eq!(serialized, serde_json::Value::Null);
}

#[test]
fn numbers_compare_numerically_across_variants() {
    assert_eq!(Value::Int(2), Value::Float(2.0));
    assert_ne!(Value::Int(2), Value::Float(2.5));
    assert_ne!(Value::Int(0), Value::Str("0".to_string()));
}

#[test]
fn callable_equality_is_pointer_identity() {
    let a = Callable::new("f", |_, _| Value::Null);
    let b = a.clone();
    let c = Callable::new("f", |_, _| Value::Null);
    assert_eq!(Value::Callable(a.clone()), Value::Callable(b));
    assert_ne!(Value::Callable(a), Value::Callable(c));
}

#[test]
fn absence_is_distinct_from_null_and_empty() {
    let root = Value::from_json(&serde_json::json!({"empty": {}, "nil": null}));
    assert_eq!(root.get_key("empty"), Some(&Value::map()));
    assert_eq!(root.get_key("nil"), Some(&Value::Null));
    assert_eq!(root.get_key("missing"), None);
}

#[test]
fn word_indexing_unifies_maps_and_sequences() {
    let root = Value::from_json(&serde_json::json!({"seq": [10, 20]}));
    let seq = root.get_key("seq").expect("seq present");
    assert_eq!(seq.index_word("1"), Some(&Value::Int(20)));
    assert_eq!(seq.index_word("9"), None);
    assert_eq!(seq.index_word("x"), None);
    assert_eq!(root.index_word("seq"), Some(seq));
}

#[test]
fn deserialize_builds_the_value_model() {
    let value: Value = serde_json::from_str(r#"{"a": [1, 2]}"#).expect("deserialize");
    assert_eq!(value, Value::from_json(&serde_json::json!({"a": [1, 2]})));
}
