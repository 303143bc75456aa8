//! Equality search tests
//!
//! DFS order, label quoting, and the path round-trip guarantee.

use pathex::{Engine, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from_json(&json)
}

#[test]
fn finds_paths_in_dfs_order_with_sorted_keys() {
    let engine = Engine::new();
    let root = v(serde_json::json!({
        "c": [1, {"deep": 1}],
        "a": {"b": 1},
    }));

    assert_eq!(engine.find_first(&root, &Value::Int(1)), Some("a.b".to_string()));
    assert_eq!(
        engine.find_all(&root, &Value::Int(1)),
        vec!["a.b".to_string(), "c.0".to_string(), "c.1.deep".to_string()]
    );
}

#[test]
fn absent_target_yields_nothing() {
    let engine = Engine::new();
    let root = v(serde_json::json!({"a": 1}));
    assert_eq!(engine.find_first(&root, &Value::Int(99)), None);
    assert!(engine.find_all(&root, &Value::Int(99)).is_empty());
}

#[test]
fn root_match_is_the_empty_path() {
    let engine = Engine::new();
    let root = v(serde_json::json!({"a": 1}));
    assert_eq!(
        engine.find_first(&root, &root.clone()),
        Some(String::new())
    );
}

#[test]
fn special_keys_are_quoted_and_round_trip() {
    let mut engine = Engine::new();
    let root = v(serde_json::json!({
        "x.y": {"z": 5},
        "it's": 6,
    }));

    for target in [Value::Int(5), Value::Int(6)] {
        let path = engine
            .find_first(&root, &target)
            .expect("target must be found");
        assert_eq!(
            engine.get(&root, &path, &[]),
            Some(target.clone()),
            "emitted path {path:?} must read back its value"
        );
    }

    let quoted = engine.find_first(&root, &Value::Int(5)).expect("hit");
    assert_eq!(quoted, "'x.y'.z");
}

#[test]
fn non_leaf_values_match_too() {
    let engine = Engine::new();
    let root = v(serde_json::json!({"outer": {"inner": {"k": 1}}}));
    let target = v(serde_json::json!({"k": 1}));
    assert_eq!(
        engine.find_first(&root, &target),
        Some("outer.inner".to_string())
    );
}

#[test]
fn safe_search_accepts_trees() {
    let engine = Engine::new();
    let root = v(serde_json::json!({"a": [{"b": 2}, {"b": 2}]}));
    let hits = engine
        .find_all_safe(&root, &Value::Int(2))
        .expect("owned trees cannot cycle");
    assert_eq!(hits, vec!["a.0.b".to_string(), "a.1.b".to_string()]);
    assert_eq!(
        engine
            .find_first_safe(&root, &Value::Int(2))
            .expect("owned trees cannot cycle"),
        Some("a.0.b".to_string())
    );
}

#[test]
fn search_respects_the_active_separator() {
    let mut engine = Engine::new();
    engine
        .set_separator(pathex::SeparatorRole::Property, '/')
        .expect("slash separator");
    let root = v(serde_json::json!({"a": {"b": 1}}));
    assert_eq!(engine.find_first(&root, &Value::Int(1)), Some("a/b".to_string()));
    assert_eq!(engine.get(&root, "a/b", &[]), Some(Value::Int(1)));
}
