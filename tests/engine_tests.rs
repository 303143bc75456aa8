//! Engine facade tests
//!
//! Cache behaviour, syntax reconfiguration, option toggles, and the
//! validation surface.

use std::sync::Arc;

use pathex::{ContainerRole, Engine, ErrorKind, PrefixRole, SeparatorRole, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cache_serves_identical_programs() {
        let mut engine = Engine::new();
        let first = engine.tokens("a.b[c]").expect("path compiles");
        let second = engine.tokens("a.b[c]").expect("path compiles");
        assert!(Arc::ptr_eq(&first, &second), "second lookup must hit the cache");
    }

    #[test]
    fn syntax_mutation_wipes_the_cache() {
        let mut engine = Engine::new();
        let before = engine.tokens("a.b").expect("path compiles");
        engine
            .set_separator(SeparatorRole::Property, '/')
            .expect("slash separator");
        let after = engine.tokens("a.b").expect("path compiles");
        assert!(
            !Arc::ptr_eq(&before, &after),
            "mutation must retokenize new calls"
        );

        // the old program stays usable
        let root = v(serde_json::json!({"a": {"b": 1}}));
        assert_eq!(engine.get_program(&root, &before, &[]), Some(Value::Int(1)));

        // under the new separator the old text is a single name
        assert_eq!(engine.get(&root, "a/b", &[]), Some(Value::Int(1)));
        assert_eq!(engine.get(&root, "a.b", &[]), None);
    }

    #[test]
    fn conflicting_assignment_names_the_holder() {
        let mut engine = Engine::new();
        let err = engine
            .set_separator(SeparatorRole::Collection, '^')
            .expect_err("bound character must be rejected");
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(
            err.message.contains("parent prefix"),
            "error must name the holding role: {}",
            err.message
        );

        let wildcard = engine
            .set_prefix(PrefixRole::Root, '*')
            .expect_err("wildcard must be rejected");
        assert_eq!(wildcard.kind, ErrorKind::Config);
    }

    #[test]
    fn container_reassignment_moves_the_pair() {
        let mut engine = Engine::new();
        engine
            .set_container(ContainerRole::Property, '<', '>')
            .expect_err("each separator holds '<'");
        engine
            .set_separator(SeparatorRole::Each, '#')
            .expect("free character");
        engine
            .set_container(ContainerRole::Property, '<', '>')
            .expect("pair is free now");

        let root = v(serde_json::json!({"a": {"b": 2}}));
        assert_eq!(engine.get(&root, "a<\"b\">", &[]), Some(Value::Int(2)));
    }

    #[test]
    fn simple_mode_reads_special_characters_literally() {
        let mut engine = Engine::new();
        let root = v(serde_json::json!({"a[b]": {"c*d": 7}}));

        assert_eq!(engine.get(&root, "a[b]", &[]), None, "full syntax rejects");
        engine.simple_mode(true);
        assert_eq!(
            engine.get(&root, "a[b].c*d", &[]),
            Some(Value::Int(7)),
            "simple mode treats brackets and stars as name characters"
        );
        engine.simple_mode(false);
        assert_eq!(engine.get(&root, "a[b]", &[]), None);
    }

    #[test]
    fn reset_restores_default_bindings() {
        let mut engine = Engine::new();
        engine
            .set_separator(SeparatorRole::Property, '/')
            .expect("slash separator");
        engine.reset_syntax();
        assert_eq!(
            engine.syntax().separator(SeparatorRole::Property),
            '.',
            "reset must restore the default separator"
        );
    }

    #[test]
    fn disabling_the_cache_stops_memoisation() {
        let mut engine = Engine::new();
        engine.set_cache(false);
        let first = engine.tokens("a.b").expect("path compiles");
        let second = engine.tokens("a.b").expect("path compiles");
        assert!(!Arc::ptr_eq(&first, &second));

        engine.set_cache(true);
        let third = engine.tokens("a.b").expect("path compiles");
        let fourth = engine.tokens("a.b").expect("path compiles");
        assert!(Arc::ptr_eq(&third, &fourth));
    }

    #[test]
    fn default_value_covers_misses() {
        let mut engine = Engine::new();
        let root = v(serde_json::json!({"a": 1}));

        assert_eq!(engine.get(&root, "missing", &[]), None);
        engine.set_default(Some(Value::Int(-1)));
        assert_eq!(engine.get(&root, "missing", &[]), Some(Value::Int(-1)));
        assert_eq!(engine.get(&root, "a", &[]), Some(Value::Int(1)));

        // the explicit fallback wins over the engine default
        assert_eq!(
            engine.get_or(&root, "missing", Value::Int(0), &[]),
            Value::Int(0)
        );
    }

    #[test]
    fn validation_mirrors_tokenization() {
        let mut engine = Engine::new();
        assert!(engine.valid("a.b[c]"));
        assert!(!engine.valid("a[b"));
        assert!(!engine.valid("a\\"));

        let root = v(serde_json::json!({"a": 1}));
        assert_eq!(engine.get(&root, "a[b", &[]), None, "invalid paths read absent");
        let mut target = root.clone();
        assert!(!engine.set(&mut target, "a[b", &Value::Int(2), &[]));
        assert_eq!(target, root);
    }

    #[test]
    fn escape_makes_any_key_addressable() {
        let mut engine = Engine::new();
        let root = v(serde_json::json!({"a.b": {"c,d": 3}}));
        let path = format!("{}.{}", engine.escape("a.b"), engine.escape("c,d"));
        assert_eq!(engine.get(&root, &path, &[]), Some(Value::Int(3)));
    }
}
